//! Binary STL decoder.
//!
//! On-disk layout (little-endian, no compression):
//!
//! ```text
//! UINT8[80]    – header, never interpreted
//! UINT32       – triangle count N
//! N records of 50 bytes:
//!     REAL32[3] – normal
//!     REAL32[3] – vertex 1
//!     REAL32[3] – vertex 2
//!     REAL32[3] – vertex 3
//!     UINT16    – attribute byte count, consumed and discarded
//! ```
//!
//! The declared count is trusted as-is; a stream shorter than it implies
//! fails the whole read rather than yielding a partial mesh.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::{IoError, IoResult};
use crate::mesh::{Triangle, TriangleMesh, Vec3};

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one triangle record (normal + 3 vertices + attribute count).
pub const TRIANGLE_SIZE: usize = 50;

/// Cap for count-based preallocation so a corrupt header cannot trigger a
/// huge allocation before the short read is detected.
const PREALLOC_LIMIT: usize = 1 << 20;

/// Read a binary STL mesh from a file path.
pub fn read_stl_from_path(path: impl AsRef<Path>) -> Result<TriangleMesh> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open STL file: {}", path.as_ref().display()))?;
    read_stl_from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to decode STL file: {}", path.as_ref().display()))
}

/// Read a binary STL mesh from a [`Read`] implementation positioned at
/// offset 0 of the encoding.
///
/// The whole mesh is materialized before this returns. Any short read,
/// in the header or in a triangle record, fails the entire operation with
/// [`IoError::UnexpectedEndOfStream`]; no partial mesh escapes.
pub fn read_stl_from_reader<R: Read>(mut reader: R) -> IoResult<TriangleMesh> {
    let mut header = [0u8; HEADER_SIZE];
    read_field(&mut reader, &mut header, 0)?;
    if header.starts_with(b"solid") {
        log::warn!("header starts with 'solid'; input may be ASCII STL, which is unsupported");
    }

    let mut count_bytes = [0u8; 4];
    read_field(&mut reader, &mut count_bytes, HEADER_SIZE as u64)?;
    let triangle_count = u32::from_le_bytes(count_bytes);

    let mut triangles = Vec::with_capacity((triangle_count as usize).min(PREALLOC_LIMIT));
    let mut record = [0u8; TRIANGLE_SIZE];
    for i in 0..triangle_count {
        let position = (HEADER_SIZE + 4) as u64 + u64::from(i) * TRIANGLE_SIZE as u64;
        read_field(&mut reader, &mut record, position)?;
        triangles.push(decode_triangle(&record));
    }

    Ok(TriangleMesh::new(triangles))
}

/// Fill `buf` exactly, reporting a short read as `UnexpectedEndOfStream`
/// at the offset where the field begins.
fn read_field<R: Read>(reader: &mut R, buf: &mut [u8], position: u64) -> IoResult<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            IoError::UnexpectedEndOfStream { position }
        } else {
            IoError::Io(e)
        }
    })
}

/// Decode one 50-byte record. The trailing attribute count is dropped.
fn decode_triangle(record: &[u8; TRIANGLE_SIZE]) -> Triangle {
    Triangle::new(
        decode_vec3(&record[0..12]),
        decode_vec3(&record[12..24]),
        decode_vec3(&record[24..36]),
        decode_vec3(&record[36..48]),
    )
}

/// Reinterpret 12 bytes as three little-endian IEEE-754 binary32 values.
/// Bit-for-bit; no text parsing, no rounding.
fn decode_vec3(buf: &[u8]) -> Vec3 {
    Vec3::new(
        f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
        f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
        f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
    )
}
