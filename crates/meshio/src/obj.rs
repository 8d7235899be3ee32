//! OBJ text emitter.
//!
//! Two full passes over the mesh: every `v` line first (three per
//! triangle, in triangle order), then one `f` line per triangle with
//! 1-based indices into the vertex block just written. Faces are never
//! interleaved with vertices; their indices are derived purely from
//! triangle position (`3*t + {1,2,3}`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{IoError, IoResult};
use crate::mesh::{AxisConvention, TriangleMesh, Vec3};

/// Write `mesh` as OBJ text to a newly created file at `path`.
///
/// Fails with [`IoError::InvalidOutputTarget`] before any emission if the
/// file cannot be created. On a mid-emission failure the file is left
/// incomplete; callers must treat a failed run's output as unusable.
pub fn write_obj_to_path(
    mesh: &TriangleMesh,
    convention: AxisConvention,
    path: impl AsRef<Path>,
) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| IoError::InvalidOutputTarget {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, convention, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write `mesh` as OBJ text to any [`Write`] sink.
///
/// The first write failure aborts the remaining emission.
pub fn write_obj<W: Write>(
    mesh: &TriangleMesh,
    convention: AxisConvention,
    writer: &mut W,
) -> IoResult<()> {
    for triangle in &mesh.triangles {
        write_vertex_line(writer, triangle.v1, convention)?;
        write_vertex_line(writer, triangle.v2, convention)?;
        write_vertex_line(writer, triangle.v3, convention)?;
    }

    for t in 0..mesh.triangle_count() as u64 {
        let base = t * 3 + 1;
        match convention {
            AxisConvention::YUp => writeln!(writer, "f {} {} {}", base, base + 1, base + 2)?,
            // v1, v3, v2: winding reversed to compensate for the axis swap.
            AxisConvention::ZUp => writeln!(writer, "f {} {} {}", base, base + 2, base + 1)?,
        }
    }

    Ok(())
}

/// One `v` line. Components use `{:?}` formatting: the shortest decimal
/// that round-trips, always carrying a decimal point. NaN and infinities
/// render as the tokens `NaN`, `inf` and `-inf`.
fn write_vertex_line<W: Write>(writer: &mut W, v: Vec3, convention: AxisConvention) -> IoResult<()> {
    match convention {
        AxisConvention::YUp => writeln!(writer, "v {:?} {:?} {:?}", v.x, v.y, v.z)?,
        // Z-up source: the up axis moves to the second emitted component.
        AxisConvention::ZUp => writeln!(writer, "v {:?} {:?} {:?}", v.x, v.z, v.y)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;

    fn tri(v1: [f32; 3], v2: [f32; 3], v3: [f32; 3]) -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(v1[0], v1[1], v1[2]),
            Vec3::new(v2[0], v2[1], v2[2]),
            Vec3::new(v3[0], v3[1], v3[2]),
        )
    }

    fn emit(mesh: &TriangleMesh, convention: AxisConvention) -> String {
        let mut out = Vec::new();
        write_obj(mesh, convention, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn y_up_passes_components_through() {
        let mesh = TriangleMesh::new(vec![tri(
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        )]);
        let out = emit(&mesh, AxisConvention::YUp);
        assert_eq!(out, "v 1.0 2.0 3.0\nv 4.0 5.0 6.0\nv 7.0 8.0 9.0\nf 1 2 3\n");
    }

    #[test]
    fn z_up_swaps_axes_and_reverses_winding() {
        let mesh = TriangleMesh::new(vec![tri(
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        )]);
        let out = emit(&mesh, AxisConvention::ZUp);
        assert_eq!(out, "v 1.0 3.0 2.0\nv 4.0 6.0 5.0\nv 7.0 9.0 8.0\nf 1 3 2\n");
    }

    #[test]
    fn face_indices_advance_by_three() {
        let t = tri([0.0; 3], [0.0; 3], [0.0; 3]);
        let mesh = TriangleMesh::new(vec![t, t, t]);

        let out = emit(&mesh, AxisConvention::YUp);
        let faces: Vec<&str> = out.lines().filter(|l| l.starts_with('f')).collect();
        assert_eq!(faces, vec!["f 1 2 3", "f 4 5 6", "f 7 8 9"]);

        let out = emit(&mesh, AxisConvention::ZUp);
        let faces: Vec<&str> = out.lines().filter(|l| l.starts_with('f')).collect();
        assert_eq!(faces, vec!["f 1 3 2", "f 4 6 5", "f 7 9 8"]);
    }

    #[test]
    fn vertex_block_precedes_face_block() {
        let t = tri([0.0; 3], [0.0; 3], [0.0; 3]);
        let mesh = TriangleMesh::new(vec![t, t]);
        let out = emit(&mesh, AxisConvention::ZUp);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3 * 2 + 2);
        let last_v = lines.iter().rposition(|l| l.starts_with('v')).unwrap();
        let first_f = lines.iter().position(|l| l.starts_with('f')).unwrap();
        assert!(last_v < first_f);
    }

    #[test]
    fn empty_mesh_emits_nothing() {
        let out = emit(&TriangleMesh::default(), AxisConvention::ZUp);
        assert!(out.is_empty());
    }

    #[test]
    fn special_values_render_as_single_tokens() {
        let mesh = TriangleMesh::new(vec![tri(
            [-0.0, f32::NAN, f32::INFINITY],
            [0.0; 3],
            [0.0; 3],
        )]);
        let out = emit(&mesh, AxisConvention::YUp);
        let first = out.lines().next().unwrap();
        assert_eq!(first, "v -0.0 NaN inf");
    }

    #[test]
    fn write_failure_aborts_emission() {
        struct FailAfter(usize);
        impl Write for FailAfter {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                if self.0 == 0 {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::BrokenPipe,
                        "sink closed",
                    ));
                }
                self.0 -= 1;
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let t = tri([1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]);
        let mesh = TriangleMesh::new(vec![t, t]);
        let err = write_obj(&mesh, AxisConvention::YUp, &mut FailAfter(1)).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }

    #[test]
    fn uncreatable_output_path_fails_before_emission() {
        let path = std::env::temp_dir()
            .join("stl2obj_no_such_dir")
            .join("out.obj");
        let mesh = TriangleMesh::new(vec![tri([1.0, 2.0, 3.0], [0.0; 3], [0.0; 3])]);
        let err = write_obj_to_path(&mesh, AxisConvention::ZUp, &path).unwrap_err();
        assert!(matches!(err, IoError::InvalidOutputTarget { .. }));
    }

    #[test]
    fn stl_bytes_convert_end_to_end() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[0u8; crate::stl::HEADER_SIZE]);
        bytes.extend_from_slice(&1u32.to_le_bytes());
        for v in [
            [0.0f32, 0.0, 1.0],
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ] {
            for component in v {
                bytes.extend_from_slice(&component.to_le_bytes());
            }
        }
        bytes.extend_from_slice(&0u16.to_le_bytes());

        let mesh = crate::stl::read_stl_from_reader(std::io::Cursor::new(bytes)).unwrap();
        let out = emit(&mesh, AxisConvention::ZUp);
        assert_eq!(out, "v 1.0 3.0 2.0\nv 4.0 6.0 5.0\nv 7.0 9.0 8.0\nf 1 3 2\n");
    }
}
