//! Mesh I/O: binary STL decoding and OBJ text emission.
//! The decoder materializes the whole mesh before any output is written.

pub mod error;
pub mod mesh;
pub mod obj;
pub mod stl;

pub use error::{IoError, IoResult};
pub use mesh::{AxisConvention, Triangle, TriangleMesh, Vec3};
