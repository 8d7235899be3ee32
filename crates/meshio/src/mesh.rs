//! CPU-side triangle-soup representation and axis conventions.

/// Three `f32` components. Values are carried verbatim from the source
/// bytes; NaN and infinities pass through unmodified.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One facet: a normal plus three vertices in file order.
///
/// The 2-byte attribute count trailing each on-disk record is consumed by
/// the reader but never stored here.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    pub normal: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
}

impl Triangle {
    pub fn new(normal: Vec3, v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self { normal, v1, v2, v3 }
    }
}

/// Triangle soup in file order.
///
/// Order is significant: it is the only ordering guarantee in the pipeline
/// and determines the 1-based vertex indices the OBJ emitter writes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    pub triangles: Vec<Triangle>,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Log every triangle at debug level, plus a count summary.
    ///
    /// Inspection hook for the CLI `--dump` flag; decoding and emission
    /// never depend on it.
    pub fn log_triangles(&self) {
        for (i, t) in self.triangles.iter().enumerate() {
            log::debug!("{}", dump_line(i, t));
        }
        log::debug!("{} triangles total", self.triangles.len());
    }
}

/// Compact one-line dump of a triangle, components in the same `{:?}`
/// token style the OBJ emitter uses.
fn dump_line(index: usize, t: &Triangle) -> String {
    format!(
        "triangle {index}: n {:?} {:?} {:?} v1 {:?} {:?} {:?} v2 {:?} {:?} {:?} v3 {:?} {:?} {:?}",
        t.normal.x, t.normal.y, t.normal.z,
        t.v1.x, t.v1.y, t.v1.z,
        t.v2.x, t.v2.y, t.v2.z,
        t.v3.x, t.v3.y, t.v3.z,
    )
}

/// Which axis the source geometry treats as "up".
///
/// Unity-style consumers are Y-up (left-handed); CAD tools and Blender
/// author Z-up (right-handed). `ZUp` input gets its Y and Z components
/// swapped on emission and its face winding reversed, so outward-facing
/// triangles stay outward under the new handedness.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AxisConvention {
    /// Vertices pass through unchanged.
    YUp,
    /// Y/Z swapped and winding reversed on emission.
    ZUp,
}
