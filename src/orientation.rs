//! Conversion between the RAS geometry stored in MGH files and the LPS
//! geometry exposed in memory.
//!
//! MGH files describe the scanner space with the RAS convention (axes
//! pointing Right, Anterior, Superior) and anchor the volume at its center.
//! In memory, a volume is described with LPS direction vectors (Left,
//! Posterior, Superior) and an origin at the first voxel.

/// The raw RAS geometry of an MGH header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasGeometry {
    /// Direction cosines. `matrix[k][i]` is the R, A or S component (`k`)
    /// of array axis `i`, so each axis is a column.
    pub matrix: [[f64; 3]; 3],
    /// RAS coordinates of the volume's center.
    pub center: [f64; 3],
}

impl Default for RasGeometry {
    fn default() -> Self {
        RasGeometry {
            matrix: IDENTITY,
            center: [0.; 3],
        }
    }
}

/// The 3x3 identity matrix.
pub const IDENTITY: [[f64; 3]; 3] = [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];

// RAS <-> LPS flips the first two coordinates
const RAS_TO_LPS: [f64; 3] = [-1., -1., 1.];

/// Half of the physical extent of each axis, in voxel-size units.
fn half_extents(spacing: &[f32; 3], dim: &[u32; 3]) -> [f64; 3] {
    let mut out = [0.; 3];
    for j in 0..3 {
        out[j] = f64::from(spacing[j]) * f64::from(dim[j]) / 2.;
    }
    out
}

/// Convert the RAS geometry of a file into LPS direction vectors and origin.
///
/// `direction[i]` is the LPS vector of array axis `i`. The origin is the
/// position of the first voxel, obtained by walking back from the center
/// (found at voxel index `dim / 2`) by half the volume's extent along each axis.
pub fn to_memory_frame(
    ras: &RasGeometry,
    spacing: &[f32; 3],
    dim: &[u32; 3],
) -> ([[f64; 3]; 3], [f64; 3]) {
    let mut direction = [[0.; 3]; 3];
    for i in 0..3 {
        for k in 0..3 {
            direction[i][k] = RAS_TO_LPS[k] * ras.matrix[k][i];
        }
    }

    let half = half_extents(spacing, dim);
    let mut origin = [0.; 3];
    for k in 0..3 {
        let center = RAS_TO_LPS[k] * ras.center[k];
        let offset: f64 = (0..3).map(|j| direction[j][k] * half[j]).sum();
        origin[k] = center - offset;
    }
    (direction, origin)
}

/// Convert LPS direction vectors and origin back into RAS geometry.
/// This is the exact inverse of [`to_memory_frame`].
///
/// [`to_memory_frame`]: ./fn.to_memory_frame.html
pub fn to_disk_frame(
    direction: &[[f64; 3]; 3],
    origin: &[f64; 3],
    spacing: &[f32; 3],
    dim: &[u32; 3],
) -> RasGeometry {
    let mut matrix = [[0.; 3]; 3];
    for i in 0..3 {
        for k in 0..3 {
            matrix[k][i] = RAS_TO_LPS[k] * direction[i][k];
        }
    }

    let half = half_extents(spacing, dim);
    let mut center = [0.; 3];
    for k in 0..3 {
        let offset: f64 = (0..3).map(|j| direction[j][k] * half[j]).sum();
        center[k] = RAS_TO_LPS[k] * (origin[k] + offset);
    }
    RasGeometry { matrix, center }
}

/// Describe the primary direction of each array axis with a letter out of
/// `R`/`L`, `A`/`P` and `S`/`I`, in axis order.
///
/// Ties between the anterior and superior components resolve to `S`/`I`.
pub fn orientation_label(matrix: &[[f64; 3]; 3]) -> String {
    (0..3)
        .map(|i| {
            let sag = matrix[0][i];
            let cor = matrix[1][i];
            let ax = matrix[2][i];
            if sag.abs() > cor.abs() && sag.abs() > ax.abs() {
                if sag > 0. {
                    'R'
                } else {
                    'L'
                }
            } else if cor.abs() > ax.abs() {
                if cor > 0. {
                    'A'
                } else {
                    'P'
                }
            } else if ax > 0. {
                'S'
            } else {
                'I'
            }
        })
        .collect()
}
