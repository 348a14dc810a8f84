//! Affine transformations of MGH volumes, available with the
//! `nalgebra_affine` feature.
//!
//! Two conventions are provided: [`MghHeader::affine`] maps voxel indices to
//! LPS world coordinates, and [`MghHeader::ras_affine`] maps them to RAS
//! coordinates, matching FreeSurfer's `vox2ras` matrix.
//!
//! [`MghHeader::affine`]: ../header/struct.MghHeader.html#method.affine
//! [`MghHeader::ras_affine`]: ../header/struct.MghHeader.html#method.ras_affine

use crate::header::MghHeader;
use nalgebra::{Matrix3, Matrix4, Vector3};

/// 4x4 affine transformation in homogeneous coordinates.
pub type Affine4 = Matrix4<f64>;

impl MghHeader {
    /// Obtain the voxel-index to LPS world transformation. The columns of
    /// the linear part are the axis directions scaled by the voxel spacing,
    /// and voxel `[0, 0, 0]` maps to `origin`.
    pub fn affine(&self) -> Affine4 {
        let m = Matrix3::from_fn(|k, j| self.direction[j][k] * f64::from(self.spacing[j]));
        compose(&m, &Vector3::from(self.origin))
    }

    /// Obtain the voxel-index to RAS world transformation, as stored by
    /// FreeSurfer. Voxel index `dim / 2` maps to the center stored in the file.
    pub fn ras_affine(&self) -> Affine4 {
        let ras = self.ras_geometry();
        let m = Matrix3::from_fn(|k, j| ras.matrix[k][j] * f64::from(self.spacing[j]));
        let half = Vector3::from_fn(|j, _| f64::from(self.dim[j]) / 2.);
        let p0 = Vector3::from(ras.center) - m * half;
        compose(&m, &p0)
    }
}

/// Separate a 4x4 affine into its 3x3 linear part and translation.
pub fn split_affine(affine: &Affine4) -> (Matrix3<f64>, Vector3<f64>) {
    let translation = Vector3::new(affine[(0, 3)], affine[(1, 3)], affine[(2, 3)]);
    let linear = affine.fixed_view::<3, 3>(0, 0).into_owned();
    (linear, translation)
}

/// Build a 4x4 affine out of its linear part and translation.
pub fn compose(linear: &Matrix3<f64>, translation: &Vector3<f64>) -> Affine4 {
    let mut out = linear.to_homogeneous();
    for k in 0..3 {
        out[(k, 3)] = translation[k];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::RasGeometry;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector4;

    #[test]
    fn default_header() {
        let h = MghHeader::default();
        assert_eq!(h.affine(), Affine4::identity());
        assert_abs_diff_eq!(
            h.ras_affine(),
            Affine4::from_diagonal(&Vector4::new(-1., -1., 1., 1.)),
            epsilon = 1e-12
        );
    }

    #[test]
    fn ras_and_lps_agree() {
        let mut h = MghHeader {
            dim: [20, 30, 10],
            spacing: [0.8, 1.2, 3.],
            ..MghHeader::default()
        };
        let (s, c) = (0.4f64.sin(), 0.4f64.cos());
        let ras = RasGeometry {
            matrix: [[-1., 0., 0.], [0., c, s], [0., -s, c]],
            center: [4., -20., 11.5],
        };
        let (direction, origin) = crate::orientation::to_memory_frame(&ras, &h.spacing, &h.dim);
        h.direction = direction;
        h.origin = origin;

        let flip = Affine4::from_diagonal(&Vector4::new(-1., -1., 1., 1.));
        assert_abs_diff_eq!(flip * h.affine(), h.ras_affine(), epsilon = 1e-9);

        // the center voxel maps to the stored center
        let center = h.ras_affine() * Vector4::new(10., 15., 5., 1.);
        assert_abs_diff_eq!(center.x, 4., epsilon = 1e-9);
        assert_abs_diff_eq!(center.y, -20., epsilon = 1e-9);
        assert_abs_diff_eq!(center.z, 11.5, epsilon = 1e-9);
    }

    #[test]
    fn split_and_compose() {
        let h = MghHeader {
            origin: [1., 2., 3.],
            spacing: [2., 2., 2.],
            ..MghHeader::default()
        };
        let (linear, translation) = split_affine(&h.affine());
        assert_eq!(linear, Matrix3::from_diagonal_element(2.));
        assert_eq!(translation, Vector3::new(1., 2., 3.));
        assert_eq!(compose(&linear, &translation), h.affine());
    }
}
