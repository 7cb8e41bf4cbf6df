//! Quadrangulated spheres
//!
//! Mappings for spherical surfaces built from the faces of a cube and for
//! spherical shells built from hexahedra spanned between two such cubes.
//! Both correct the flat face interpolation with tangent stretching in a
//! face-local frame before projecting radially.

use crate::interpolation::linear_interpolation;
use crate::reference_cell::ReferenceCellType;
use crate::traits::{Geometry, GeometryError, Result, TreeContext};
use crate::types::RealScalar;
use crate::vector::{axpy, axy, cross, diff, dot, normalize, rescale, tri_normal};
use itertools::izip;

/// Orthonormal frame of an anchor face, spanned by its outward normal and
/// two tangents.
struct TangentFrame<T: RealScalar> {
    normal: [T; 3],
    tangent1: [T; 3],
    tangent2: [T; 3],
    // Distance from the sphere center to the supporting plane of the face.
    half_extent: T,
}

impl<T: RealScalar> TangentFrame<T> {
    /// Build the frame from the first three corners of the anchor face.
    /// The corners must be ordered so that their normal points radially
    /// outward.
    fn from_face(c0: &[T; 3], c1: &[T; 3], c2: &[T; 3]) -> Self {
        let mut normal = tri_normal(c0, c1, c2);
        normalize(&mut normal);

        let mut tangent1 = [normal[1], normal[2], -normal[0]];
        let skew = dot(&normal, &tangent1);
        axpy(&normal, &mut tangent1, -skew);
        normalize(&mut tangent1);

        let mut tangent2 = cross(&normal, &tangent1);
        normalize(&mut tangent2);

        let half_extent = dot(c0, &normal).abs();
        Self {
            normal,
            tangent1,
            tangent2,
            half_extent,
        }
    }

    /// Stretch a point of the flat face so that equidistant face points
    /// land on equiangular rays. The result still lies in the face plane.
    fn stretch(&self, pos: &[T; 3]) -> [T; 3] {
        let quarter_pi = T::from(std::f64::consts::FRAC_PI_4).unwrap();
        let origin = axy(&self.normal, self.half_extent);
        let local = diff(pos, &origin);
        let alpha1 =
            self.half_extent * (quarter_pi * dot(&self.tangent1, &local) / self.half_extent).tan();
        let alpha2 =
            self.half_extent * (quarter_pi * dot(&self.tangent2, &local) / self.half_extent).tan();
        let mut out = origin;
        axpy(&self.tangent1, &mut out, alpha1);
        axpy(&self.tangent2, &mut out, alpha2);
        out
    }
}

/// Spherical surface mapping over quadrilateral trees forming a cube.
#[derive(Debug, Clone, Default)]
pub struct QuadrangulatedSphericalSurface;

impl QuadrangulatedSphericalSurface {
    /// Create a quadrangulated spherical surface geometry.
    pub fn new() -> Self {
        Self
    }
}

impl<T: RealScalar> Geometry<T> for QuadrangulatedSphericalSurface {
    fn name(&self) -> &str {
        "quadrangulated_spherical_surface"
    }

    fn dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, tree: &TreeContext<'_, T>, ref_coords: &[T], physical_coords: &mut [T]) {
        assert_eq!(tree.cell_type(), ReferenceCellType::Quadrilateral);
        assert_eq!(tree.corner_count(), 4);
        assert_eq!(ref_coords.len() % 2, 0);
        assert_eq!(physical_coords.len(), 3 * (ref_coords.len() / 2));

        let frame = TangentFrame::from_face(&tree.corner(0), &tree.corner(1), &tree.corner(2));
        let radius = frame.half_extent * T::from(3.0).unwrap().sqrt();

        for (r, out) in izip!(
            ref_coords.chunks_exact(2),
            physical_coords.chunks_exact_mut(3)
        ) {
            let pos = linear_interpolation(r, tree.corner_coords(), 2);
            let mut stretched = frame.stretch(&pos);
            rescale(&mut stretched, radius);
            out.copy_from_slice(&stretched);
        }
    }

    fn evaluate_jacobian(
        &self,
        _tree: &TreeContext<'_, T>,
        _ref_coords: &[T],
        _jacobians: &mut [T],
    ) -> Result<()> {
        Err(GeometryError::UnsupportedOperation {
            geometry: Geometry::<T>::name(self).to_string(),
            operation: "evaluate_jacobian",
        })
    }
}

/// Spherical shell mapping over hexahedral trees with the bottom face on
/// the inner sphere's cube and the top face on the outer sphere's cube.
#[derive(Debug, Clone, Default)]
pub struct CubedSphericalShell;

impl CubedSphericalShell {
    /// Create a cubed spherical shell geometry.
    pub fn new() -> Self {
        Self
    }
}

impl<T: RealScalar> Geometry<T> for CubedSphericalShell {
    fn name(&self) -> &str {
        "cubed_spherical_shell"
    }

    fn dimension(&self) -> usize {
        3
    }

    fn evaluate(&self, tree: &TreeContext<'_, T>, ref_coords: &[T], physical_coords: &mut [T]) {
        assert_eq!(tree.cell_type(), ReferenceCellType::Hexahedron);
        assert_eq!(tree.corner_count(), 8);
        assert_eq!(ref_coords.len() % 3, 0);
        assert_eq!(physical_coords.len(), ref_coords.len());

        let sqrt3 = T::from(3.0).unwrap().sqrt();
        let frame = TangentFrame::from_face(&tree.corner(0), &tree.corner(1), &tree.corner(2));
        let inner_radius = frame.half_extent * sqrt3;
        let thickness = dot(&tree.corner(4), &frame.normal).abs() * sqrt3 - inner_radius;

        for (r, out) in izip!(
            ref_coords.chunks_exact(3),
            physical_coords.chunks_exact_mut(3)
        ) {
            // Lateral position on the inner face, radial blend from the
            // third reference coordinate.
            let pos = linear_interpolation(&r[..2], tree.corner_coords(), 2);
            let mut stretched = frame.stretch(&pos);
            rescale(&mut stretched, inner_radius + r[2] * thickness);
            out.copy_from_slice(&stretched);
        }
    }

    fn evaluate_jacobian(
        &self,
        _tree: &TreeContext<'_, T>,
        _ref_coords: &[T],
        _jacobians: &mut [T],
    ) -> Result<()> {
        Err(GeometryError::UnsupportedOperation {
            geometry: Geometry::<T>::name(self).to_string(),
            operation: "evaluate_jacobian",
        })
    }
}
