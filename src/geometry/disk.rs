//! Quadrangulated disk
//!
//! Maps a coarse mesh of twelve quadrilaterals onto a disk. Trees with index
//! 0 mod 3 form the flat center square; the other trees blend between their
//! flat interpolation and a corner-rectified radial projection onto the
//! boundary circle.

use crate::interpolation::linear_interpolation;
use crate::reference_cell::ReferenceCellType;
use crate::traits::{Geometry, GeometryError, Result, TreeContext};
use crate::types::RealScalar;
use crate::vector::{axpy, axy, dot, normalize};
use itertools::izip;

/// Disk mapping over quadrilateral trees classified by tree index mod 3.
#[derive(Debug, Clone, Default)]
pub struct QuadrangulatedDisk;

impl QuadrangulatedDisk {
    /// Create a quadrangulated disk geometry.
    pub fn new() -> Self {
        Self
    }
}

impl<T: RealScalar> Geometry<T> for QuadrangulatedDisk {
    fn name(&self) -> &str {
        "quadrangulated_disk"
    }

    fn dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, tree: &TreeContext<'_, T>, ref_coords: &[T], physical_coords: &mut [T]) {
        assert_eq!(tree.cell_type(), ReferenceCellType::Quadrilateral);
        assert_eq!(tree.corner_count(), 4);
        assert_eq!(ref_coords.len() % 2, 0);
        assert_eq!(physical_coords.len(), 3 * (ref_coords.len() / 2));
        let corners = tree.corner_coords();

        // The center square stays flat.
        if tree.tree_id() % 3 == 0 {
            for (r, out) in izip!(
                ref_coords.chunks_exact(2),
                physical_coords.chunks_exact_mut(3)
            ) {
                out.copy_from_slice(&linear_interpolation(r, corners, 2));
            }
            return;
        }

        // Normal vector along one of the straight edges of the quad.
        let mut n = tree.corner(0);
        normalize(&mut n);

        // Radial vector through the tilted outer corner of the quad.
        let mut radial = tree.corner(3);
        normalize(&mut radial);

        let inv_denominator = T::one() / dot(&radial, &n);

        // Which reference axis runs radially depends on the tree's place in
        // its block of three.
        let (r_coord, a_coord) = if tree.tree_id() % 3 == 2 { (0, 1) } else { (1, 0) };

        let quarter_pi = T::from(std::f64::consts::FRAC_PI_4).unwrap();
        for (r, out) in izip!(
            ref_coords.chunks_exact(2),
            physical_coords.chunks_exact_mut(3)
        ) {
            let r_ref = r[r_coord];
            let a_ref = r[a_coord];

            // Tangent correction of the angular coordinate rectifies the
            // compression near the quad corners.
            let mut corrected = [T::zero(); 2];
            corrected[r_coord] = r_ref;
            corrected[a_coord] = (quarter_pi * a_ref).tan();

            let mut s = linear_interpolation(&corrected, corners, 2);
            normalize(&mut s);
            let p = linear_interpolation(r, corners, 2);

            // Radius of the line through `s` hitting the plane through `p`
            // with normal `n`.
            let out_radius = dot(&p, &n) * inv_denominator;

            // Blend from the flat interpolation at the inner edge to the
            // circular boundary at the outer edge.
            let mut blended = axy(&p, T::one() - r_ref);
            axpy(&s, &mut blended, r_ref * out_radius);
            out.copy_from_slice(&blended);
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
