//! Cubed sphere
//!
//! Maps a coarse mesh of 32 hexahedra onto a solid ball. Trees with index
//! 0 mod 4 form the flat center blocks of the eight octants; the other
//! trees are slabs blending between their flat interpolation and a
//! corner-rectified radial projection onto the boundary sphere. The index
//! mod 4 also selects which reference axis runs radially.

use crate::interpolation::linear_interpolation;
use crate::reference_cell::ReferenceCellType;
use crate::traits::{Geometry, GeometryError, Result, TreeContext};
use crate::types::RealScalar;
use crate::vector::{axpy, axy, dot, normalize};
use itertools::izip;

/// Solid ball mapping over hexahedral trees classified by tree index mod 4.
#[derive(Debug, Clone, Default)]
pub struct CubedSphere;

impl CubedSphere {
    /// Create a cubed sphere geometry.
    pub fn new() -> Self {
        Self
    }
}

impl<T: RealScalar> Geometry<T> for CubedSphere {
    fn name(&self) -> &str {
        "cubed_sphere"
    }

    fn dimension(&self) -> usize {
        3
    }

    fn evaluate(&self, tree: &TreeContext<'_, T>, ref_coords: &[T], physical_coords: &mut [T]) {
        assert_eq!(tree.cell_type(), ReferenceCellType::Hexahedron);
        assert_eq!(tree.corner_count(), 8);
        assert_eq!(ref_coords.len() % 3, 0);
        assert_eq!(physical_coords.len(), ref_coords.len());
        let corners = tree.corner_coords();

        // The center block of each octant stays flat.
        if tree.tree_id() % 4 == 0 {
            for (r, out) in izip!(
                ref_coords.chunks_exact(3),
                physical_coords.chunks_exact_mut(3)
            ) {
                out.copy_from_slice(&linear_interpolation(r, corners, 3));
            }
            return;
        }

        // Normal vector along one of the straight edges of the slab.
        let mut n = tree.corner(0);
        normalize(&mut n);

        // Radial vector through the tilted outer corner of the slab.
        let mut radial = tree.corner(7);
        normalize(&mut radial);

        let inv_denominator = T::one() / dot(&radial, &n);

        // Radial and angular reference axes of the slab.
        let (r_coord, t_coord, p_coord) = match tree.tree_id() % 4 {
            1 => (1, 0, 2),
            2 => (0, 1, 2),
            _ => (2, 0, 1),
        };

        let quarter_pi = T::from(std::f64::consts::FRAC_PI_4).unwrap();
        for (r, out) in izip!(
            ref_coords.chunks_exact(3),
            physical_coords.chunks_exact_mut(3)
        ) {
            let r_ref = r[r_coord];

            // Tangent correction of the angular coordinates rectifies the
            // compression near the slab corners.
            let mut corrected = [T::zero(); 3];
            corrected[r_coord] = r_ref;
            corrected[t_coord] = (quarter_pi * r[t_coord]).tan();
            corrected[p_coord] = (quarter_pi * r[p_coord]).tan();

            let mut s = linear_interpolation(&corrected, corners, 3);
            normalize(&mut s);
            let p = linear_interpolation(r, corners, 3);

            // Radius of the line through `s` hitting the plane through `p`
            // with normal `n`.
            let out_radius = dot(&p, &n) * inv_denominator;

            // Blend from the flat interpolation at the inner face to the
            // spherical boundary at the outer face.
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
