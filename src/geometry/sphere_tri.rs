//! Triangulated spheres
//!
//! Mappings for spherical surfaces built from triangles and spherical
//! shells built from prisms, both with tree corners sitting on the sphere.
//! The lateral mapping averages three corner-anchored tangent
//! rectifications, which keeps the mesh watertight across tree boundaries
//! while distributing points evenly in the element interiors.

use crate::interpolation::compute_linear_geometry;
use crate::reference_cell::ReferenceCellType;
use crate::traits::{Geometry, GeometryError, Result, TreeContext};
use crate::types::RealScalar;
use crate::vector::{axpy, diff, dot, norm, normalize, rescale, tri_normal};
use itertools::izip;

/// Tangent stretching of a coordinate in `[0, 1]`, fixing the endpoints.
fn tangent_stretch<T: RealScalar>(t: T) -> T {
    let half = T::from(0.5).unwrap();
    (T::from(std::f64::consts::FRAC_PI_2).unwrap() * (t - half)).tan() * half + half
}

/// Map a point of the reference triangle onto the sphere through the
/// tree's corners. Each corner anchors one stretched rectification of the
/// triangle; averaging the three keeps the result independent of the
/// corner numbering and exact along the triangle edges.
fn map_triangle_to_sphere<T: RealScalar>(
    tree: &TreeContext<'_, T>,
    x: T,
    y: T,
    radius: T,
) -> [T; 3] {
    let third = T::one() / T::from(3.0).unwrap();
    let mut out = [T::zero(); 3];
    for shift in 0..3 {
        let u = tree.corner((3 - shift) % 3);
        let v = diff(&tree.corner((4 - shift) % 3), &u);
        let w = diff(&tree.corner((5 - shift) % 3), &u);
        let (vv, ww) = match shift {
            0 => (x - y, y),
            1 => (T::one() - x, x - y),
            _ => (y, T::one() - x),
        };
        let mut pos = u;
        axpy(&v, &mut pos, tangent_stretch(vv));
        axpy(&w, &mut pos, tangent_stretch(ww));
        rescale(&mut pos, radius);
        axpy(&pos, &mut out, third);
    }
    out
}

/// Spherical surface mapping over triangular trees.
#[derive(Debug, Clone, Default)]
pub struct TriangulatedSphericalSurface;

impl TriangulatedSphericalSurface {
    /// Create a triangulated spherical surface geometry.
    pub fn new() -> Self {
        Self
    }
}

impl<T: RealScalar> Geometry<T> for TriangulatedSphericalSurface {
    fn name(&self) -> &str {
        "triangulated_spherical_surface"
    }

    fn dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, tree: &TreeContext<'_, T>, ref_coords: &[T], physical_coords: &mut [T]) {
        assert_eq!(tree.cell_type(), ReferenceCellType::Triangle);
        assert_eq!(tree.corner_count(), 3);
        assert_eq!(ref_coords.len() % 2, 0);
        assert_eq!(physical_coords.len(), 3 * (ref_coords.len() / 2));

        let radius = norm(&tree.corner(0));
        for (r, out) in izip!(
            ref_coords.chunks_exact(2),
            physical_coords.chunks_exact_mut(3)
        ) {
            out.copy_from_slice(&map_triangle_to_sphere(tree, r[0], r[1], radius));
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

/// Spherical shell mapping over prism trees with the bottom triangle on
/// the inner sphere and the top triangle on the outer sphere.
#[derive(Debug, Clone, Default)]
pub struct PrismedSphericalShell;

impl PrismedSphericalShell {
    /// Create a prismed spherical shell geometry.
    pub fn new() -> Self {
        Self
    }
}

impl<T: RealScalar> Geometry<T> for PrismedSphericalShell {
    fn name(&self) -> &str {
        "prismed_spherical_shell"
    }

    fn dimension(&self) -> usize {
        3
    }

    fn evaluate(&self, tree: &TreeContext<'_, T>, ref_coords: &[T], physical_coords: &mut [T]) {
        assert_eq!(tree.cell_type(), ReferenceCellType::Prism);
        assert_eq!(tree.corner_count(), 6);
        assert_eq!(ref_coords.len() % 3, 0);
        assert_eq!(physical_coords.len(), ref_coords.len());

        let inner_radius = norm(&tree.corner(0));

        // Normal of the bottom triangle and radial direction through its
        // first corner fix the radial blend of the shell.
        let mut n = tri_normal(&tree.corner(0), &tree.corner(1), &tree.corner(2));
        normalize(&mut n);
        let mut radial = tree.corner(0);
        normalize(&mut radial);
        let inv_denominator = T::one() / dot(&radial, &n);

        for (r, out) in izip!(
            ref_coords.chunks_exact(3),
            physical_coords.chunks_exact_mut(3)
        ) {
            let mut pos = map_triangle_to_sphere(tree, r[0], r[1], inner_radius);

            // Radius of the line through `pos` hitting the plane of the
            // flat prism interpolation.
            let p = compute_linear_geometry(ReferenceCellType::Prism, tree.corner_coords(), r);
            let out_radius = dot(&p, &n) * inv_denominator;
            rescale(&mut pos, out_radius);
            out.copy_from_slice(&pos);
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::shapes;
    use approx::assert_relative_eq;

    fn evaluate_at<G: Geometry<f64>>(
        geometry: &G,
        trees: &[shapes::Tree<f64>],
        tree_id: usize,
        r: &[f64],
    ) -> [f64; 3] {
        let tree = TreeContext::new(tree_id, trees[tree_id].cell_type, &trees[tree_id].corner_coords);
        let mut out = vec![0.0; 3];
        geometry.evaluate(&tree, r, &mut out);
        [out[0], out[1], out[2]]
    }

    #[test]
    fn test_surface_corners_preserved() {
        let geometry = TriangulatedSphericalSurface::new();
        let trees = shapes::triangulated_spherical_surface(1.5);
        for tree_id in 0..trees.len() {
            let corners = &trees[tree_id].corner_coords;
            for (i, r) in [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]].iter().enumerate() {
                let p = evaluate_at(&geometry, &trees, tree_id, r);
                for d in 0..3 {
                    assert_relative_eq!(p[d], corners[3 * i + d], epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_surface_edges_on_sphere() {
        let radius = 1.5;
        let geometry = TriangulatedSphericalSurface::new();
        let trees = shapes::triangulated_spherical_surface(radius);
        for tree_id in 0..trees.len() {
            for i in 0..=8 {
                let t = i as f64 / 8.0;
                for r in [[t, 0.0], [1.0, t], [t, t]] {
                    let p = evaluate_at(&geometry, &trees, tree_id, &r);
                    assert_relative_eq!(norm(&p), radius, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_surface_interior_dips_inward() {
        // The interior averages three distinct points of the sphere and so
        // stays strictly inside it, but not by much.
        let radius = 2.0;
        let geometry = TriangulatedSphericalSurface::new();
        let trees = shapes::triangulated_spherical_surface(radius);
        let p = evaluate_at(&geometry, &trees, 0, &[2.0 / 3.0, 1.0 / 3.0]);
        assert!(norm(&p) < radius);
        assert!(norm(&p) > 0.95 * radius);
    }

    #[test]
    fn test_shell_corners_preserved() {
        let geometry = PrismedSphericalShell::new();
        let trees = shapes::prismed_spherical_shell(1.0, 2.0);
        let ref_corners = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
        ];
        for tree_id in 0..trees.len() {
            let corners = &trees[tree_id].corner_coords;
            for (i, r) in ref_corners.iter().enumerate() {
                let p = evaluate_at(&geometry, &trees, tree_id, r);
                for d in 0..3 {
                    assert_relative_eq!(p[d], corners[3 * i + d], epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_shell_radius_band() {
        // The radial blend is linear between the spheres at every lateral
        // position.
        let geometry = PrismedSphericalShell::new();
        let trees = shapes::prismed_spherical_shell(1.0, 2.0);
        for tree_id in 0..trees.len() {
            for i in 0..=4 {
                for j in 0..=i {
                    for k in 0..=4 {
                        let x = i as f64 / 4.0;
                        let y = j as f64 / 4.0;
                        let z = k as f64 / 4.0;
                        let p = evaluate_at(&geometry, &trees, tree_id, &[x, y, z]);
                        assert_relative_eq!(norm(&p), 1.0 + z, epsilon = 1e-12);
                    }
                }
            }
        }
    }

    #[test]
    fn test_corner_robustness() {
        let geometry = TriangulatedSphericalSurface::new();
        let trees = shapes::triangulated_spherical_surface(1.0);
        for tree_id in 0..trees.len() {
            let p = evaluate_at(&geometry, &trees, tree_id, &[0.999999, 0.999999]);
            for d in 0..3 {
                assert!(p[d].is_finite());
            }
        }
    }
}
