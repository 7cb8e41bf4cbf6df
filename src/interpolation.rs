//! Flat interpolation
//!
//! The uncorrected reference-to-physical blends: every curvilinear mapping
//! first interpolates the tree's corner control points linearly and then
//! applies its own correction on top.

use crate::reference_cell::ReferenceCellType;
use crate::types::RealScalar;
use crate::vector::{axpy, axy};

fn corner<T: RealScalar>(corner_coords: &[T], i: usize) -> [T; 3] {
    [
        corner_coords[3 * i],
        corner_coords[3 * i + 1],
        corner_coords[3 * i + 2],
    ]
}

/// Multilinear interpolation of `2^dim` corner control points at a reference
/// point with `dim` coordinates. Corners are z-ordered, control points carry
/// 3 coordinates each.
pub fn linear_interpolation<T: RealScalar>(
    ref_point: &[T],
    corner_coords: &[T],
    dim: usize,
) -> [T; 3] {
    let o = T::one();
    match dim {
        1 => {
            let x = ref_point[0];
            let mut out = axy(&corner(corner_coords, 0), o - x);
            axpy(&corner(corner_coords, 1), &mut out, x);
            out
        }
        2 => {
            let (x, y) = (ref_point[0], ref_point[1]);
            let mut out = axy(&corner(corner_coords, 0), (o - x) * (o - y));
            axpy(&corner(corner_coords, 1), &mut out, x * (o - y));
            axpy(&corner(corner_coords, 2), &mut out, (o - x) * y);
            axpy(&corner(corner_coords, 3), &mut out, x * y);
            out
        }
        3 => {
            let (x, y, z) = (ref_point[0], ref_point[1], ref_point[2]);
            let mut out = axy(&corner(corner_coords, 0), (o - x) * (o - y) * (o - z));
            axpy(&corner(corner_coords, 1), &mut out, x * (o - y) * (o - z));
            axpy(&corner(corner_coords, 2), &mut out, (o - x) * y * (o - z));
            axpy(&corner(corner_coords, 3), &mut out, x * y * (o - z));
            axpy(&corner(corner_coords, 4), &mut out, (o - x) * (o - y) * z);
            axpy(&corner(corner_coords, 5), &mut out, x * (o - y) * z);
            axpy(&corner(corner_coords, 6), &mut out, (o - x) * y * z);
            axpy(&corner(corner_coords, 7), &mut out, x * y * z);
            out
        }
        _ => {
            panic!("Unsupported interpolation dimension");
        }
    }
}

/// Flat mapping of a reference point to physical space for the given
/// topology class. Simplex classes use the edge-chain blend, tensor classes
/// the multilinear blend, prisms a triangle blend between the two lerped
/// corner triangles.
pub fn compute_linear_geometry<T: RealScalar>(
    cell: ReferenceCellType,
    corner_coords: &[T],
    ref_point: &[T],
) -> [T; 3] {
    match cell {
        ReferenceCellType::Point => corner(corner_coords, 0),
        ReferenceCellType::Interval => linear_interpolation(ref_point, corner_coords, 1),
        ReferenceCellType::Triangle => {
            triangle_geometry(ref_point[0], ref_point[1], corner_coords, 0)
        }
        ReferenceCellType::Tetrahedron => {
            let (x, y, z) = (ref_point[0], ref_point[1], ref_point[2]);
            let mut out = corner(corner_coords, 0);
            axpy(&diff3(corner_coords, 1, 0), &mut out, x);
            axpy(&diff3(corner_coords, 3, 2), &mut out, y);
            axpy(&diff3(corner_coords, 2, 1), &mut out, z);
            out
        }
        ReferenceCellType::Quadrilateral => linear_interpolation(ref_point, corner_coords, 2),
        ReferenceCellType::Hexahedron => linear_interpolation(ref_point, corner_coords, 3),
        ReferenceCellType::Prism => {
            let z = ref_point[2];
            let o = T::one();
            let mut tri = [T::zero(); 9];
            for (i, t) in tri.iter_mut().enumerate() {
                *t = (o - z) * corner_coords[i] + z * corner_coords[i + 9];
            }
            triangle_geometry(ref_point[0], ref_point[1], &tri, 0)
        }
        ReferenceCellType::Pyramid => {
            panic!("Unsupported cell type");
        }
    }
}

/// Flat mapping for an axis-aligned tree described by its two extreme
/// corners. Axes beyond `dim` copy the first corner's coordinate.
pub fn compute_axis_aligned_geometry<T: RealScalar>(
    corner_coords: &[T],
    dim: usize,
    ref_point: &[T],
) -> [T; 3] {
    debug_assert!(dim <= 3);
    let v_min = corner(corner_coords, 0);
    let v_max = corner(corner_coords, 1);
    let mut out = v_min;
    for axis in 0..dim {
        out[axis] = out[axis] + ref_point[axis] * (v_max[axis] - v_min[axis]);
    }
    out
}

/// Triangle blend along the edge chain, `corner_coords` holding the corners
/// starting at `first_corner`.
fn triangle_geometry<T: RealScalar>(
    x: T,
    y: T,
    corner_coords: &[T],
    first_corner: usize,
) -> [T; 3] {
    let mut out = corner(corner_coords, first_corner);
    axpy(
        &diff3(corner_coords, first_corner + 1, first_corner),
        &mut out,
        x,
    );
    axpy(
        &diff3(corner_coords, first_corner + 2, first_corner + 1),
        &mut out,
        y,
    );
    out
}

fn diff3<T: RealScalar>(corner_coords: &[T], i: usize, j: usize) -> [T; 3] {
    crate::vector::diff(&corner(corner_coords, i), &corner(corner_coords, j))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reference_cell;
    use approx::assert_relative_eq;
    use paste::paste;

    /// Embed each reference corner of a cell into physical space with a
    /// shear so corner identities are non-trivial.
    fn sheared_corners(cell: ReferenceCellType) -> Vec<f64> {
        let dim = reference_cell::dim(cell);
        let mut out = vec![];
        for c in reference_cell::corners::<f64>(cell).chunks_exact(dim.max(1)) {
            let p = [
                c.first().copied().unwrap_or(0.0),
                if dim > 1 { c[1] } else { 0.0 },
                if dim > 2 { c[2] } else { 0.0 },
            ];
            out.push(2.0 * p[0] + 0.25 * p[1]);
            out.push(1.5 * p[1] - 0.125 * p[2]);
            out.push(p[2] + 0.5 * p[0] + 3.0);
        }
        out
    }

    macro_rules! test_cell_corners {
        ($($cell:ident),+) => {
            $(
                paste! {
                    #[test]
                    fn [<test_linear_geometry_corners_ $cell:lower>]() {
                        //! Corners of the reference cell map to the stored
                        //! control points.
                        let cell = ReferenceCellType::$cell;
                        let dim = reference_cell::dim(cell);
                        let corners = sheared_corners(cell);
                        let ref_corners = reference_cell::corners::<f64>(cell);
                        for (i, r) in ref_corners.chunks_exact(dim).enumerate() {
                            let p = compute_linear_geometry(cell, &corners, r);
                            for d in 0..3 {
                                assert_relative_eq!(p[d], corners[3 * i + d], epsilon = 1e-12);
                            }
                        }
                    }
                }
            )*
        };
    }

    test_cell_corners!(Interval, Triangle, Quadrilateral, Tetrahedron, Hexahedron, Prism);

    #[test]
    fn test_bilinear_midpoint() {
        let corners = sheared_corners(ReferenceCellType::Quadrilateral);
        let p = linear_interpolation(&[0.5, 0.5], &corners, 2);
        for d in 0..3 {
            let mean = (corners[d] + corners[3 + d] + corners[6 + d] + corners[9 + d]) / 4.0;
            assert_relative_eq!(p[d], mean, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_trilinear_center() {
        let corners = sheared_corners(ReferenceCellType::Hexahedron);
        let p = linear_interpolation(&[0.5, 0.5, 0.5], &corners, 3);
        for d in 0..3 {
            let mean = (0..8).map(|i| corners[3 * i + d]).sum::<f64>() / 8.0;
            assert_relative_eq!(p[d], mean, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_prism_is_lerped_triangle() {
        let corners = sheared_corners(ReferenceCellType::Prism);
        let bottom = compute_linear_geometry(ReferenceCellType::Prism, &corners, &[0.4, 0.2, 0.0]);
        let top = compute_linear_geometry(ReferenceCellType::Prism, &corners, &[0.4, 0.2, 1.0]);
        let mid = compute_linear_geometry(ReferenceCellType::Prism, &corners, &[0.4, 0.2, 0.5]);
        for d in 0..3 {
            assert_relative_eq!(mid[d], 0.5 * (bottom[d] + top[d]), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_axis_aligned_extremes() {
        let corners = vec![-1.0, 2.0, 0.5, 3.0, 4.0, 2.5];
        for dim in 1..4 {
            let at_min = compute_axis_aligned_geometry(&corners, dim, &[0.0, 0.0, 0.0][..dim]);
            let at_max = compute_axis_aligned_geometry(&corners, dim, &[1.0, 1.0, 1.0][..dim]);
            for d in 0..dim {
                assert_relative_eq!(at_min[d], corners[d], epsilon = 1e-12);
                assert_relative_eq!(at_max[d], corners[3 + d], epsilon = 1e-12);
            }
            for d in dim..3 {
                assert_relative_eq!(at_min[d], corners[d], epsilon = 1e-12);
                assert_relative_eq!(at_max[d], corners[d], epsilon = 1e-12);
            }
        }
    }
}
