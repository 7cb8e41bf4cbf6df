//! Linear geometries
//!
//! The two uncorrected mappings: [`Linear`] interpolates the full corner set
//! of the tree's topology class, [`LinearAxisAligned`] interpolates between
//! the two extreme corners of an axis-aligned box. The linear geometry is the
//! only variant with an implemented jacobian; the axis-aligned geometry is
//! the only variant with a containment test.

use crate::interpolation::{compute_axis_aligned_geometry, compute_linear_geometry};
use crate::reference_cell::{self, ReferenceCellType};
use crate::traits::{ElementCorners, Geometry, GeometryError, Result, TreeContext};
use crate::types::RealScalar;
use crate::vector::{axpy, axy, diff};
use itertools::izip;

/// Flat interpolation of the tree's corner control points.
#[derive(Debug, Clone)]
pub struct Linear {
    dimension: usize,
    name: String,
}

impl Linear {
    /// Create a linear geometry for trees of the given reference dimension.
    pub fn new(dimension: usize) -> Self {
        assert!(dimension <= 3);
        Self {
            dimension,
            name: format!("linear_{}", dimension),
        }
    }

    fn check_tree<T: RealScalar>(&self, tree: &TreeContext<'_, T>) {
        assert_eq!(reference_cell::dim(tree.cell_type()), self.dimension);
        assert_eq!(
            tree.corner_count(),
            reference_cell::corner_count(tree.cell_type())
        );
    }
}

impl<T: RealScalar> Geometry<T> for Linear {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn evaluate(&self, tree: &TreeContext<'_, T>, ref_coords: &[T], physical_coords: &mut [T]) {
        self.check_tree(tree);
        assert_eq!(physical_coords.len() % 3, 0);
        if self.dimension == 0 {
            for out in physical_coords.chunks_exact_mut(3) {
                out.copy_from_slice(&tree.corner(0));
            }
            return;
        }
        assert_eq!(ref_coords.len() % self.dimension, 0);
        assert_eq!(
            physical_coords.len() / 3,
            ref_coords.len() / self.dimension
        );
        for (r, out) in izip!(
            ref_coords.chunks_exact(self.dimension),
            physical_coords.chunks_exact_mut(3)
        ) {
            let p = compute_linear_geometry(tree.cell_type(), tree.corner_coords(), r);
            out.copy_from_slice(&p);
        }
    }

    fn evaluate_jacobian(
        &self,
        tree: &TreeContext<'_, T>,
        ref_coords: &[T],
        jacobians: &mut [T],
    ) -> Result<()> {
        self.check_tree(tree);
        if self.dimension == 0 {
            assert!(jacobians.is_empty());
            return Ok(());
        }
        assert_eq!(ref_coords.len() % self.dimension, 0);
        assert_eq!(
            jacobians.len(),
            3 * ref_coords.len()
        );
        let corners = tree.corner_coords();
        let o = T::one();
        for (r, jac) in izip!(
            ref_coords.chunks_exact(self.dimension),
            jacobians.chunks_exact_mut(3 * self.dimension)
        ) {
            match tree.cell_type() {
                ReferenceCellType::Interval => {
                    jac[..3].copy_from_slice(&corner_diff(corners, 1, 0));
                }
                ReferenceCellType::Triangle => {
                    jac[..3].copy_from_slice(&corner_diff(corners, 1, 0));
                    jac[3..6].copy_from_slice(&corner_diff(corners, 2, 1));
                }
                ReferenceCellType::Tetrahedron => {
                    jac[..3].copy_from_slice(&corner_diff(corners, 1, 0));
                    jac[3..6].copy_from_slice(&corner_diff(corners, 3, 2));
                    jac[6..9].copy_from_slice(&corner_diff(corners, 2, 1));
                }
                ReferenceCellType::Quadrilateral => {
                    let (x, y) = (r[0], r[1]);
                    let mut d_x = axy(&corner_diff(corners, 1, 0), o - y);
                    axpy(&corner_diff(corners, 3, 2), &mut d_x, y);
                    let mut d_y = axy(&corner_diff(corners, 2, 0), o - x);
                    axpy(&corner_diff(corners, 3, 1), &mut d_y, x);
                    jac[..3].copy_from_slice(&d_x);
                    jac[3..6].copy_from_slice(&d_y);
                }
                ReferenceCellType::Hexahedron => {
                    let (x, y, z) = (r[0], r[1], r[2]);
                    let mut d_x = axy(&corner_diff(corners, 1, 0), (o - y) * (o - z));
                    axpy(&corner_diff(corners, 3, 2), &mut d_x, y * (o - z));
                    axpy(&corner_diff(corners, 5, 4), &mut d_x, (o - y) * z);
                    axpy(&corner_diff(corners, 7, 6), &mut d_x, y * z);
                    let mut d_y = axy(&corner_diff(corners, 2, 0), (o - x) * (o - z));
                    axpy(&corner_diff(corners, 3, 1), &mut d_y, x * (o - z));
                    axpy(&corner_diff(corners, 6, 4), &mut d_y, (o - x) * z);
                    axpy(&corner_diff(corners, 7, 5), &mut d_y, x * z);
                    let mut d_z = axy(&corner_diff(corners, 4, 0), (o - x) * (o - y));
                    axpy(&corner_diff(corners, 5, 1), &mut d_z, x * (o - y));
                    axpy(&corner_diff(corners, 6, 2), &mut d_z, (o - x) * y);
                    axpy(&corner_diff(corners, 7, 3), &mut d_z, x * y);
                    jac[..3].copy_from_slice(&d_x);
                    jac[3..6].copy_from_slice(&d_y);
                    jac[6..9].copy_from_slice(&d_z);
                }
                ReferenceCellType::Prism => {
                    let (x, y, z) = (r[0], r[1], r[2]);
                    let bottom_x = corner_diff(corners, 1, 0);
                    let top_x = corner_diff(corners, 4, 3);
                    let bottom_y = corner_diff(corners, 2, 1);
                    let top_y = corner_diff(corners, 5, 4);
                    let mut d_x = axy(&bottom_x, o - z);
                    axpy(&top_x, &mut d_x, z);
                    let mut d_y = axy(&bottom_y, o - z);
                    axpy(&top_y, &mut d_y, z);
                    let mut d_z = corner_diff(corners, 3, 0);
                    axpy(&diff(&top_x, &bottom_x), &mut d_z, x);
                    axpy(&diff(&top_y, &bottom_y), &mut d_z, y);
                    jac[..3].copy_from_slice(&d_x);
                    jac[3..6].copy_from_slice(&d_y);
                    jac[6..9].copy_from_slice(&d_z);
                }
                ReferenceCellType::Point | ReferenceCellType::Pyramid => {
                    panic!("Unsupported cell type");
                }
            }
        }
        Ok(())
    }
}

/// Flat interpolation between the two extreme corners of an axis-aligned
/// box.
#[derive(Debug, Clone)]
pub struct LinearAxisAligned {
    dimension: usize,
    name: String,
}

impl LinearAxisAligned {
    /// Create an axis-aligned linear geometry for trees of the given
    /// reference dimension.
    pub fn new(dimension: usize) -> Self {
        assert!(dimension <= 3);
        Self {
            dimension,
            name: format!("linear_axis_aligned_{}", dimension),
        }
    }
}

impl<T: RealScalar> Geometry<T> for LinearAxisAligned {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn evaluate(&self, tree: &TreeContext<'_, T>, ref_coords: &[T], physical_coords: &mut [T]) {
        assert_eq!(physical_coords.len() % 3, 0);
        if self.dimension == 0 {
            for out in physical_coords.chunks_exact_mut(3) {
                out.copy_from_slice(&tree.corner(0));
            }
            return;
        }
        assert_eq!(reference_cell::dim(tree.cell_type()), self.dimension);
        // Axis-aligned trees store the two extreme corners only.
        assert_eq!(tree.corner_count(), 2);
        assert_eq!(ref_coords.len() % self.dimension, 0);
        assert_eq!(
            physical_coords.len() / 3,
            ref_coords.len() / self.dimension
        );
        for (r, out) in izip!(
            ref_coords.chunks_exact(self.dimension),
            physical_coords.chunks_exact_mut(3)
        ) {
            let p = compute_axis_aligned_geometry(tree.corner_coords(), self.dimension, r);
            out.copy_from_slice(&p);
        }
    }

    fn evaluate_jacobian(
        &self,
        _tree: &TreeContext<'_, T>,
        _ref_coords: &[T],
        _jacobians: &mut [T],
    ) -> Result<()> {
        Err(GeometryError::UnsupportedOperation {
            geometry: self.name.clone(),
            operation: "evaluate_jacobian",
        })
    }

    fn point_batch_inside_element(
        &self,
        element: &dyn ElementCorners<T>,
        points: &[T],
        tolerance: T,
        is_inside: &mut [bool],
    ) -> Result<()> {
        assert_eq!(points.len() % 3, 0);
        assert_eq!(is_inside.len(), points.len() / 3);
        assert!(element.corner_count() >= 2);
        let v_min = element.corner(0);
        let v_max = element.corner(1);
        for (p, inside) in izip!(points.chunks_exact(3), is_inside.iter_mut()) {
            *inside = (0..3).all(|d| {
                v_min[d] - tolerance <= p[d] && p[d] <= v_max[d] + tolerance
            });
        }
        Ok(())
    }
}

fn corner_diff<T: RealScalar>(corner_coords: &[T], i: usize, j: usize) -> [T; 3] {
    diff(
        &[
            corner_coords[3 * i],
            corner_coords[3 * i + 1],
            corner_coords[3 * i + 2],
        ],
        &[
            corner_coords[3 * j],
            corner_coords[3 * j + 1],
            corner_coords[3 * j + 2],
        ],
    )
}
