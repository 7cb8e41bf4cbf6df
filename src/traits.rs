//! Trait definitions
//!
//! The contract between the forest layer and the geometry variants. The
//! active tree is passed into every call as a [`TreeContext`] argument, so a
//! geometry object carries no mutable state and can be shared across
//! threads.

use crate::reference_cell::ReferenceCellType;
use crate::types::RealScalar;

/// Errors produced by geometry operations.
#[derive(thiserror::Error, Debug)]
pub enum GeometryError {
    /// The geometry does not implement the requested operation.
    #[error("Operation `{operation}` is not implemented for geometry `{geometry}`")]
    UnsupportedOperation {
        /// Name of the geometry the operation was requested on.
        geometry: String,
        /// Name of the unimplemented operation.
        operation: &'static str,
    },
    /// The geometry cannot be created with the requested reference dimension.
    #[error("Geometry `{geometry}` does not support dimension {dimension}")]
    InvalidDimension {
        /// Name of the geometry kind.
        geometry: &'static str,
        /// The rejected dimension.
        dimension: usize,
    },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// The transient binding of the coarse-mesh tree a batch of evaluations
/// operates on: its global index, its topology class and its corner control
/// points in physical space.
#[derive(Debug, Clone, Copy)]
pub struct TreeContext<'a, T: RealScalar> {
    tree_id: usize,
    cell_type: ReferenceCellType,
    corner_coords: &'a [T],
}

impl<'a, T: RealScalar> TreeContext<'a, T> {
    /// Bind a tree. `corner_coords` holds 3 coordinates per corner; the
    /// required corner count depends on the geometry the context is handed
    /// to, not only on the topology class.
    pub fn new(tree_id: usize, cell_type: ReferenceCellType, corner_coords: &'a [T]) -> Self {
        assert_eq!(corner_coords.len() % 3, 0);
        Self {
            tree_id,
            cell_type,
            corner_coords,
        }
    }

    /// Global index of the tree in the coarse mesh.
    pub fn tree_id(&self) -> usize {
        self.tree_id
    }

    /// Topology class of the tree.
    pub fn cell_type(&self) -> ReferenceCellType {
        self.cell_type
    }

    /// The flat corner control point array.
    pub fn corner_coords(&self) -> &'a [T] {
        self.corner_coords
    }

    /// Number of stored corners.
    pub fn corner_count(&self) -> usize {
        self.corner_coords.len() / 3
    }

    /// Control point of the given corner.
    pub fn corner(&self, i: usize) -> [T; 3] {
        [
            self.corner_coords[3 * i],
            self.corner_coords[3 * i + 1],
            self.corner_coords[3 * i + 2],
        ]
    }
}

/// Corner coordinates of one forest element, as supplied by the owning
/// forest for containment tests.
pub trait ElementCorners<T: RealScalar> {
    /// Number of corners of the element.
    fn corner_count(&self) -> usize;
    /// Physical coordinates of the given corner.
    fn corner(&self, i: usize) -> [T; 3];
}

/// A borrowed flat corner array, 3 coordinates per corner.
pub struct CornerSlice<'a, T: RealScalar>(pub &'a [T]);

impl<T: RealScalar> ElementCorners<T> for CornerSlice<'_, T> {
    fn corner_count(&self) -> usize {
        self.0.len() / 3
    }

    fn corner(&self, i: usize) -> [T; 3] {
        [self.0[3 * i], self.0[3 * i + 1], self.0[3 * i + 2]]
    }
}

/// A reference-to-physical mapping for coarse-mesh trees.
pub trait Geometry<T: RealScalar> {
    /// The name of the geometry.
    fn name(&self) -> &str;

    /// The reference dimension of the geometry.
    fn dimension(&self) -> usize;

    /// Map a batch of reference points of the bound tree to physical space.
    ///
    /// `ref_coords` holds `dimension` coordinates per point in `[0, 1]`,
    /// `physical_coords` 3 coordinates per point. Point order is preserved.
    fn evaluate(&self, tree: &TreeContext<'_, T>, ref_coords: &[T], physical_coords: &mut [T]);

    /// Evaluate the jacobian of the mapping for a batch of reference points.
    ///
    /// For each point, `jacobians` receives `dimension` columns of length 3,
    /// the derivatives of the physical point with respect to each reference
    /// coordinate, stored consecutively.
    fn evaluate_jacobian(
        &self,
        tree: &TreeContext<'_, T>,
        ref_coords: &[T],
        jacobians: &mut [T],
    ) -> Result<()>;

    /// Decide for a batch of physical points whether they lie inside an
    /// element, within a symmetric tolerance. Optional capability; the
    /// default reports the operation as unsupported.
    fn point_batch_inside_element(
        &self,
        element: &dyn ElementCorners<T>,
        points: &[T],
        tolerance: T,
        is_inside: &mut [bool],
    ) -> Result<()> {
        let _ = (element, points, tolerance, is_inside);
        Err(GeometryError::UnsupportedOperation {
            geometry: self.name().to_string(),
            operation: "point_batch_inside_element",
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Flat;

    impl Geometry<f64> for Flat {
        fn name(&self) -> &str {
            "flat"
        }

        fn dimension(&self) -> usize {
            2
        }

        fn evaluate(&self, _tree: &TreeContext<'_, f64>, _r: &[f64], _p: &mut [f64]) {}

        fn evaluate_jacobian(
            &self,
            _tree: &TreeContext<'_, f64>,
            _r: &[f64],
            _j: &mut [f64],
        ) -> Result<()> {
            Err(GeometryError::UnsupportedOperation {
                geometry: self.name().to_string(),
                operation: "evaluate_jacobian",
            })
        }
    }

    #[test]
    fn test_context_corners() {
        let coords = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let tree = TreeContext::new(7, ReferenceCellType::Interval, &coords);
        assert_eq!(tree.tree_id(), 7);
        assert_eq!(tree.corner_count(), 2);
        assert_eq!(tree.corner(1), [3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_default_containment_is_unsupported() {
        let geometry = Flat;
        let corners = vec![0.0; 6];
        let mut inside = vec![false; 1];
        let result = geometry.point_batch_inside_element(
            &CornerSlice(&corners),
            &[0.0, 0.0, 0.0],
            1e-10,
            &mut inside,
        );
        match result {
            Err(GeometryError::UnsupportedOperation { operation, .. }) => {
                assert_eq!(operation, "point_batch_inside_element");
            }
            _ => panic!("expected unsupported operation"),
        }
    }

    #[test]
    fn test_error_messages() {
        let e = GeometryError::UnsupportedOperation {
            geometry: "quadrangulated_disk".to_string(),
            operation: "evaluate_jacobian",
        };
        assert_eq!(
            format!("{e}"),
            "Operation `evaluate_jacobian` is not implemented for geometry `quadrangulated_disk`"
        );
    }
}
