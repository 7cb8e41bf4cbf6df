//! Reference cell topology
//!
//! Topology classes of coarse-mesh trees and their reference-domain corner
//! tables. Quadrilaterals and hexahedra are corner-ordered in z-order;
//! triangles and tetrahedra follow the edge-chain simplex ordering the
//! interpolation formulas assume; prisms are a triangle crossed with an
//! interval.

use crate::types::RealScalar;

/// The topology class of a coarse-mesh tree.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum ReferenceCellType {
    /// A point
    Point = 0,
    /// A line interval
    Interval = 1,
    /// A triangle
    Triangle = 2,
    /// A quadrilateral
    Quadrilateral = 3,
    /// A tetrahedron
    Tetrahedron = 4,
    /// A hexahedron
    Hexahedron = 5,
    /// A triangular prism
    Prism = 6,
    /// A square-based pyramid
    Pyramid = 7,
}

impl ReferenceCellType {
    /// Create a cell type from its u8 tag.
    pub fn from(i: u8) -> Option<ReferenceCellType> {
        match i {
            0 => Some(ReferenceCellType::Point),
            1 => Some(ReferenceCellType::Interval),
            2 => Some(ReferenceCellType::Triangle),
            3 => Some(ReferenceCellType::Quadrilateral),
            4 => Some(ReferenceCellType::Tetrahedron),
            5 => Some(ReferenceCellType::Hexahedron),
            6 => Some(ReferenceCellType::Prism),
            7 => Some(ReferenceCellType::Pyramid),
            _ => None,
        }
    }
}

/// The topological dimension of the cell.
pub fn dim(cell: ReferenceCellType) -> usize {
    match cell {
        ReferenceCellType::Point => 0,
        ReferenceCellType::Interval => 1,
        ReferenceCellType::Triangle => 2,
        ReferenceCellType::Quadrilateral => 2,
        ReferenceCellType::Tetrahedron => 3,
        ReferenceCellType::Hexahedron => 3,
        ReferenceCellType::Prism => 3,
        ReferenceCellType::Pyramid => 3,
    }
}

/// The number of corners of the cell.
pub fn corner_count(cell: ReferenceCellType) -> usize {
    match cell {
        ReferenceCellType::Point => 1,
        ReferenceCellType::Interval => 2,
        ReferenceCellType::Triangle => 3,
        ReferenceCellType::Quadrilateral => 4,
        ReferenceCellType::Tetrahedron => 4,
        ReferenceCellType::Hexahedron => 8,
        ReferenceCellType::Prism => 6,
        ReferenceCellType::Pyramid => 5,
    }
}

/// The reference corners of the cell, flattened with `dim` coordinates per
/// corner.
pub fn corners<T: RealScalar>(cell: ReferenceCellType) -> Vec<T> {
    let z = T::zero();
    let o = T::one();
    match cell {
        ReferenceCellType::Point => vec![],
        ReferenceCellType::Interval => vec![z, o],
        ReferenceCellType::Triangle => vec![z, z, o, z, o, o],
        ReferenceCellType::Quadrilateral => vec![z, z, o, z, z, o, o, o],
        ReferenceCellType::Tetrahedron => vec![z, z, z, o, z, z, o, z, o, o, o, o],
        ReferenceCellType::Hexahedron => vec![
            z, z, z, o, z, z, z, o, z, o, o, z, z, z, o, o, z, o, z, o, o, o, o, o,
        ],
        ReferenceCellType::Prism => vec![
            z, z, z, o, z, z, o, o, z, z, z, o, o, z, o, o, o, o,
        ],
        ReferenceCellType::Pyramid => vec![
            z, z, z, o, z, z, z, o, z, o, o, z, o, o, o,
        ],
    }
}
