//! Treegeom
//!
//! Analytic geometry mappings from the reference domains of coarse-mesh trees
//! to physical space.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod bindings;
pub mod geometry;
pub mod interpolation;
pub mod reference_cell;
pub mod shapes;
pub mod traits;
pub mod types;
pub mod vector;
