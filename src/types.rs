//! Types specific to treegeom

/// Scalar types that the geometry mappings are generic over.
pub trait RealScalar: num::Float + std::fmt::Debug + Send + Sync {}

impl<T: num::Float + std::fmt::Debug + Send + Sync> RealScalar for T {}
