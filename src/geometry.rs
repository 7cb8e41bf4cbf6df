//! Geometry implementations
//!
//! The concrete mappings from tree reference domains to physical space,
//! a tag enum naming them and a factory assembling them by tag.

pub mod cubed_sphere;
pub mod disk;
pub mod linear;
pub mod sphere_quad;
pub mod sphere_tri;

pub use cubed_sphere::CubedSphere;
pub use disk::QuadrangulatedDisk;
pub use linear::{Linear, LinearAxisAligned};
pub use sphere_quad::{CubedSphericalShell, QuadrangulatedSphericalSurface};
pub use sphere_tri::{PrismedSphericalShell, TriangulatedSphericalSurface};

use crate::traits::{Geometry, GeometryError, Result, TreeContext};
use crate::types::RealScalar;

/// The available geometry mappings.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum GeometryKind {
    /// Flat interpolation of the tree corners.
    Linear = 0,
    /// Flat interpolation of an axis-aligned tree given by two corners.
    LinearAxisAligned = 1,
    /// Disk built from quadrilaterals.
    QuadrangulatedDisk = 2,
    /// Spherical surface built from triangles.
    TriangulatedSphericalSurface = 3,
    /// Spherical shell built from prisms.
    PrismedSphericalShell = 4,
    /// Spherical surface built from quadrilaterals.
    QuadrangulatedSphericalSurface = 5,
    /// Spherical shell built from hexahedra.
    CubedSphericalShell = 6,
    /// Solid ball built from hexahedra.
    CubedSphere = 7,
}

impl GeometryKind {
    /// Decode a kind from its integer tag.
    pub fn from(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(GeometryKind::Linear),
            1 => Some(GeometryKind::LinearAxisAligned),
            2 => Some(GeometryKind::QuadrangulatedDisk),
            3 => Some(GeometryKind::TriangulatedSphericalSurface),
            4 => Some(GeometryKind::PrismedSphericalShell),
            5 => Some(GeometryKind::QuadrangulatedSphericalSurface),
            6 => Some(GeometryKind::CubedSphericalShell),
            7 => Some(GeometryKind::CubedSphere),
            _ => None,
        }
    }
}

/// A geometry mapping of any kind, dispatching to the concrete
/// implementations.
#[derive(Debug, Clone)]
pub enum TreeGeometry {
    /// Flat interpolation of the tree corners.
    Linear(Linear),
    /// Flat interpolation of an axis-aligned tree.
    LinearAxisAligned(LinearAxisAligned),
    /// Disk built from quadrilaterals.
    QuadrangulatedDisk(QuadrangulatedDisk),
    /// Spherical surface built from triangles.
    TriangulatedSphericalSurface(TriangulatedSphericalSurface),
    /// Spherical shell built from prisms.
    PrismedSphericalShell(PrismedSphericalShell),
    /// Spherical surface built from quadrilaterals.
    QuadrangulatedSphericalSurface(QuadrangulatedSphericalSurface),
    /// Spherical shell built from hexahedra.
    CubedSphericalShell(CubedSphericalShell),
    /// Solid ball built from hexahedra.
    CubedSphere(CubedSphere),
}

macro_rules! dispatch {
    ($self:ident, $inner:ident, $body:expr) => {
        match $self {
            TreeGeometry::Linear($inner) => $body,
            TreeGeometry::LinearAxisAligned($inner) => $body,
            TreeGeometry::QuadrangulatedDisk($inner) => $body,
            TreeGeometry::TriangulatedSphericalSurface($inner) => $body,
            TreeGeometry::PrismedSphericalShell($inner) => $body,
            TreeGeometry::QuadrangulatedSphericalSurface($inner) => $body,
            TreeGeometry::CubedSphericalShell($inner) => $body,
            TreeGeometry::CubedSphere($inner) => $body,
        }
    };
}

impl<T: RealScalar> Geometry<T> for TreeGeometry {
    fn name(&self) -> &str {
        dispatch!(self, g, Geometry::<T>::name(g))
    }

    fn dimension(&self) -> usize {
        dispatch!(self, g, Geometry::<T>::dimension(g))
    }

    fn evaluate(&self, tree: &TreeContext<'_, T>, ref_coords: &[T], physical_coords: &mut [T]) {
        dispatch!(self, g, g.evaluate(tree, ref_coords, physical_coords))
    }

    fn evaluate_jacobian(
        &self,
        tree: &TreeContext<'_, T>,
        ref_coords: &[T],
        jacobians: &mut [T],
    ) -> Result<()> {
        dispatch!(self, g, g.evaluate_jacobian(tree, ref_coords, jacobians))
    }

    fn point_batch_inside_element(
        &self,
        element: &dyn crate::traits::ElementCorners<T>,
        points: &[T],
        tolerance: T,
        is_inside: &mut [bool],
    ) -> Result<()> {
        dispatch!(
            self,
            g,
            g.point_batch_inside_element(element, points, tolerance, is_inside)
        )
    }
}

fn check_dimension(kind: GeometryKind, dimension: usize, expected: usize) -> Result<()> {
    if dimension != expected {
        return Err(GeometryError::InvalidDimension {
            geometry: match kind {
                GeometryKind::QuadrangulatedDisk => "quadrangulated_disk",
                GeometryKind::TriangulatedSphericalSurface => "triangulated_spherical_surface",
                GeometryKind::PrismedSphericalShell => "prismed_spherical_shell",
                GeometryKind::QuadrangulatedSphericalSurface => {
                    "quadrangulated_spherical_surface"
                }
                GeometryKind::CubedSphericalShell => "cubed_spherical_shell",
                GeometryKind::CubedSphere => "cubed_sphere",
                GeometryKind::Linear => "linear",
                GeometryKind::LinearAxisAligned => "linear_axis_aligned",
            },
            dimension,
        });
    }
    Ok(())
}

/// Create a geometry of the given kind for trees of the given reference
/// dimension. The flat kinds accept dimensions up to 3, the curved kinds
/// are fixed to the dimension of the shape they describe.
pub fn create(kind: GeometryKind, dimension: usize) -> Result<TreeGeometry> {
    let geometry = match kind {
        GeometryKind::Linear => {
            if dimension > 3 {
                return Err(GeometryError::InvalidDimension {
                    geometry: "linear",
                    dimension,
                });
            }
            TreeGeometry::Linear(Linear::new(dimension))
        }
        GeometryKind::LinearAxisAligned => {
            if dimension > 3 {
                return Err(GeometryError::InvalidDimension {
                    geometry: "linear_axis_aligned",
                    dimension,
                });
            }
            TreeGeometry::LinearAxisAligned(LinearAxisAligned::new(dimension))
        }
        GeometryKind::QuadrangulatedDisk => {
            check_dimension(kind, dimension, 2)?;
            TreeGeometry::QuadrangulatedDisk(QuadrangulatedDisk::new())
        }
        GeometryKind::TriangulatedSphericalSurface => {
            check_dimension(kind, dimension, 2)?;
            TreeGeometry::TriangulatedSphericalSurface(TriangulatedSphericalSurface::new())
        }
        GeometryKind::PrismedSphericalShell => {
            check_dimension(kind, dimension, 3)?;
            TreeGeometry::PrismedSphericalShell(PrismedSphericalShell::new())
        }
        GeometryKind::QuadrangulatedSphericalSurface => {
            check_dimension(kind, dimension, 2)?;
            TreeGeometry::QuadrangulatedSphericalSurface(QuadrangulatedSphericalSurface::new())
        }
        GeometryKind::CubedSphericalShell => {
            check_dimension(kind, dimension, 3)?;
            TreeGeometry::CubedSphericalShell(CubedSphericalShell::new())
        }
        GeometryKind::CubedSphere => {
            check_dimension(kind, dimension, 3)?;
            TreeGeometry::CubedSphere(CubedSphere::new())
        }
    };
    log::debug!(
        "Created geometry `{}` for dimension {}.",
        Geometry::<f64>::name(&geometry),
        dimension
    );
    Ok(geometry)
}
