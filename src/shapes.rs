//! Ready-made coarse meshes
//!
//! Constructors for the standard inputs of the curved mappings. Each
//! constructor returns the trees of a small coarse mesh whose corner layout
//! and tree ordering follow the conventions the matching mapping expects,
//! in particular the classification of trees by their index.

use itertools::iproduct;

use crate::reference_cell::ReferenceCellType;
use crate::types::RealScalar;

/// A coarse-mesh tree paired with its physical corner coordinates.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    /// Reference cell of the tree.
    pub cell_type: ReferenceCellType,
    /// Flattened corner coordinates, three entries per corner.
    pub corner_coords: Vec<T>,
}

// Corner sign patterns of the six cube faces. The corners are ordered so
// that the normal spanned by the first three corners of each face points
// radially outward.
const CUBE_FACE_SIGNS: [[[f64; 3]; 4]; 6] = [
    [
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [-1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
    ],
    [
        [-1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
    ],
    [
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
    ],
    [
        [-1.0, -1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, 1.0, 1.0],
    ],
    [
        [-1.0, 1.0, -1.0],
        [-1.0, 1.0, 1.0],
        [1.0, 1.0, -1.0],
        [1.0, 1.0, 1.0],
    ],
    [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
    ],
];

// Corner table of one octant of the cubed sphere in units of the inner and
// outer cube half-extents. Entry k selects the k-th half-extent from
// `[0, inner, outer]`. Tree order within the octant is the center hex
// followed by the slabs with radial reference axes 1, 0 and 2, matching the
// classification of tree indices mod 4.
const CUBED_SPHERE_MOTIF: [[[usize; 3]; 8]; 4] = [
    [
        [0, 0, 0],
        [1, 0, 0],
        [0, 1, 0],
        [1, 1, 0],
        [0, 0, 1],
        [1, 0, 1],
        [0, 1, 1],
        [1, 1, 1],
    ],
    [
        [0, 1, 0],
        [1, 1, 0],
        [0, 2, 0],
        [2, 2, 0],
        [0, 1, 1],
        [1, 1, 1],
        [0, 2, 2],
        [2, 2, 2],
    ],
    [
        [1, 0, 0],
        [2, 0, 0],
        [1, 1, 0],
        [2, 2, 0],
        [1, 0, 1],
        [2, 0, 2],
        [1, 1, 1],
        [2, 2, 2],
    ],
    [
        [0, 0, 1],
        [1, 0, 1],
        [0, 1, 1],
        [1, 1, 1],
        [0, 0, 2],
        [2, 0, 2],
        [0, 2, 2],
        [2, 2, 2],
    ],
];

fn rotate_quarter<T: RealScalar>(p: [T; 2], quarter: usize) -> [T; 2] {
    let [x, y] = p;
    match quarter % 4 {
        0 => [x, y],
        1 => [-y, x],
        2 => [-x, -y],
        _ => [y, -x],
    }
}

/// Disk of the given radius built from twelve quadrilaterals, three per
/// quarter. Each quarter holds a flat center square followed by the two
/// side quads whose tilted outer corner touches the boundary circle, so the
/// tree indices carry the classification mod 3 the disk mapping reads.
pub fn quadrangulated_disk<T: RealScalar>(radius: T) -> Vec<Tree<T>> {
    let zero = T::zero();
    let xo = radius / T::from(std::f64::consts::SQRT_2).unwrap();
    // The flat center block reaches out to half the disk radius.
    let xi = xo / (T::one() + T::one());
    let mid = [[zero, zero], [xi, zero], [zero, xi], [xi, xi]];
    let top = [[zero, xi], [xi, xi], [zero, xo], [xo, xo]];
    let bot = [[xi, zero], [xo, zero], [xi, xi], [xo, xo]];
    let mut trees = Vec::with_capacity(12);
    for quarter in 0..4 {
        for table in [&mid, &top, &bot] {
            let mut corner_coords = Vec::with_capacity(12);
            for p in table {
                let [x, y] = rotate_quarter(*p, quarter);
                corner_coords.extend_from_slice(&[x, y, zero]);
            }
            trees.push(Tree {
                cell_type: ReferenceCellType::Quadrilateral,
                corner_coords,
            });
        }
    }
    trees
}

/// Octahedral triangulation of the sphere of the given radius, one triangle
/// per octant with its corners on the coordinate axes.
pub fn triangulated_spherical_surface<T: RealScalar>(radius: T) -> Vec<Tree<T>> {
    let zero = T::zero();
    iproduct!([radius, -radius], [radius, -radius], [radius, -radius])
        .map(|(x, y, z)| Tree {
            cell_type: ReferenceCellType::Triangle,
            corner_coords: vec![x, zero, zero, zero, y, zero, zero, zero, z],
        })
        .collect()
}

/// Octahedral spherical shell between the two radii, one prism per octant.
/// The bottom triangle of each prism sits on the inner sphere, the top
/// triangle on the outer sphere.
pub fn prismed_spherical_shell<T: RealScalar>(
    inner_radius: T,
    outer_radius: T,
) -> Vec<Tree<T>> {
    let zero = T::zero();
    iproduct!(
        [T::one(), -T::one()],
        [T::one(), -T::one()],
        [T::one(), -T::one()]
    )
    .map(|(sx, sy, sz)| {
        let mut corner_coords = Vec::with_capacity(18);
        for r in [inner_radius, outer_radius] {
            corner_coords.extend_from_slice(&[
                sx * r,
                zero,
                zero,
                zero,
                sy * r,
                zero,
                zero,
                zero,
                sz * r,
            ]);
        }
        Tree {
            cell_type: ReferenceCellType::Prism,
            corner_coords,
        }
    })
    .collect()
}

/// Sphere of the given radius built from the six faces of the inscribed
/// cube, with outward-facing corner ordering.
pub fn quadrangulated_spherical_surface<T: RealScalar>(radius: T) -> Vec<Tree<T>> {
    let half = radius / T::from(3.0).unwrap().sqrt();
    CUBE_FACE_SIGNS
        .iter()
        .map(|face| Tree {
            cell_type: ReferenceCellType::Quadrilateral,
            corner_coords: face
                .iter()
                .flat_map(|c| c.iter().map(|&s| half * T::from(s).unwrap()))
                .collect(),
        })
        .collect()
}

/// Spherical shell between the two radii built from six hexahedra, one per
/// face of the inscribed cubes. Bottom corners sit on the inner sphere, top
/// corners on the outer sphere.
pub fn cubed_spherical_shell<T: RealScalar>(
    inner_radius: T,
    outer_radius: T,
) -> Vec<Tree<T>> {
    let sqrt3 = T::from(3.0).unwrap().sqrt();
    let halves = [inner_radius / sqrt3, outer_radius / sqrt3];
    CUBE_FACE_SIGNS
        .iter()
        .map(|face| {
            let mut corner_coords = Vec::with_capacity(24);
            for half in halves {
                for c in face {
                    for &s in c {
                        corner_coords.push(half * T::from(s).unwrap());
                    }
                }
            }
            Tree {
                cell_type: ReferenceCellType::Hexahedron,
                corner_coords,
            }
        })
        .collect()
}

/// Solid ball of the given radius built from 32 hexahedra, four per octant.
/// Each octant holds a flat center hex and three curved slabs whose outer
/// diagonal corner touches the boundary sphere, so the tree indices carry
/// the classification mod 4 the cubed sphere mapping reads.
pub fn cubed_sphere<T: RealScalar>(radius: T) -> Vec<Tree<T>> {
    let xo = radius / T::from(3.0).unwrap().sqrt();
    // The flat center block reaches out to half the sphere radius.
    let xi = xo / (T::one() + T::one());
    let scale = [T::zero(), xi, xo];
    let mut trees = Vec::with_capacity(32);
    for (sx, sy, sz) in iproduct!(
        [T::one(), -T::one()],
        [T::one(), -T::one()],
        [T::one(), -T::one()]
    ) {
        let signs = [sx, sy, sz];
        for motif in &CUBED_SPHERE_MOTIF {
            let mut corner_coords = Vec::with_capacity(24);
            for c in motif {
                for d in 0..3 {
                    corner_coords.push(signs[d] * scale[c[d]]);
                }
            }
            trees.push(Tree {
                cell_type: ReferenceCellType::Hexahedron,
                corner_coords,
            });
        }
    }
    trees
}
