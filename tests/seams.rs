//! Watertightness of the curved mappings across tree boundaries.

use approx::assert_relative_eq;
use itertools::{iproduct, izip};
use treegeom::geometry::{create, GeometryKind};
use treegeom::shapes;
use treegeom::traits::{Geometry, TreeContext};

fn evaluate_batch(
    geometry: &impl Geometry<f64>,
    trees: &[shapes::Tree<f64>],
    tree_id: usize,
    ref_coords: &[f64],
) -> Vec<f64> {
    let tree = TreeContext::new(
        tree_id,
        trees[tree_id].cell_type,
        &trees[tree_id].corner_coords,
    );
    let dimension = geometry.dimension();
    let mut physical = vec![0.0; 3 * (ref_coords.len() / dimension)];
    geometry.evaluate(&tree, ref_coords, &mut physical);
    physical
}

fn assert_points_match(a: &[f64], b: &[f64]) {
    assert_eq!(a.len(), b.len());
    for (p, q) in izip!(a.chunks_exact(3), b.chunks_exact(3)) {
        for d in 0..3 {
            assert_relative_eq!(p[d], q[d], epsilon = 1e-12);
        }
    }
}

fn samples() -> Vec<f64> {
    (0..=16).map(|i| i as f64 / 16.0).collect()
}

#[test]
fn test_disk_quarter_seam() {
    //! The side quads of neighbouring disk quarters meet along a straight
    //! boundary ray.
    let trees = shapes::quadrangulated_disk(2.0);
    let geometry = create(GeometryKind::QuadrangulatedDisk, 2).unwrap();
    // Tree 2 maps the positive x axis from reference (r, 0), tree 10 from
    // reference (0, r).
    let edge_a: Vec<f64> = samples().iter().flat_map(|&r| [r, 0.0]).collect();
    let edge_b: Vec<f64> = samples().iter().flat_map(|&r| [0.0, r]).collect();
    let a = evaluate_batch(&geometry, &trees, 2, &edge_a);
    let b = evaluate_batch(&geometry, &trees, 10, &edge_b);
    assert_points_match(&a, &b);
}

#[test]
fn test_octahedron_face_seam() {
    //! Neighbouring octahedron faces share the great-circle arc between
    //! their common corners.
    let trees = shapes::triangulated_spherical_surface(1.0);
    let geometry = create(GeometryKind::TriangulatedSphericalSurface, 2).unwrap();
    // Trees 0 and 4 differ only in the sign of the x corner, so they share
    // the corners on the y and z axes and map the arc between them from
    // the same reference edge.
    let edge: Vec<f64> = samples().iter().flat_map(|&t| [1.0, t]).collect();
    let a = evaluate_batch(&geometry, &trees, 0, &edge);
    let b = evaluate_batch(&geometry, &trees, 4, &edge);
    assert_points_match(&a, &b);
}

#[test]
fn test_cube_face_seam() {
    //! Neighbouring cube faces meet along the mapped cube edge.
    let trees = shapes::quadrangulated_spherical_surface(1.5);
    let geometry = create(GeometryKind::QuadrangulatedSphericalSurface, 2).unwrap();
    // Face 0 looks towards positive z and maps the shared edge from
    // reference (1, t), face 2 looks towards positive x and maps it from
    // reference (t, 1).
    let edge_a: Vec<f64> = samples().iter().flat_map(|&t| [1.0, t]).collect();
    let edge_b: Vec<f64> = samples().iter().flat_map(|&t| [t, 1.0]).collect();
    let a = evaluate_batch(&geometry, &trees, 0, &edge_a);
    let b = evaluate_batch(&geometry, &trees, 2, &edge_b);
    assert_points_match(&a, &b);
}

#[test]
fn test_cubed_sphere_center_slab_seam() {
    //! The flat center block of an octant meets its slabs without a gap.
    let trees = shapes::cubed_sphere(2.0);
    let geometry = create(GeometryKind::CubedSphere, 3).unwrap();
    // The slab with radial reference axis 0 (tree 2) starts on the face the
    // center block (tree 0) ends on.
    let face_a: Vec<f64> = iproduct!(samples(), samples())
        .flat_map(|(u, v)| [1.0, u, v])
        .collect();
    let face_b: Vec<f64> = iproduct!(samples(), samples())
        .flat_map(|(u, v)| [0.0, u, v])
        .collect();
    let a = evaluate_batch(&geometry, &trees, 0, &face_a);
    let b = evaluate_batch(&geometry, &trees, 2, &face_b);
    assert_points_match(&a, &b);
}

#[test]
fn test_cubed_sphere_slab_slab_seam() {
    //! The curved slabs of one octant meet along their tilted faces.
    let trees = shapes::cubed_sphere(2.0);
    let geometry = create(GeometryKind::CubedSphere, 3).unwrap();
    // Tree 2 runs radially in reference x and touches tree 1, which runs
    // radially in reference y, along the face where their angular
    // coordinates hit 1.
    let face_a: Vec<f64> = iproduct!(samples(), samples())
        .flat_map(|(r, t)| [r, 1.0, t])
        .collect();
    let face_b: Vec<f64> = iproduct!(samples(), samples())
        .flat_map(|(r, t)| [1.0, r, t])
        .collect();
    let a = evaluate_batch(&geometry, &trees, 2, &face_a);
    let b = evaluate_batch(&geometry, &trees, 1, &face_b);
    assert_points_match(&a, &b);
}

#[test]
fn test_cubed_sphere_octant_seam() {
    //! Slabs of neighbouring octants meet in the coordinate plane between
    //! the octants.
    let trees = shapes::cubed_sphere(2.0);
    let geometry = create(GeometryKind::CubedSphere, 3).unwrap();
    // Trees 2 and 6 are the slabs with radial reference axis 0 of the two
    // octants on either side of the z = 0 plane; their shared face lies in
    // that plane.
    let face: Vec<f64> = iproduct!(samples(), samples())
        .flat_map(|(r, t)| [r, t, 0.0])
        .collect();
    let a = evaluate_batch(&geometry, &trees, 2, &face);
    let b = evaluate_batch(&geometry, &trees, 6, &face);
    assert_points_match(&a, &b);
    for p in a.chunks_exact(3) {
        assert_relative_eq!(p[2], 0.0, epsilon = 1e-12);
    }
}

#[test]
fn test_cubed_shell_matches_surface_on_inner_sphere() {
    //! The inner boundary of the cubed shell is the quadrangulated sphere
    //! of the inner radius.
    let shell_trees = shapes::cubed_spherical_shell(1.0, 2.0);
    let surface_trees = shapes::quadrangulated_spherical_surface(1.0);
    let shell = create(GeometryKind::CubedSphericalShell, 3).unwrap();
    let surface = create(GeometryKind::QuadrangulatedSphericalSurface, 2).unwrap();
    let face_3d: Vec<f64> = iproduct!(samples(), samples())
        .flat_map(|(x, y)| [x, y, 0.0])
        .collect();
    let face_2d: Vec<f64> = iproduct!(samples(), samples())
        .flat_map(|(x, y)| [x, y])
        .collect();
    for tree_id in 0..shell_trees.len() {
        let a = evaluate_batch(&shell, &shell_trees, tree_id, &face_3d);
        let b = evaluate_batch(&surface, &surface_trees, tree_id, &face_2d);
        assert_points_match(&a, &b);
    }
}
