//! Bindings for C

#![allow(missing_docs)]
#![allow(clippy::missing_safety_doc)]

#[derive(Debug, PartialEq, Clone, Copy)]
#[repr(u8)]
pub enum RealDType {
    F32 = 0,
    F64 = 1,
}

mod geometry {
    use super::RealDType;
    use crate::geometry::{GeometryKind, TreeGeometry};
    use crate::reference_cell::ReferenceCellType;
    use crate::traits::{CornerSlice, Geometry, TreeContext};
    use crate::types::RealScalar;
    use std::ffi::c_void;

    #[repr(C)]
    pub struct GeometryWrapper {
        pub geometry: *const c_void,
        pub dtype: RealDType,
    }

    impl Drop for GeometryWrapper {
        fn drop(&mut self) {
            drop(unsafe { Box::from_raw(self.geometry as *mut TreeGeometry) })
        }
    }

    pub(crate) unsafe fn extract_geometry(g: *const GeometryWrapper) -> *const TreeGeometry {
        (*g).geometry as *const TreeGeometry
    }

    #[no_mangle]
    pub extern "C" fn geometry_new(
        kind: u8,
        dimension: usize,
        dtype: RealDType,
    ) -> *const GeometryWrapper {
        let kind = match GeometryKind::from(kind) {
            Some(kind) => kind,
            None => panic!("Unknown geometry kind."),
        };
        let geometry = match crate::geometry::create(kind, dimension) {
            Ok(geometry) => geometry,
            Err(e) => panic!("{}", e),
        };
        Box::into_raw(Box::new(GeometryWrapper {
            geometry: Box::into_raw(Box::new(geometry)) as *const c_void,
            dtype,
        }))
    }

    #[no_mangle]
    pub unsafe extern "C" fn free_geometry(g: *mut GeometryWrapper) {
        assert!(!g.is_null());
        unsafe { drop(Box::from_raw(g)) }
    }

    #[no_mangle]
    pub unsafe extern "C" fn geometry_dimension(g: *const GeometryWrapper) -> usize {
        Geometry::<f64>::dimension(&*extract_geometry(g))
    }

    unsafe fn geometry_evaluate_internal<T: RealScalar>(
        g: *const GeometryWrapper,
        tree_id: usize,
        cell_type: u8,
        corner_coords: *const c_void,
        corner_count: usize,
        ref_coords: *const c_void,
        num_points: usize,
        physical_coords: *mut c_void,
    ) {
        let geometry = &*extract_geometry(g);
        let cell_type = match ReferenceCellType::from(cell_type) {
            Some(cell_type) => cell_type,
            None => panic!("Unknown cell type."),
        };
        let corner_coords =
            std::slice::from_raw_parts(corner_coords as *const T, 3 * corner_count);
        let dimension = Geometry::<T>::dimension(geometry);
        let ref_coords =
            std::slice::from_raw_parts(ref_coords as *const T, dimension * num_points);
        let physical_coords =
            std::slice::from_raw_parts_mut(physical_coords as *mut T, 3 * num_points);
        let tree = TreeContext::new(tree_id, cell_type, corner_coords);
        geometry.evaluate(&tree, ref_coords, physical_coords);
    }

    #[no_mangle]
    pub unsafe extern "C" fn geometry_evaluate(
        g: *const GeometryWrapper,
        tree_id: usize,
        cell_type: u8,
        corner_coords: *const c_void,
        corner_count: usize,
        ref_coords: *const c_void,
        num_points: usize,
        physical_coords: *mut c_void,
    ) {
        match (*g).dtype {
            RealDType::F32 => geometry_evaluate_internal::<f32>(
                g,
                tree_id,
                cell_type,
                corner_coords,
                corner_count,
                ref_coords,
                num_points,
                physical_coords,
            ),
            RealDType::F64 => geometry_evaluate_internal::<f64>(
                g,
                tree_id,
                cell_type,
                corner_coords,
                corner_count,
                ref_coords,
                num_points,
                physical_coords,
            ),
        }
    }

    unsafe fn geometry_evaluate_jacobian_internal<T: RealScalar>(
        g: *const GeometryWrapper,
        tree_id: usize,
        cell_type: u8,
        corner_coords: *const c_void,
        corner_count: usize,
        ref_coords: *const c_void,
        num_points: usize,
        jacobians: *mut c_void,
    ) -> i32 {
        let geometry = &*extract_geometry(g);
        let cell_type = match ReferenceCellType::from(cell_type) {
            Some(cell_type) => cell_type,
            None => panic!("Unknown cell type."),
        };
        let corner_coords =
            std::slice::from_raw_parts(corner_coords as *const T, 3 * corner_count);
        let dimension = Geometry::<T>::dimension(geometry);
        let ref_coords =
            std::slice::from_raw_parts(ref_coords as *const T, dimension * num_points);
        let jacobians =
            std::slice::from_raw_parts_mut(jacobians as *mut T, 3 * dimension * num_points);
        let tree = TreeContext::new(tree_id, cell_type, corner_coords);
        match geometry.evaluate_jacobian(&tree, ref_coords, jacobians) {
            Ok(()) => 0,
            Err(_) => 1,
        }
    }

    /// Returns 0 on success and 1 if the geometry does not implement
    /// jacobians.
    #[no_mangle]
    pub unsafe extern "C" fn geometry_evaluate_jacobian(
        g: *const GeometryWrapper,
        tree_id: usize,
        cell_type: u8,
        corner_coords: *const c_void,
        corner_count: usize,
        ref_coords: *const c_void,
        num_points: usize,
        jacobians: *mut c_void,
    ) -> i32 {
        match (*g).dtype {
            RealDType::F32 => geometry_evaluate_jacobian_internal::<f32>(
                g,
                tree_id,
                cell_type,
                corner_coords,
                corner_count,
                ref_coords,
                num_points,
                jacobians,
            ),
            RealDType::F64 => geometry_evaluate_jacobian_internal::<f64>(
                g,
                tree_id,
                cell_type,
                corner_coords,
                corner_count,
                ref_coords,
                num_points,
                jacobians,
            ),
        }
    }

    unsafe fn geometry_point_batch_inside_element_internal<T: RealScalar>(
        g: *const GeometryWrapper,
        corner_coords: *const c_void,
        corner_count: usize,
        points: *const c_void,
        num_points: usize,
        tolerance: f64,
        is_inside: *mut bool,
    ) -> i32 {
        let geometry = &*extract_geometry(g);
        let element = CornerSlice(std::slice::from_raw_parts(
            corner_coords as *const T,
            3 * corner_count,
        ));
        let points = std::slice::from_raw_parts(points as *const T, 3 * num_points);
        let is_inside = std::slice::from_raw_parts_mut(is_inside, num_points);
        let tolerance = T::from(tolerance).unwrap();
        match geometry.point_batch_inside_element(&element, points, tolerance, is_inside) {
            Ok(()) => 0,
            Err(_) => 1,
        }
    }

    /// Returns 0 on success and 1 if the geometry does not implement
    /// containment queries.
    #[no_mangle]
    pub unsafe extern "C" fn geometry_point_batch_inside_element(
        g: *const GeometryWrapper,
        corner_coords: *const c_void,
        corner_count: usize,
        points: *const c_void,
        num_points: usize,
        tolerance: f64,
        is_inside: *mut bool,
    ) -> i32 {
        match (*g).dtype {
            RealDType::F32 => geometry_point_batch_inside_element_internal::<f32>(
                g,
                corner_coords,
                corner_count,
                points,
                num_points,
                tolerance,
                is_inside,
            ),
            RealDType::F64 => geometry_point_batch_inside_element_internal::<f64>(
                g,
                corner_coords,
                corner_count,
                points,
                num_points,
                tolerance,
                is_inside,
            ),
        }
    }
}
