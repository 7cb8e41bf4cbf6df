//! Fixed-size vector kernel
//!
//! Small allocation-free primitives on 3-component coordinate vectors. All
//! coordinates live in physical space, so the component count is always 3
//! regardless of the reference dimension of the mapping that calls in here.

use crate::types::RealScalar;

/// Dot product of two vectors.
pub fn dot<T: RealScalar>(x: &[T; 3], y: &[T; 3]) -> T {
    x[0] * y[0] + x[1] * y[1] + x[2] * y[2]
}

/// Cross product of two vectors.
pub fn cross<T: RealScalar>(x: &[T; 3], y: &[T; 3]) -> [T; 3] {
    [
        x[1] * y[2] - x[2] * y[1],
        x[2] * y[0] - x[0] * y[2],
        x[0] * y[1] - x[1] * y[0],
    ]
}

/// Euclidean norm of a vector.
pub fn norm<T: RealScalar>(x: &[T; 3]) -> T {
    dot(x, x).sqrt()
}

/// Euclidean distance between two points.
pub fn dist<T: RealScalar>(x: &[T; 3], y: &[T; 3]) -> T {
    norm(&diff(x, y))
}

/// Componentwise difference `x - y`.
pub fn diff<T: RealScalar>(x: &[T; 3], y: &[T; 3]) -> [T; 3] {
    [x[0] - y[0], x[1] - y[1], x[2] - y[2]]
}

/// Scaled copy `alpha * x`.
pub fn axy<T: RealScalar>(x: &[T; 3], alpha: T) -> [T; 3] {
    [alpha * x[0], alpha * x[1], alpha * x[2]]
}

/// Accumulate `y += alpha * x`.
pub fn axpy<T: RealScalar>(x: &[T; 3], y: &mut [T; 3], alpha: T) {
    y[0] = y[0] + alpha * x[0];
    y[1] = y[1] + alpha * x[1];
    y[2] = y[2] + alpha * x[2];
}

/// Normalize `x` to unit length. The input must have non-zero length.
pub fn normalize<T: RealScalar>(x: &mut [T; 3]) {
    let length = norm(x);
    debug_assert!(length > T::zero());
    x[0] = x[0] / length;
    x[1] = x[1] / length;
    x[2] = x[2] / length;
}

/// Rescale `x` to the given length. The input must have non-zero length.
pub fn rescale<T: RealScalar>(x: &mut [T; 3], length: T) {
    normalize(x);
    x[0] = x[0] * length;
    x[1] = x[1] * length;
    x[2] = x[2] * length;
}

/// Normal of the triangle spanned by three points, oriented by the corner
/// order. Not normalized.
pub fn tri_normal<T: RealScalar>(p0: &[T; 3], p1: &[T; 3], p2: &[T; 3]) -> [T; 3] {
    cross(&diff(p1, p0), &diff(p2, p0))
}
