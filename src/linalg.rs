//!
//! Small linear-algebra surface over `Prob` arrays.
//!
//! The forward/backward recursions only need four primitives (element-wise
//! product, matrix-vector product against `A` or its transpose, outer
//! product) and one shared normalization routine. They are spelled out here
//! as named functions so the recursions do not depend on any array library's
//! broadcasting semantics.
//!
use crate::prob::Prob;
use ndarray::{Array, Array1, Array2, ArrayView, ArrayView1, ArrayView2, Dimension, Zip};

///
/// Normalize a non-negative array so that all entries sum to 1.
///
/// Returns `(v, z)` where `z` is the sum of all entries of `u` and
/// `v = u / z` element-wise.
///
/// If `z == 0` (every entry is zero, i.e. an observation was impossible under
/// every state) `u` is returned unchanged together with `z = 0`, so the
/// caller can detect a zero-likelihood sequence. No NaN is ever produced.
///
pub fn normalize<D: Dimension>(u: ArrayView<Prob, D>) -> (Array<Prob, D>, Prob) {
    let z: Prob = u.iter().sum();
    if z.is_zero() {
        (u.to_owned(), z)
    } else {
        (u.mapv(|x| x / z), z)
    }
}

///
/// Element-wise product `a ⊙ b` of two equally-shaped arrays.
///
pub fn hadamard<D: Dimension>(a: ArrayView<Prob, D>, b: ArrayView<Prob, D>) -> Array<Prob, D> {
    assert_eq!(a.shape(), b.shape());
    Zip::from(a).and(b).map_collect(|&x, &y| x * y)
}

///
/// Matrix-vector product `A · v`, i.e. `res[i] = \sum_j a[i][j] v[j]`.
///
pub fn matvec(a: ArrayView2<Prob>, v: ArrayView1<Prob>) -> Array1<Prob> {
    assert_eq!(a.ncols(), v.len());
    Array1::from_shape_fn(a.nrows(), |i| {
        a.row(i).iter().zip(v.iter()).map(|(&aij, &vj)| aij * vj).sum()
    })
}

///
/// Transposed matrix-vector product `Aᵗ · v`, i.e. `res[j] = \sum_i a[i][j] v[i]`.
///
pub fn matvec_t(a: ArrayView2<Prob>, v: ArrayView1<Prob>) -> Array1<Prob> {
    assert_eq!(a.nrows(), v.len());
    Array1::from_shape_fn(a.ncols(), |j| {
        a.column(j).iter().zip(v.iter()).map(|(&aij, &vi)| aij * vi).sum()
    })
}

///
/// Outer product `u vᵗ`, i.e. `res[i][j] = u[i] v[j]`.
///
pub fn outer(u: ArrayView1<Prob>, v: ArrayView1<Prob>) -> Array2<Prob> {
    Array2::from_shape_fn((u.len(), v.len()), |(i, j)| u[i] * v[j])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prob::p;
    use ndarray::array;

    #[test]
    fn normalize_vector() {
        let u = array![p(1.0), p(3.0)];
        let (v, z) = normalize(u.view());
        assert_abs_diff_eq!(z, p(4.0), epsilon = 0.0000001);
        assert_abs_diff_eq!(v[0], p(0.25), epsilon = 0.0000001);
        assert_abs_diff_eq!(v[1], p(0.75), epsilon = 0.0000001);
        let total: Prob = v.iter().sum();
        assert_abs_diff_eq!(total, p(1.0), epsilon = 0.0000001);
    }
    #[test]
    fn normalize_matrix() {
        let u = array![[p(0.1), p(0.1)], [p(0.1), p(0.1)]];
        let (v, z) = normalize(u.view());
        assert_abs_diff_eq!(z, p(0.4), epsilon = 0.0000001);
        for &x in v.iter() {
            assert_abs_diff_eq!(x, p(0.25), epsilon = 0.0000001);
        }
    }
    #[test]
    fn normalize_all_zero_is_passed_through() {
        let u = array![p(0.0), p(0.0), p(0.0)];
        let (v, z) = normalize(u.view());
        assert!(z.is_zero());
        for &x in v.iter() {
            assert!(x.is_zero());
            assert!(!x.to_value().is_nan());
        }
    }
    #[test]
    fn normalize_tiny_entries() {
        // entries far below f64 linear-space range still normalize cleanly
        let u = array![crate::prob::lp(-2000.0), crate::prob::lp(-2000.0)];
        let (v, z) = normalize(u.view());
        assert!(!z.is_zero());
        assert_abs_diff_eq!(v[0], p(0.5), epsilon = 0.0000001);
        assert_abs_diff_eq!(v[1], p(0.5), epsilon = 0.0000001);
    }
    #[test]
    fn hadamard_vector() {
        let a = array![p(0.5), p(0.2)];
        let b = array![p(0.4), p(0.5)];
        let c = hadamard(a.view(), b.view());
        assert_abs_diff_eq!(c[0], p(0.2), epsilon = 0.0000001);
        assert_abs_diff_eq!(c[1], p(0.1), epsilon = 0.0000001);
    }
    #[test]
    fn matvec_and_transpose() {
        let a = array![[p(0.9), p(0.1)], [p(0.3), p(0.7)]];
        let v = array![p(0.5), p(0.5)];
        let av = matvec(a.view(), v.view());
        assert_abs_diff_eq!(av[0], p(0.5), epsilon = 0.0000001);
        assert_abs_diff_eq!(av[1], p(0.5), epsilon = 0.0000001);
        let atv = matvec_t(a.view(), v.view());
        assert_abs_diff_eq!(atv[0], p(0.6), epsilon = 0.0000001);
        assert_abs_diff_eq!(atv[1], p(0.4), epsilon = 0.0000001);
    }
    #[test]
    fn outer_product() {
        let u = array![p(0.5), p(0.1)];
        let v = array![p(0.2), p(0.4)];
        let m = outer(u.view(), v.view());
        assert_abs_diff_eq!(m[[0, 0]], p(0.1), epsilon = 0.0000001);
        assert_abs_diff_eq!(m[[0, 1]], p(0.2), epsilon = 0.0000001);
        assert_abs_diff_eq!(m[[1, 0]], p(0.02), epsilon = 0.0000001);
        assert_abs_diff_eq!(m[[1, 1]], p(0.04), epsilon = 0.0000001);
    }
}
