//! CPU kernels for the matrix contract
//!
//! Safe slice kernels with optional Rayon parallelization:
//! - elementwise binary / unary maps, out-of-place and in-place
//! - matrix product, parallel over output rows
//! - whole-buffer softmax
//!
//! Callers validate shapes; kernels assume matching lengths.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Parallelization threshold: skip Rayon for small inputs (overhead > benefit)
pub const PARALLEL_THRESHOLD: usize = 16 * 1024;

#[cfg(feature = "rayon")]
const CHUNK_SIZE: usize = 4096;

/// out[i] = f(a[i], b[i])
#[inline]
pub(crate) fn binary_kernel<F>(a: &[f32], b: &[f32], out: &mut [f32], f: F)
where
    F: Fn(f32, f32) -> f32 + Sync,
{
    debug_assert!(a.len() == b.len() && a.len() == out.len());

    #[cfg(feature = "rayon")]
    if out.len() >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(CHUNK_SIZE)
            .zip(a.par_chunks(CHUNK_SIZE))
            .zip(b.par_chunks(CHUNK_SIZE))
            .for_each(|((o, a), b)| {
                for ((o, &x), &y) in o.iter_mut().zip(a).zip(b) {
                    *o = f(x, y);
                }
            });
        return;
    }

    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = f(x, y);
    }
}

/// a[i] = f(a[i], b[i])
#[inline]
pub(crate) fn binary_inplace_kernel<F>(a: &mut [f32], b: &[f32], f: F)
where
    F: Fn(f32, f32) -> f32 + Sync,
{
    debug_assert_eq!(a.len(), b.len());

    #[cfg(feature = "rayon")]
    if a.len() >= PARALLEL_THRESHOLD {
        a.par_chunks_mut(CHUNK_SIZE)
            .zip(b.par_chunks(CHUNK_SIZE))
            .for_each(|(a, b)| {
                for (x, &y) in a.iter_mut().zip(b) {
                    *x = f(*x, y);
                }
            });
        return;
    }

    for (x, &y) in a.iter_mut().zip(b) {
        *x = f(*x, y);
    }
}

/// out[i] = f(a[i])
#[inline]
pub(crate) fn unary_kernel<F>(a: &[f32], out: &mut [f32], f: F)
where
    F: Fn(f32) -> f32 + Sync,
{
    debug_assert_eq!(a.len(), out.len());

    #[cfg(feature = "rayon")]
    if out.len() >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(CHUNK_SIZE)
            .zip(a.par_chunks(CHUNK_SIZE))
            .for_each(|(o, a)| {
                for (o, &x) in o.iter_mut().zip(a) {
                    *o = f(x);
                }
            });
        return;
    }

    for (o, &x) in out.iter_mut().zip(a) {
        *o = f(x);
    }
}

/// a[i] = f(a[i])
#[inline]
pub(crate) fn unary_inplace_kernel<F>(a: &mut [f32], f: F)
where
    F: Fn(f32) -> f32 + Sync,
{
    #[cfg(feature = "rayon")]
    if a.len() >= PARALLEL_THRESHOLD {
        a.par_chunks_mut(CHUNK_SIZE).for_each(|a| {
            for x in a.iter_mut() {
                *x = f(*x);
            }
        });
        return;
    }

    for x in a.iter_mut() {
        *x = f(*x);
    }
}

/// Matrix product C = A @ B with A `[m, k]`, B `[k, n]`, C `[m, n]`, row-major.
///
/// Loops run i-k-j for contiguous access to B and C. Each `c[i][j]` still
/// accumulates its products in ascending `k` starting from zero, the same
/// order as the textbook i-j-k loop.
pub(crate) fn matmul_kernel(a: &[f32], b: &[f32], out: &mut [f32], m: usize, k: usize, n: usize) {
    debug_assert_eq!(a.len(), m * k);
    debug_assert_eq!(b.len(), k * n);
    debug_assert_eq!(out.len(), m * n);

    if n == 0 {
        return;
    }

    let row = |i: usize, c_row: &mut [f32]| {
        c_row.fill(0.0);
        let a_row = &a[i * k..(i + 1) * k];
        for (kk, &aik) in a_row.iter().enumerate() {
            let b_row = &b[kk * n..(kk + 1) * n];
            for (c, &bkj) in c_row.iter_mut().zip(b_row) {
                *c += aik * bkj;
            }
        }
    };

    #[cfg(feature = "rayon")]
    if m * n * k.max(1) >= PARALLEL_THRESHOLD && m > 1 {
        out.par_chunks_mut(n)
            .enumerate()
            .for_each(|(i, c_row)| row(i, c_row));
        return;
    }

    for (i, c_row) in out.chunks_mut(n).enumerate() {
        row(i, c_row);
    }
}

/// Softmax over the whole buffer in place.
///
/// softmax(x)[i] = exp(x[i] - max(x)) / sum(exp(x - max(x)))
///
/// The sum accumulates in f64.
pub(crate) fn softmax_inplace_kernel(a: &mut [f32]) {
    if a.is_empty() {
        return;
    }

    // Find max for numerical stability
    let max_val = a.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    let mut sum = 0.0f64;
    for x in a.iter_mut() {
        *x = (*x - max_val).exp();
        sum += *x as f64;
    }

    let sum = sum as f32;
    unary_inplace_kernel(a, |x| x / sum);
}
