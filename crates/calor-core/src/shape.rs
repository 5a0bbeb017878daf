//! Grid shapes and row-major index arithmetic.
//!
//! Every field in Calor is stored flat with the last axis varying
//! fastest. The helpers here convert between flat offsets and
//! per-axis indices and enumerate the cells of an edge slice.

use crate::id::Side;
use smallvec::{smallvec, SmallVec};

/// Number of points per axis.
///
/// Four inline slots cover every structured grid used in practice
/// without a heap allocation.
pub type Shape = SmallVec<[usize; 4]>;

/// A per-axis index into a [`Shape`].
pub type Index = SmallVec<[usize; 4]>;

/// Total number of cells in a shape (product of extents).
pub fn cell_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Row-major strides: `strides[i]` is the flat distance between
/// neighbours along axis `i`.
pub fn strides(shape: &[usize]) -> Shape {
    let mut out: Shape = smallvec![1; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        out[axis] = out[axis + 1] * shape[axis + 1];
    }
    out
}

/// Flat offset of `index`, or `None` if it has the wrong rank or any
/// component is out of range.
pub fn flat_index(shape: &[usize], index: &[usize]) -> Option<usize> {
    if index.len() != shape.len() {
        return None;
    }
    let mut flat = 0;
    for (&i, &n) in index.iter().zip(shape) {
        if i >= n {
            return None;
        }
        flat = flat * n + i;
    }
    Some(flat)
}

/// Inverse of [`flat_index`]. `flat` must be below `cell_count(shape)`.
pub fn unravel(shape: &[usize], mut flat: usize) -> Index {
    let mut out: Index = smallvec![0; shape.len()];
    for axis in (0..shape.len()).rev() {
        let n = shape[axis];
        out[axis] = flat % n;
        flat /= n;
    }
    out
}

/// Step `index` to the next cell in row-major order.
///
/// Returns `false` (leaving `index` at all zeros) after the last cell.
pub fn advance(index: &mut [usize], shape: &[usize]) -> bool {
    for axis in (0..shape.len()).rev() {
        index[axis] += 1;
        if index[axis] < shape[axis] {
            return true;
        }
        index[axis] = 0;
    }
    false
}

/// Number of cells in the slice at one end of `axis`.
pub fn edge_len(shape: &[usize], axis: usize) -> usize {
    shape
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != axis)
        .map(|(_, &n)| n)
        .product()
}

/// Flat indices of the edge slice `(axis, side)`, ordered row-major over
/// the remaining axes.
///
/// Returns an empty vector if `axis` is out of range.
pub fn edge_indices(shape: &[usize], axis: usize, side: Side) -> Vec<usize> {
    if axis >= shape.len() {
        return Vec::new();
    }
    let stride = strides(shape);
    let base = side.position(shape[axis]) * stride[axis];
    let others: SmallVec<[usize; 4]> = (0..shape.len()).filter(|&a| a != axis).collect();
    let count = edge_len(shape, axis);

    let mut out = Vec::with_capacity(count);
    let mut counter: Index = smallvec![0; others.len()];
    for _ in 0..count {
        let offset: usize = others
            .iter()
            .zip(&counter)
            .map(|(&a, &i)| i * stride[a])
            .sum();
        out.push(base + offset);

        // Odometer increment, last remaining axis fastest.
        for k in (0..others.len()).rev() {
            counter[k] += 1;
            if counter[k] < shape[others[k]] {
                break;
            }
            counter[k] = 0;
        }
    }
    out
}
