use crate::errors::IndexError;

pub type MatrixShape = [usize; 2];
pub type TensorShape = [usize; 3];

/// Number of elements a shape holds, or `None` if it doesn't fit in a
/// `usize`. Any zero extent makes the count zero regardless of the others.
pub fn checked_num_elems<const R: usize>(s: [usize; R]) -> Option<usize> {
    if s.contains(&0) {
        return Some(0);
    }
    s.iter().try_fold(1usize, |n, &d| n.checked_mul(d))
}

pub const fn stride<const R: usize>(s: [usize; R]) -> [usize; R] {
    let mut res = [0; R];
    let mut dim = 0;

    while dim < R {
        let mut i = dim + 1;
        let mut cur = 1;
        while i < R {
            cur *= s[i];
            i += 1;
        }
        res[dim] = cur;

        dim += 1;
    }

    res
}

/// Translates a multi-dimensional index into an offset into row-major
/// storage, checking every coordinate against its extent.
pub fn storage_idx<const R: usize>(idx: [usize; R], s: [usize; R]) -> Result<usize, IndexError> {
    for (&cur, &extent) in idx.iter().zip(s.iter()) {
        if cur >= extent {
            log::trace!("index {:?} rejected for shape {:?}", idx, s);
            return Err(IndexError::OutOfBounds {
                idx: idx.to_vec(),
                shape: s.to_vec(),
            });
        }
    }

    Ok(calc_storage_idx(idx, s))
}

fn calc_storage_idx<const R: usize>(idx: [usize; R], s: [usize; R]) -> usize {
    let stride = stride(s);
    let mut i = 0;
    for (dim, &cur) in idx.iter().enumerate() {
        i += stride[dim] * cur;
    }

    i
}

/// The first index in row-major order, or `None` if the shape holds no
/// elements.
pub fn first_idx<const R: usize>(s: [usize; R]) -> Option<[usize; R]> {
    if s.contains(&0) {
        None
    } else {
        Some([0; R])
    }
}

/// Advances `idx` by one position in row-major order (last dimension fastest).
pub fn next_idx<const R: usize>(idx: [usize; R], s: [usize; R]) -> Option<[usize; R]> {
    let mut next = idx;
    for dim in (0..R).rev() {
        next[dim] += 1;
        if next[dim] < s[dim] {
            return Some(next);
        }
        next[dim] = 0;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride() {
        assert_eq!(stride([2, 3, 4]), [12, 4, 1]);
        assert_eq!(stride([5, 7]), [7, 1]);
    }

    #[test]
    fn test_storage_idx() {
        assert_eq!(storage_idx([1, 2, 3], [2, 3, 4]), Ok(23));
        assert_eq!(storage_idx([0, 1], [2, 2]), Ok(1));
        assert_eq!(
            storage_idx([0, 2], [2, 2]),
            Err(IndexError::OutOfBounds {
                idx: vec![0, 2],
                shape: vec![2, 2],
            })
        );
    }

    #[test]
    fn test_walk_order() {
        let s = [2, 1, 2];
        let mut seen = Vec::new();
        let mut cur = first_idx(s);
        while let Some(idx) = cur {
            seen.push(idx);
            cur = next_idx(idx, s);
        }

        assert_eq!(seen, vec![[0, 0, 0], [0, 0, 1], [1, 0, 0], [1, 0, 1]]);
        assert_eq!(first_idx([3, 0]), None);
        assert_eq!(first_idx([usize::MAX, 2, 0]), None);
    }

    #[test]
    fn test_checked_num_elems() {
        assert_eq!(checked_num_elems([2, 3, 4]), Some(24));
        assert_eq!(checked_num_elems([usize::MAX, 2, 1]), None);
        assert_eq!(checked_num_elems([usize::MAX, 2, 0]), Some(0));
        assert_eq!(checked_num_elems([0, usize::MAX, usize::MAX]), Some(0));
    }
}
