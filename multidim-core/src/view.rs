//! Bottom-up partitioning of a flat buffer into nested containers.
//!
//! The innermost run is the flat buffer itself. Walking outward, each run of
//! `m` elements is cut into `m / k` containers of exactly `k` elements, and
//! that run of containers becomes the input of the next level. The outermost
//! run is sealed into the target type.
//!
//! Every container is created with capacity equal to its length, so a later
//! `push` on one row reallocates that row instead of reaching into memory
//! that belongs to its neighbour.

use crate::nest::{Erased, Nest, unerase};
use crate::shape::Shape;
use crate::{InitError, Result};

/// Build `T` from `cells`, an erased `Vec` of `shape.len()` leaves.
pub(crate) fn assemble<T: Nest>(shape: &Shape, cells: Erased) -> Result<T> {
    let Some((outer, inner)) = shape.levels().split_first() else {
        return Err(InitError::BadTarget {
            target: shape.target(),
            reason: "no container level to assemble".to_owned(),
        });
    };
    let mut run = cells;
    for (level, &k) in inner.iter().zip(&shape.dims()[1..]).rev() {
        run = level.group(run, k)?;
    }
    unerase::<T>(outer.seal(run)?, shape.target())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::nest::Node;
    use crate::shape::resolve;

    fn cells<L: Nest>(shape: &Shape) -> Erased {
        Node::of::<L>().alloc(shape.len()).unwrap()
    }

    #[test]
    fn one_level_is_the_flat_buffer() {
        let shape = resolve::<Vec<u8>>(&[4]).unwrap();
        let v: Vec<u8> = assemble(&shape, cells::<u8>(&shape)).unwrap();
        assert_eq!(v, vec![0; 4]);
        assert_eq!(v.capacity(), 4);
    }

    #[test]
    fn rows_keep_flat_order() {
        let shape = resolve::<Vec<Vec<i32>>>(&[2, 3]).unwrap();
        let flat: Erased = Box::new((0..6).collect::<Vec<i32>>());
        let v: Vec<Vec<i32>> = assemble(&shape, flat).unwrap();
        assert_eq!(v, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn mixed_container_levels() {
        type Mixed = VecDeque<Box<[Vec<u32>]>>;
        let shape = resolve::<Mixed>(&[2, 2, 2]).unwrap();
        let flat: Erased = Box::new((0..8).collect::<Vec<u32>>());
        let v: Mixed = assemble(&shape, flat).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(&*v[1], &[vec![4, 5], vec![6, 7]][..]);
    }

    #[test]
    fn wrong_leaf_run_is_rejected() {
        let shape = resolve::<Vec<Vec<i32>>>(&[1, 1]).unwrap();
        let flat: Erased = Box::new(vec![String::new()]);
        let err = assemble::<Vec<Vec<i32>>>(&shape, flat).unwrap_err();
        assert!(matches!(err, InitError::BadTarget { .. }));
    }
}
