//! Shape resolution: validate requested dimensions against a target type.

use core::any::type_name;

use crate::nest::{Level, Nest, Node};
use crate::{InitError, Result};

/// The validated plan for one call: container levels outer to inner, the
/// leaf at the requested depth, and the dimension sizes.
#[derive(Clone, Debug)]
pub struct Shape {
    target: &'static str,
    levels: Vec<Level>,
    leaf: Node,
    dims: Vec<usize>,
    len: usize,
}

impl Shape {
    /// Name of the type this shape was resolved for.
    #[inline]
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Container levels, outermost first. Empty for a [`Shape::flat`] shape.
    #[inline]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    #[inline]
    pub fn leaf(&self) -> &Node {
        &self.leaf
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.dims.len()
    }

    /// Number of leaves, the product of all dimensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Shape of a plain row-major buffer of `L`, with no container levels.
    pub fn flat<L: Nest>(dims: &[isize]) -> Result<Self> {
        let mut sizes = Vec::with_capacity(dims.len());
        let mut len: usize = 1;
        for (d, &size) in dims.iter().enumerate() {
            len = extend(&mut sizes, len, d, size)?;
        }
        Ok(Self {
            target: type_name::<Vec<L>>(),
            levels: Vec::new(),
            leaf: Node::of::<L>(),
            dims: sizes,
            len,
        })
    }
}

/// Walk `T` one container level per requested dimension.
///
/// At each level the current type must be a container (`BadTarget`) and the
/// size must be positive (`BadDimension`), checked in that order.
pub fn resolve<T: Nest>(dims: &[isize]) -> Result<Shape> {
    let target = type_name::<T>();
    let mut levels = Vec::with_capacity(dims.len());
    let mut sizes = Vec::with_capacity(dims.len());
    let mut len: usize = 1;
    let mut node = Node::of::<T>();
    for (d, &size) in dims.iter().enumerate() {
        let Some(level) = node.level() else {
            return Err(InitError::BadTarget {
                target,
                reason: format!(
                    "dimension {} is not a container level (found `{}`)",
                    d + 1,
                    node.name()
                ),
            });
        };
        len = extend(&mut sizes, len, d, size)?;
        levels.push(level);
        node = level.elem();
    }
    Ok(Shape {
        target,
        levels,
        leaf: node,
        dims: sizes,
        len,
    })
}

fn extend(sizes: &mut Vec<usize>, len: usize, d: usize, size: isize) -> Result<usize> {
    let extent = usize::try_from(size)
        .ok()
        .filter(|&s| s > 0)
        .ok_or(InitError::BadDimension { dim: d + 1, size })?;
    sizes.push(extent);
    len.checked_mul(extent).ok_or(InitError::Overflow)
}
