//! Leaf initializers and their application in row-major order.

use core::any::{Any, type_name};
use core::fmt;

use crate::nest::{Erased, Nest, Node};
use crate::shape::Shape;
use crate::{InitError, Result};

// ---------- Initializer ----------

/// How each leaf of a freshly built shape is filled.
///
/// Coordinate-aware forms receive one index per requested dimension,
/// outermost first.
pub enum Initializer<'f, L> {
    /// Leave every leaf at its default value.
    None,
    /// Clone one value into every leaf.
    Constant(L),
    /// Called once per leaf; the result is stored.
    Producer(Box<dyn FnMut() -> L + 'f>),
    /// Called once per leaf with the leaf's storage.
    Mutator(Box<dyn FnMut(&mut L) + 'f>),
    /// Called once per leaf with its coordinates; the result is stored.
    IndexedProducer(Box<dyn FnMut(&[usize]) -> L + 'f>),
    /// Called once per leaf with the leaf's storage and its coordinates.
    IndexedMutator(Box<dyn FnMut(&mut L, &[usize]) + 'f>),
}

impl<'f, L> Initializer<'f, L> {
    pub fn constant(value: L) -> Self {
        Self::Constant(value)
    }

    pub fn producer(f: impl FnMut() -> L + 'f) -> Self {
        Self::Producer(Box::new(f))
    }

    pub fn mutator(f: impl FnMut(&mut L) + 'f) -> Self {
        Self::Mutator(Box::new(f))
    }

    pub fn indexed(f: impl FnMut(&[usize]) -> L + 'f) -> Self {
        Self::IndexedProducer(Box::new(f))
    }

    pub fn indexed_mut(f: impl FnMut(&mut L, &[usize]) + 'f) -> Self {
        Self::IndexedMutator(Box::new(f))
    }

    pub fn kind(&self) -> InitializerKind {
        match self {
            Self::None => InitializerKind::None,
            Self::Constant(_) => InitializerKind::Constant,
            Self::Producer(_) => InitializerKind::Producer,
            Self::Mutator(_) => InitializerKind::Mutator,
            Self::IndexedProducer(_) => InitializerKind::IndexedProducer,
            Self::IndexedMutator(_) => InitializerKind::IndexedMutator,
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        matches!(self, Self::IndexedProducer(_) | Self::IndexedMutator(_))
    }
}

impl<L> Default for Initializer<'_, L> {
    fn default() -> Self {
        Self::None
    }
}

impl<L> From<L> for Initializer<'_, L> {
    fn from(value: L) -> Self {
        Self::Constant(value)
    }
}

impl<L> fmt::Debug for Initializer<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Initializer")
            .field(&self.kind())
            .field(&type_name::<L>())
            .finish()
    }
}

/// Tag of an [`Initializer`] form, used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InitializerKind {
    None,
    Constant,
    Producer,
    Mutator,
    IndexedProducer,
    IndexedMutator,
}

impl fmt::Display for InitializerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "absent",
            Self::Constant => "constant",
            Self::Producer => "producer",
            Self::Mutator => "mutator",
            Self::IndexedProducer => "indexed producer",
            Self::IndexedMutator => "indexed mutator",
        })
    }
}

// ---------- Odometer ----------

/// Row-major coordinate counter: the last index moves fastest and carries
/// into the one before it when it reaches its bound.
#[derive(Clone, Debug)]
pub struct Odometer<'a> {
    bounds: &'a [usize],
    coords: Vec<usize>,
}

impl<'a> Odometer<'a> {
    pub fn new(bounds: &'a [usize]) -> Self {
        Self {
            bounds,
            coords: vec![0; bounds.len()],
        }
    }

    #[inline]
    pub fn coords(&self) -> &[usize] {
        &self.coords
    }

    /// Step to the next coordinate. Returns `false` once every position has
    /// been visited, leaving the counter back at all zeros.
    pub fn advance(&mut self) -> bool {
        for (c, &bound) in self.coords.iter_mut().zip(self.bounds).rev() {
            *c += 1;
            if *c < bound {
                return true;
            }
            *c = 0;
        }
        false
    }
}

// ---------- Dispatch ----------

/// Decide whether `initializer` can fill leaves described by `leaf`.
///
/// Runs before any storage is allocated or touched.
pub(crate) fn classify<L: Any>(initializer: &Initializer<'_, L>, leaf: &Node) -> Result<()> {
    if initializer.is_none() || leaf.is::<L>() {
        return Ok(());
    }
    Err(InitError::BadInitializer {
        kind: initializer.kind(),
        reason: format!(
            "works on `{}` but the leaf type is `{}`",
            type_name::<L>(),
            leaf.name()
        ),
    })
}

/// Allocate the flat buffer for `shape` and fill it in row-major order.
pub(crate) fn populate<L>(shape: &Shape, initializer: Initializer<'_, L>) -> Result<Erased>
where
    L: Nest + Clone,
{
    if shape.depth() == 0 && initializer.is_indexed() {
        return Err(no_coordinates(initializer.kind()));
    }
    classify(&initializer, shape.leaf())?;
    let mut cells = shape.leaf().alloc(shape.len())?;
    // Only an absent initializer can disagree with the leaf type here.
    if let Some(cells) = cells.downcast_mut::<Vec<L>>() {
        fill(cells, initializer, shape.dims());
    }
    Ok(cells)
}

/// Apply `initializer` to `cells`, which hold a row-major shape of `dims`.
pub(crate) fn fill<L: Clone>(cells: &mut [L], initializer: Initializer<'_, L>, dims: &[usize]) {
    match initializer {
        Initializer::None => {}
        Initializer::Constant(value) => cells.fill(value),
        Initializer::Producer(mut f) => {
            for cell in cells.iter_mut() {
                *cell = f();
            }
        }
        Initializer::Mutator(mut f) => {
            for cell in cells.iter_mut() {
                f(cell);
            }
        }
        Initializer::IndexedProducer(mut f) => {
            let mut at = Odometer::new(dims);
            for cell in cells.iter_mut() {
                *cell = f(at.coords());
                at.advance();
            }
        }
        Initializer::IndexedMutator(mut f) => {
            let mut at = Odometer::new(dims);
            for cell in cells.iter_mut() {
                f(cell, at.coords());
                at.advance();
            }
        }
    }
}

fn no_coordinates(kind: InitializerKind) -> InitError {
    InitError::BadInitializer {
        kind,
        reason: "coordinates need at least one dimension".to_owned(),
    }
}

/// Zero-dimension path: the target itself is the only leaf.
pub(crate) fn apply_single<T, L>(target: &mut T, initializer: Initializer<'_, L>) -> Result<()>
where
    T: Any,
    L: Any,
{
    if initializer.is_none() {
        return Ok(());
    }
    let kind = initializer.kind();
    if initializer.is_indexed() {
        return Err(no_coordinates(kind));
    }
    let Some(slot) = (target as &mut dyn Any).downcast_mut::<L>() else {
        return Err(InitError::BadInitializer {
            kind,
            reason: format!(
                "works on `{}` but the target is `{}`",
                type_name::<L>(),
                type_name::<T>()
            ),
        });
    };
    match initializer {
        Initializer::Constant(value) => *slot = value,
        Initializer::Producer(mut f) => *slot = f(),
        Initializer::Mutator(mut f) => f(slot),
        Initializer::None | Initializer::IndexedProducer(_) | Initializer::IndexedMutator(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odometer_row_major() {
        let dims = [2, 3];
        let mut at = Odometer::new(&dims);
        let mut seen = vec![at.coords().to_vec()];
        while at.advance() {
            seen.push(at.coords().to_vec());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
        assert_eq!(at.coords(), &[0, 0]);
    }

    #[test]
    fn odometer_carries_through_ones() {
        let dims = [2, 1, 1];
        let mut at = Odometer::new(&dims);
        assert!(at.advance());
        assert_eq!(at.coords(), &[1, 0, 0]);
        assert!(!at.advance());
    }

    #[test]
    fn odometer_empty_bounds() {
        let mut at = Odometer::new(&[]);
        assert!(at.coords().is_empty());
        assert!(!at.advance());
    }

    #[test]
    fn kinds() {
        assert_eq!(Initializer::<i32>::None.kind(), InitializerKind::None);
        assert_eq!(Initializer::from(3).kind(), InitializerKind::Constant);
        assert_eq!(Initializer::producer(|| 1).kind(), InitializerKind::Producer);
        assert_eq!(
            Initializer::mutator(|x: &mut i32| *x += 1).kind(),
            InitializerKind::Mutator
        );
        assert_eq!(
            Initializer::indexed(|c| c[0]).kind(),
            InitializerKind::IndexedProducer
        );
        assert_eq!(
            Initializer::indexed_mut(|x: &mut usize, c| *x = c[0]).kind(),
            InitializerKind::IndexedMutator
        );
    }

    #[test]
    fn fill_indexed_mutator() {
        let mut cells = vec![1usize; 6];
        fill(
            &mut cells,
            Initializer::indexed_mut(|x: &mut usize, c| *x += 10 * c[0] + c[1]),
            &[3, 2],
        );
        assert_eq!(cells, vec![1, 2, 11, 12, 21, 22]);
    }

    #[test]
    fn classify_checks_leaf_type() {
        let leaf = Node::of::<i32>();
        assert!(classify(&Initializer::<i32>::from(1), &leaf).is_ok());
        assert!(classify(&Initializer::<String>::None, &leaf).is_ok());
        assert!(matches!(
            classify(&Initializer::from(1u8), &leaf),
            Err(InitError::BadInitializer {
                kind: InitializerKind::Constant,
                ..
            })
        ));
    }
}
