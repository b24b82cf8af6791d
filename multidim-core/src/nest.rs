//! Type-level description of nested shapes.
//!
//! Every type that can sit somewhere inside a nested container implements
//! [`Nest`]. Leaves carry no container capability; container levels expose a
//! [`Level`] which the view constructor uses to regroup a flat run of
//! elements into containers of one level up.

use core::any::{Any, TypeId, type_name};
use core::fmt;
use std::collections::VecDeque;

use crate::{InitError, Result};

/// A value moved between levels while a shape is assembled.
pub(crate) type Erased = Box<dyn Any>;

// ---------- Traits: Nest / FromExact ----------

/// A type that can occupy a position in a nested shape.
///
/// Every position has a zero value (`Default`) and a runtime identity
/// (`Any`). Container types return `Some` from [`Nest::level`]; leaves keep
/// the default `None`. User leaf types usually get this impl from
/// `#[derive(Nest)]`.
pub trait Nest: Any + Default {
    /// Container capability of this type, `None` for leaves.
    fn level() -> Option<Level> {
        None
    }
}

/// Construction of a container from a run of elements whose capacity equals
/// its length.
///
/// Implementations must reuse the run's allocation as is: a container built
/// from `k` elements has room for exactly `k`. Zero-sized element types are
/// the exception: they never allocate and `Vec` reports `usize::MAX` capacity
/// for them, which is harmless since there is no memory to share.
pub trait FromExact<E>: Sized {
    fn from_exact(run: Vec<E>) -> Self;
}

impl<E> FromExact<E> for Vec<E> {
    #[inline]
    fn from_exact(run: Vec<E>) -> Self {
        run
    }
}

impl<E> FromExact<E> for Box<[E]> {
    #[inline]
    fn from_exact(run: Vec<E>) -> Self {
        run.into_boxed_slice()
    }
}

impl<E> FromExact<E> for VecDeque<E> {
    #[inline]
    fn from_exact(run: Vec<E>) -> Self {
        VecDeque::from(run)
    }
}

// ---------- Runtime descriptors: Level / Node ----------

/// Type-erased capabilities of one container level.
#[derive(Clone, Copy)]
pub struct Level {
    elem: fn() -> Node,
    group: fn(Erased, usize) -> Result<Erased>,
    seal: fn(Erased) -> Result<Erased>,
}

impl Level {
    /// Capability of container `C` holding elements of type `E`.
    pub fn of<C, E>() -> Self
    where
        C: Nest + FromExact<E>,
        E: Nest,
    {
        Self {
            elem: Node::of::<E>,
            group: group::<C, E>,
            seal: seal::<C, E>,
        }
    }

    /// Descriptor of the element type one level deeper.
    #[inline]
    pub fn elem(&self) -> Node {
        (self.elem)()
    }

    /// Split an erased `Vec<E>` of `m` elements into an erased `Vec<C>` of
    /// `m / k` containers of length `k`.
    #[inline]
    pub(crate) fn group(&self, run: Erased, k: usize) -> Result<Erased> {
        (self.group)(run, k)
    }

    /// Turn an erased `Vec<E>` into one erased `C`.
    #[inline]
    pub(crate) fn seal(&self, run: Erased) -> Result<Erased> {
        (self.seal)(run)
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level")
            .field("elem", &self.elem().name())
            .finish()
    }
}

/// Runtime descriptor of one type in a nesting chain.
#[derive(Clone, Copy)]
pub struct Node {
    name: &'static str,
    id: TypeId,
    level: Option<Level>,
    alloc: fn(usize) -> Result<Erased>,
}

impl Node {
    pub fn of<T: Nest>() -> Self {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
            level: T::level(),
            alloc: alloc::<T>,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.level.is_some()
    }

    /// Whether this node describes `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Erased `Vec` of `n` default values of this type, capacity exactly `n`.
    ///
    /// Fails with `Overflow` when `n` values do not fit in an allocation.
    #[inline]
    pub(crate) fn alloc(&self, n: usize) -> Result<Erased> {
        (self.alloc)(n)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("container", &self.is_container())
            .finish()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Node {}

// ---------- Erased operations ----------

fn alloc<T: Nest>(n: usize) -> Result<Erased> {
    fits::<T>(n)?;
    let mut cells: Vec<T> = Vec::with_capacity(n);
    cells.resize_with(n, T::default);
    Ok(Box::new(cells))
}

/// `n` values of `T` stay within the `isize::MAX` byte limit of one allocation.
fn fits<T>(n: usize) -> Result<()> {
    match n.checked_mul(size_of::<T>()) {
        Some(bytes) if bytes <= isize::MAX as usize => Ok(()),
        _ => Err(InitError::Overflow),
    }
}

fn group<C, E>(run: Erased, k: usize) -> Result<Erased>
where
    C: Nest + FromExact<E>,
    E: Nest,
{
    let run = unerase::<Vec<E>>(run, type_name::<C>())?;
    let count = run.len() / k;
    fits::<C>(count)?;
    let mut cells = run.into_iter();
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let mut chunk = Vec::with_capacity(k);
        chunk.extend(cells.by_ref().take(k));
        out.push(C::from_exact(chunk));
    }
    Ok(Box::new(out))
}

fn seal<C, E>(run: Erased) -> Result<Erased>
where
    C: Nest + FromExact<E>,
    E: Nest,
{
    let run = unerase::<Vec<E>>(run, type_name::<C>())?;
    Ok(Box::new(C::from_exact(run)))
}

/// Recover a concrete value from an erased one built for `context`.
pub(crate) fn unerase<T: Any>(value: Erased, context: &'static str) -> Result<T> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| InitError::BadTarget {
            target: context,
            reason: format!("expected `{}` while assembling", type_name::<T>()),
        })
}

// ---------- Leaf types ----------

macro_rules! impl_nest_leaf {
    ($($t:ty),* $(,)?) => {
        $( impl Nest for $t {} )*
    };
}
impl_nest_leaf!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    String, (),
);

impl<T: 'static> Nest for Option<T> {}

// ---------- Container types ----------

impl<T: Nest> Nest for Vec<T> {
    fn level() -> Option<Level> {
        Some(Level::of::<Self, T>())
    }
}

impl<T: Nest> Nest for Box<[T]> {
    fn level() -> Option<Level> {
        Some(Level::of::<Self, T>())
    }
}

impl<T: Nest> Nest for VecDeque<T> {
    fn level() -> Option<Level> {
        Some(Level::of::<Self, T>())
    }
}
