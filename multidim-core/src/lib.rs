//! multidim-core: allocate and fill nested containers of any rank
//!
//! This crate defines:
//! - [`Nest`] (how a type takes part in a nested shape) and its runtime
//!   descriptors [`Node`] / [`Level`]
//! - [`shape::resolve`], which validates requested dimensions against a
//!   target type
//! - a bottom-up view constructor that cuts one flat buffer into rows with no
//!   spare capacity
//! - [`Initializer`], the six ways of filling leaves, and the [`Odometer`]
//!   that feeds coordinates to the indexed forms
//! - (feature "nalgebra"): export of 2-D shapes to `DMatrix`
//!
//! ```
//! use multidim_core::{Initializer, init};
//!
//! let mut a: Vec<Vec<usize>> = Vec::new();
//! init(&mut a, Initializer::indexed(|c| 2 * c[0] + c[1] + 1), &[3, 2]).unwrap();
//! assert_eq!(a, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
//! ```
//!
//! User leaf types join in through `#[derive(Nest)]` from `multidim-derive`.

use core::any::type_name;

use thiserror::Error;

pub mod dispatch;
pub mod nest;
pub mod shape;
mod view;

pub use dispatch::{Initializer, InitializerKind, Odometer};
pub use nest::{FromExact, Level, Nest, Node};
pub use shape::Shape;

// ---------- Core error/result ----------

#[derive(Debug, Error)]
pub enum InitError {
    /// The target type does not nest as deep as requested.
    #[error("{target}: {reason}")]
    BadTarget {
        target: &'static str,
        reason: String,
    },
    /// A dimension size is zero or negative. `dim` is 1-based.
    #[error("dimension {dim}: invalid size {size}")]
    BadDimension { dim: usize, size: isize },
    /// The initializer cannot fill this shape.
    #[error("{kind} initializer is not handled: {reason}")]
    BadInitializer {
        kind: InitializerKind,
        reason: String,
    },
    #[error("dimension product overflows usize")]
    Overflow,
}
pub type Result<T> = core::result::Result<T, InitError>;

// ---------- Entry points ----------

/// Allocate `target` with the shape `dims` and fill every leaf.
///
/// With no dimensions the target itself is the single leaf. Otherwise the
/// target's type must nest at least `dims.len()` container levels deep and
/// `L` must be the element type found at that depth (unless the initializer
/// is [`Initializer::None`], which leaves default values).
///
/// On error `target` is left untouched.
pub fn init<T, L>(target: &mut T, initializer: Initializer<'_, L>, dims: &[isize]) -> Result<()>
where
    T: Nest,
    L: Nest + Clone,
{
    let kind = initializer.kind();
    if dims.is_empty() {
        tracing::trace!(target_type = type_name::<T>(), %kind, "initializing single value");
        return dispatch::apply_single(target, initializer)
            .inspect_err(|err| tracing::debug!(%err, "initializer rejected"));
    }

    let shape = shape::resolve::<T>(dims)
        .inspect_err(|err| tracing::debug!(%err, ?dims, "shape rejected"))?;
    tracing::debug!(
        target_type = shape.target(),
        leaf = shape.leaf().name(),
        dims = ?shape.dims(),
        leaves = shape.len(),
        %kind,
        "initializing nested container"
    );
    let cells = dispatch::populate(&shape, initializer)
        .inspect_err(|err| tracing::debug!(%err, "initializer rejected"))?;
    *target = view::assemble::<T>(&shape, cells)?;
    Ok(())
}

/// Like [`init`] with an absent initializer: every leaf keeps its default.
pub fn init_default<T: Nest>(target: &mut T, dims: &[isize]) -> Result<()> {
    init(target, Initializer::<()>::None, dims)
}

/// Build a fresh `T` of shape `dims`.
pub fn build<T, L>(initializer: Initializer<'_, L>, dims: &[isize]) -> Result<T>
where
    T: Nest,
    L: Nest + Clone,
{
    let mut target = T::default();
    init(&mut target, initializer, dims)?;
    Ok(target)
}

/// Row-major buffer of `product(dims)` leaves, filled like [`init`] would
/// fill the leaves of a nested shape.
pub fn flat<L>(initializer: Initializer<'_, L>, dims: &[isize]) -> Result<Vec<L>>
where
    L: Nest + Clone,
{
    let shape = Shape::flat::<L>(dims)?;
    let cells = dispatch::populate(&shape, initializer)?;
    nest::unerase(cells, shape.target())
}

// ---------- (feature) nalgebra interop ----------

#[cfg(feature = "nalgebra")]
pub mod na_types {
    use core::any::type_name;

    use super::*;
    use nalgebra as na;

    /// A `rows x cols` matrix whose entries come from `initializer`.
    /// Indexed forms receive `[row, col]`.
    pub fn dmatrix<L>(
        initializer: Initializer<'_, L>,
        rows: usize,
        cols: usize,
    ) -> Result<na::DMatrix<L>>
    where
        L: na::Scalar + Nest,
    {
        let dims = [
            isize::try_from(rows).map_err(|_| InitError::Overflow)?,
            isize::try_from(cols).map_err(|_| InitError::Overflow)?,
        ];
        let cells = flat(initializer, &dims)?;
        Ok(na::DMatrix::from_row_slice(rows, cols, &cells))
    }

    /// Copy a two-level nested shape into a matrix, one row per inner vector.
    pub fn from_rows<L: na::Scalar>(rows: &[Vec<L>]) -> Result<na::DMatrix<L>> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(i) = rows.iter().position(|row| row.len() != cols) {
            return Err(InitError::BadTarget {
                target: type_name::<Vec<Vec<L>>>(),
                reason: format!(
                    "row {i} has {} columns, expected {cols}",
                    rows[i].len()
                ),
            });
        }
        Ok(na::DMatrix::from_fn(rows.len(), cols, |i, j| {
            rows[i][j].clone()
        }))
    }
}

// Re-export commonly used items for convenience in downstream code.
pub mod prelude {
    #[cfg(feature = "nalgebra")]
    pub use super::na_types::*;
    pub use super::{
        FromExact, InitError, Initializer, InitializerKind, Nest, Odometer, Result, build, flat,
        init, init_default,
    };
}
