//! Chain operations. Every call carries the live index; nodes forward until it matches.
//!
//! The chain never knows which arm is live. All of these are `unsafe fn`: the
//! caller (normally [`Choice`](crate::choice::Choice)) guarantees the cell
//! state each operation expects.

use core::cmp::Ordering;
use core::fmt;
use core::hash::Hasher;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// A recursive aliased-storage chain.
///
/// Lifecycle per instance: vacant -> `construct`/`*_construct` at `i` ->
/// live at `i` -> `destroy(i)` or a move out -> vacant.
pub trait Chain: sealed::Sealed + Sized {
    /// Position of this node in the full chain.
    const POSITION: usize;
    /// Arms from this node to the terminal node, inclusive.
    const LEN: usize;
    /// Structural fold of `core::mem::needs_drop` over every payload.
    ///
    /// Never `false` when any payload has drop glue.
    const NEEDS_DROP: bool;

    /// A chain with no valid interpretation.
    fn vacant() -> Self;

    /// Tears down the payload at `index`. Every node passed through releases
    /// its "cell holds the next node" interpretation on the way back out.
    ///
    /// # Safety
    /// The chain must be live at `index`. Afterwards it is vacant.
    unsafe fn destroy(&mut self, index: usize);

    /// Moves the payload at `index` out of `from` into `self`.
    ///
    /// # Safety
    /// `self` must be vacant, `from` live at `index`. Afterwards `self` is
    /// live at `index` and `from` is vacant: its owner must not destroy it.
    unsafe fn move_construct(&mut self, index: usize, from: &mut Self);

    /// Move-assigns the payload at `index` from `from` into the payload
    /// already live in `self`, dropping the previous value.
    ///
    /// # Safety
    /// Both chains must be live at `index`. Afterwards `from` is vacant.
    unsafe fn move_assign(&mut self, index: usize, from: &mut Self);
}

/// Chains whose payloads are all `Clone`.
pub trait ChainClone: Chain {
    /// # Safety
    /// `self` must be vacant, `from` live at `index`.
    unsafe fn clone_construct(&mut self, index: usize, from: &Self);

    /// Uses the payload's `clone_from`.
    ///
    /// # Safety
    /// Both chains must be live at `index`.
    unsafe fn clone_assign(&mut self, index: usize, from: &Self);
}

/// Chains whose payloads are all `Copy`.
///
/// Implemented structurally, so a chain is `ChainCopy` exactly when every
/// declared payload is. Copies collapse to a bit copy of the whole cell.
pub trait ChainCopy: ChainClone + Copy {
    /// # Safety
    /// `from` must be live at `index`.
    #[inline(always)]
    unsafe fn copy_construct(&mut self, index: usize, from: &Self) {
        debug_assert!(index >= Self::POSITION && index < Self::POSITION + Self::LEN);
        *self = *from;
    }

    /// # Safety
    /// Both chains must be live at `index`.
    #[inline(always)]
    unsafe fn copy_assign(&mut self, index: usize, from: &Self) {
        debug_assert!(index >= Self::POSITION && index < Self::POSITION + Self::LEN);
        *self = *from;
    }
}

/// Structural equality of the arm at `index`.
///
/// `Rhs` may be a different chain of the same length whose payloads compare
/// against ours position by position.
pub trait ChainPartialEq<Rhs: Chain = Self>: Chain {
    /// # Safety
    /// Both chains must be live at `index`.
    unsafe fn eq(&self, index: usize, other: &Rhs) -> bool;
}

/// Marker: every payload is `Eq`.
pub trait ChainEq: ChainPartialEq {}

pub trait ChainPartialOrd<Rhs: Chain = Self>: ChainPartialEq<Rhs> {
    /// # Safety
    /// Both chains must be live at `index`.
    unsafe fn partial_ord(&self, index: usize, other: &Rhs) -> Option<Ordering>;
}

pub trait ChainOrd: ChainEq + ChainPartialOrd {
    /// # Safety
    /// Both chains must be live at `index`.
    unsafe fn ord(&self, index: usize, other: &Self) -> Ordering;
}

/// See [`WeakOrd`](crate::ops::WeakOrd).
pub trait ChainWeakOrd: Chain {
    /// # Safety
    /// Both chains must be live at `index`.
    unsafe fn weak_ord(&self, index: usize, other: &Self) -> Ordering;
}

pub trait ChainHash: Chain {
    /// # Safety
    /// The chain must be live at `index`.
    unsafe fn hash<H: Hasher>(&self, index: usize, state: &mut H);
}

pub trait ChainDebug: Chain {
    /// Formats the payload at `index`.
    ///
    /// # Safety
    /// The chain must be live at `index`.
    unsafe fn fmt_arm(&self, index: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}
