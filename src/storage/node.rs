//! Chain nodes. One union per arm: payload here, or the rest of the chain.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{self, ManuallyDrop};

use super::chain::{
    sealed, Chain, ChainClone, ChainCopy, ChainDebug, ChainEq, ChainHash, ChainOrd,
    ChainPartialEq, ChainPartialOrd, ChainWeakOrd,
};
use crate::ops::WeakOrd;

/// Node at position `I`: the cell holds arm `I`'s payload `P`, or the
/// successor chain `R` for arms `I + 1..`.
#[repr(C)]
pub union Node<const I: usize, P, R> {
    pub(crate) vacant: (),
    pub(crate) here: ManuallyDrop<P>,
    pub(crate) more: ManuallyDrop<R>,
}

/// Terminal node at position `I`. No successor.
#[repr(C)]
pub union Last<const I: usize, P> {
    pub(crate) vacant: (),
    pub(crate) here: ManuallyDrop<P>,
}

impl<const I: usize, P, R> sealed::Sealed for Node<I, P, R> {}
impl<const I: usize, P> sealed::Sealed for Last<I, P> {}

impl<const I: usize, P, R: Chain> Node<I, P, R> {
    const LINKED: () = assert!(
        R::POSITION == I + 1,
        "chain successor must sit at the next position"
    );
}

impl<const I: usize, P> Last<I, P> {
    /// The one runtime check in the chain. An index that reaches the
    /// terminal node and is not its position means the caller's discriminant
    /// is corrupt; carrying on would reinterpret garbage.
    #[inline(always)]
    #[track_caller]
    fn check(index: usize) {
        assert!(
            index == I,
            "arm index {} reached terminal arm {}: discriminant is corrupt",
            index,
            I
        );
    }
}

impl<const I: usize, P: Copy, R: Copy> Clone for Node<I, P, R> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<const I: usize, P: Copy, R: Copy> Copy for Node<I, P, R> {}

impl<const I: usize, P: Copy> Clone for Last<I, P> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<const I: usize, P: Copy> Copy for Last<I, P> {}

impl<const I: usize, P, R: Chain> Chain for Node<I, P, R> {
    const POSITION: usize = I;
    const LEN: usize = 1 + R::LEN;
    const NEEDS_DROP: bool = mem::needs_drop::<P>() || R::NEEDS_DROP;

    #[inline(always)]
    fn vacant() -> Self {
        let () = Self::LINKED;
        Node { vacant: () }
    }

    #[inline]
    unsafe fn destroy(&mut self, index: usize) {
        if !Self::NEEDS_DROP {
            return;
        }
        if index == I {
            unsafe { ManuallyDrop::drop(&mut self.here) };
        } else {
            unsafe { R::destroy(&mut *self.more, index) };
        }
        self.vacant = ();
    }

    #[inline]
    unsafe fn move_construct(&mut self, index: usize, from: &mut Self) {
        if index == I {
            self.here = ManuallyDrop::new(unsafe { ManuallyDrop::take(&mut from.here) });
        } else {
            // Establish "cell holds the next node" before recursing into it.
            self.more = ManuallyDrop::new(R::vacant());
            unsafe { R::move_construct(&mut *self.more, index, &mut *from.more) };
        }
        from.vacant = ();
    }

    #[inline]
    unsafe fn move_assign(&mut self, index: usize, from: &mut Self) {
        if index == I {
            let incoming = unsafe { ManuallyDrop::take(&mut from.here) };
            unsafe { *self.here = incoming };
        } else {
            unsafe { R::move_assign(&mut *self.more, index, &mut *from.more) };
        }
        from.vacant = ();
    }
}

impl<const I: usize, P> Chain for Last<I, P> {
    const POSITION: usize = I;
    const LEN: usize = 1;
    const NEEDS_DROP: bool = mem::needs_drop::<P>();

    #[inline(always)]
    fn vacant() -> Self {
        Last { vacant: () }
    }

    #[inline]
    unsafe fn destroy(&mut self, index: usize) {
        if !Self::NEEDS_DROP {
            return;
        }
        Self::check(index);
        unsafe { ManuallyDrop::drop(&mut self.here) };
        self.vacant = ();
    }

    #[inline]
    unsafe fn move_construct(&mut self, index: usize, from: &mut Self) {
        Self::check(index);
        self.here = ManuallyDrop::new(unsafe { ManuallyDrop::take(&mut from.here) });
        from.vacant = ();
    }

    #[inline]
    unsafe fn move_assign(&mut self, index: usize, from: &mut Self) {
        Self::check(index);
        let incoming = unsafe { ManuallyDrop::take(&mut from.here) };
        unsafe { *self.here = incoming };
        from.vacant = ();
    }
}

impl<const I: usize, P: Clone, R: ChainClone> ChainClone for Node<I, P, R> {
    #[inline]
    unsafe fn clone_construct(&mut self, index: usize, from: &Self) {
        if index == I {
            self.here = ManuallyDrop::new(P::clone(unsafe { &*from.here }));
        } else {
            self.more = ManuallyDrop::new(R::vacant());
            unsafe { R::clone_construct(&mut *self.more, index, &*from.more) };
        }
    }

    #[inline]
    unsafe fn clone_assign(&mut self, index: usize, from: &Self) {
        if index == I {
            unsafe { P::clone_from(&mut *self.here, &*from.here) };
        } else {
            unsafe { R::clone_assign(&mut *self.more, index, &*from.more) };
        }
    }
}

impl<const I: usize, P: Clone> ChainClone for Last<I, P> {
    #[inline]
    unsafe fn clone_construct(&mut self, index: usize, from: &Self) {
        Self::check(index);
        self.here = ManuallyDrop::new(P::clone(unsafe { &*from.here }));
    }

    #[inline]
    unsafe fn clone_assign(&mut self, index: usize, from: &Self) {
        Self::check(index);
        unsafe { P::clone_from(&mut *self.here, &*from.here) };
    }
}

impl<const I: usize, P: Copy, R: ChainCopy> ChainCopy for Node<I, P, R> {}
impl<const I: usize, P: Copy> ChainCopy for Last<I, P> {}

impl<const I: usize, P, R, Q, T> ChainPartialEq<Node<I, Q, T>> for Node<I, P, R>
where
    P: PartialEq<Q>,
    R: ChainPartialEq<T>,
    T: Chain,
{
    #[inline]
    unsafe fn eq(&self, index: usize, other: &Node<I, Q, T>) -> bool {
        if index == I {
            unsafe { P::eq(&*self.here, &*other.here) }
        } else {
            unsafe { R::eq(&*self.more, index, &*other.more) }
        }
    }
}

impl<const I: usize, P: PartialEq<Q>, Q> ChainPartialEq<Last<I, Q>> for Last<I, P> {
    #[inline]
    unsafe fn eq(&self, index: usize, other: &Last<I, Q>) -> bool {
        Self::check(index);
        unsafe { P::eq(&*self.here, &*other.here) }
    }
}

impl<const I: usize, P: Eq, R: ChainEq> ChainEq for Node<I, P, R> {}
impl<const I: usize, P: Eq> ChainEq for Last<I, P> {}

impl<const I: usize, P, R, Q, T> ChainPartialOrd<Node<I, Q, T>> for Node<I, P, R>
where
    P: PartialOrd<Q>,
    R: ChainPartialOrd<T>,
    T: Chain,
{
    #[inline]
    unsafe fn partial_ord(&self, index: usize, other: &Node<I, Q, T>) -> Option<Ordering> {
        if index == I {
            unsafe { P::partial_cmp(&*self.here, &*other.here) }
        } else {
            unsafe { R::partial_ord(&*self.more, index, &*other.more) }
        }
    }
}

impl<const I: usize, P: PartialOrd<Q>, Q> ChainPartialOrd<Last<I, Q>> for Last<I, P> {
    #[inline]
    unsafe fn partial_ord(&self, index: usize, other: &Last<I, Q>) -> Option<Ordering> {
        Self::check(index);
        unsafe { P::partial_cmp(&*self.here, &*other.here) }
    }
}

impl<const I: usize, P: Ord, R: ChainOrd> ChainOrd for Node<I, P, R> {
    #[inline]
    unsafe fn ord(&self, index: usize, other: &Self) -> Ordering {
        if index == I {
            unsafe { P::cmp(&*self.here, &*other.here) }
        } else {
            unsafe { R::ord(&*self.more, index, &*other.more) }
        }
    }
}

impl<const I: usize, P: Ord> ChainOrd for Last<I, P> {
    #[inline]
    unsafe fn ord(&self, index: usize, other: &Self) -> Ordering {
        Self::check(index);
        unsafe { P::cmp(&*self.here, &*other.here) }
    }
}

impl<const I: usize, P: WeakOrd, R: ChainWeakOrd> ChainWeakOrd for Node<I, P, R> {
    #[inline]
    unsafe fn weak_ord(&self, index: usize, other: &Self) -> Ordering {
        if index == I {
            unsafe { P::weak_cmp(&*self.here, &*other.here) }
        } else {
            unsafe { R::weak_ord(&*self.more, index, &*other.more) }
        }
    }
}

impl<const I: usize, P: WeakOrd> ChainWeakOrd for Last<I, P> {
    #[inline]
    unsafe fn weak_ord(&self, index: usize, other: &Self) -> Ordering {
        Self::check(index);
        unsafe { P::weak_cmp(&*self.here, &*other.here) }
    }
}

impl<const I: usize, P: Hash, R: ChainHash> ChainHash for Node<I, P, R> {
    #[inline]
    unsafe fn hash<H: Hasher>(&self, index: usize, state: &mut H) {
        if index == I {
            unsafe { P::hash(&*self.here, state) }
        } else {
            unsafe { R::hash(&*self.more, index, state) }
        }
    }
}

impl<const I: usize, P: Hash> ChainHash for Last<I, P> {
    #[inline]
    unsafe fn hash<H: Hasher>(&self, index: usize, state: &mut H) {
        Self::check(index);
        unsafe { P::hash(&*self.here, state) }
    }
}

impl<const I: usize, P: fmt::Debug, R: ChainDebug> ChainDebug for Node<I, P, R> {
    unsafe fn fmt_arm(&self, index: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if index == I {
            unsafe { P::fmt(&*self.here, f) }
        } else {
            unsafe { R::fmt_arm(&*self.more, index, f) }
        }
    }
}

impl<const I: usize, P: fmt::Debug> ChainDebug for Last<I, P> {
    unsafe fn fmt_arm(&self, index: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::check(index);
        unsafe { P::fmt(&*self.here, f) }
    }
}
