//! Indexed accessor. Walks the chain at compile time; no runtime check at all.

use core::mem::ManuallyDrop;

use super::chain::Chain;
use super::node::{Last, Node};
use crate::meta::{S, Z};

/// Typed access to arm `N` (a Peano index, relative to this node).
///
/// Nothing here checks that arm `N` is the live one. Getting that wrong is
/// undefined behaviour; callers match on the discriminant first.
pub trait Locate<N>: Chain {
    type Payload;

    /// # Safety
    /// The chain must be live at arm `N`.
    unsafe fn accessor(&self) -> &Self::Payload;

    /// # Safety
    /// The chain must be live at arm `N`.
    unsafe fn accessor_mut(&mut self) -> &mut Self::Payload;

    /// Establishes every passed-through node, then writes `payload` in place.
    ///
    /// # Safety
    /// The chain must be vacant.
    unsafe fn construct(&mut self, payload: Self::Payload);

    /// Assigns over the live payload with the payload's own assignment.
    ///
    /// # Safety
    /// The chain must be live at arm `N`.
    #[inline]
    unsafe fn assign(&mut self, payload: Self::Payload) {
        unsafe { *<Self as Locate<N>>::accessor_mut(self) = payload };
    }

    /// Moves the payload out. The chain is vacant afterwards.
    ///
    /// # Safety
    /// The chain must be live at arm `N`.
    unsafe fn take(&mut self) -> Self::Payload;
}

impl<const I: usize, P, R: Chain> Locate<Z> for Node<I, P, R> {
    type Payload = P;

    #[inline(always)]
    unsafe fn accessor(&self) -> &P {
        unsafe { &*self.here }
    }

    #[inline(always)]
    unsafe fn accessor_mut(&mut self) -> &mut P {
        unsafe { &mut *self.here }
    }

    #[inline(always)]
    unsafe fn construct(&mut self, payload: P) {
        self.here = ManuallyDrop::new(payload);
    }

    #[inline(always)]
    unsafe fn take(&mut self) -> P {
        let payload = unsafe { ManuallyDrop::take(&mut self.here) };
        self.vacant = ();
        payload
    }
}

impl<const I: usize, P, R: Locate<N>, N> Locate<S<N>> for Node<I, P, R> {
    type Payload = R::Payload;

    #[inline(always)]
    unsafe fn accessor(&self) -> &R::Payload {
        unsafe { R::accessor(&*self.more) }
    }

    #[inline(always)]
    unsafe fn accessor_mut(&mut self) -> &mut R::Payload {
        unsafe { R::accessor_mut(&mut *self.more) }
    }

    #[inline(always)]
    unsafe fn construct(&mut self, payload: R::Payload) {
        self.more = ManuallyDrop::new(R::vacant());
        unsafe { R::construct(&mut *self.more, payload) };
    }

    #[inline(always)]
    unsafe fn take(&mut self) -> R::Payload {
        let payload = unsafe { R::take(&mut *self.more) };
        self.vacant = ();
        payload
    }
}

impl<const I: usize, P> Locate<Z> for Last<I, P> {
    type Payload = P;

    #[inline(always)]
    unsafe fn accessor(&self) -> &P {
        unsafe { &*self.here }
    }

    #[inline(always)]
    unsafe fn accessor_mut(&mut self) -> &mut P {
        unsafe { &mut *self.here }
    }

    #[inline(always)]
    unsafe fn construct(&mut self, payload: P) {
        self.here = ManuallyDrop::new(payload);
    }

    #[inline(always)]
    unsafe fn take(&mut self) -> P {
        let payload = unsafe { ManuallyDrop::take(&mut self.here) };
        self.vacant = ();
        payload
    }
}
