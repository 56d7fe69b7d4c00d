//! Choice: the discriminant plus one storage chain. The only caller of the chain.

pub mod relocate;

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop};

use crate::meta::{Discriminant, Index, NoPayload, PayloadOf, Select, Variants};
use crate::ops::WeakOrd;
use crate::storage::{
    Chain, ChainClone, ChainCopy, ChainDebug, ChainEq, ChainHash, ChainOrd, ChainPartialEq,
    ChainPartialOrd, ChainWeakOrd, Locate,
};

/// Why a checked access failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChoiceError {
    /// A different arm is live.
    TagMismatch = 1,
    /// The value was moved out of.
    MovedFrom = 2,
    /// Destination buffer too small.
    CapacityExceeded = 3,
}

impl fmt::Display for ChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChoiceError::TagMismatch => "a different arm is live",
            ChoiceError::MovedFrom => "value was moved from",
            ChoiceError::CapacityExceeded => "destination capacity exceeded",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChoiceError {}

/// A tagged union over the arms declared by `V`.
///
/// Holds exactly one arm at a time. `index` is the single source of truth
/// for which one; the storage chain never records it. It is stored in the
/// narrowest integer that fits the arm count, whose maximum marks a
/// moved-from value.
///
/// Comparisons order by arm (declaration order) first, then by payload.
pub struct Choice<V: Variants> {
    storage: V::Storage,
    index: V::Discriminant,
    _variants: PhantomData<fn() -> V>,
}

impl<V: Variants> Choice<V> {
    const LINKED: () = {
        assert!(
            V::TAGS.len() == <V::Storage as Chain>::LEN,
            "tag list and storage chain disagree on the number of arms"
        );
        assert!(
            V::TAGS.len() <= <V::Discriminant as Discriminant>::MAX_ARMS,
            "discriminant type too narrow for the number of arms"
        );
    };

    /// Discriminant of a value whose arm was moved out. Never a valid index.
    const MOVED_FROM: V::Discriminant = <V::Discriminant as Discriminant>::MOVED_FROM;

    /// `true` when no payload has drop glue, so teardown compiles to nothing.
    pub const TRIVIALLY_DESTRUCTIBLE: bool = !<V::Storage as Chain>::NEEDS_DROP;

    #[inline(always)]
    fn from_parts(storage: V::Storage, index: V::Discriminant) -> Self {
        let () = Self::LINKED;
        Self {
            storage,
            index,
            _variants: PhantomData,
        }
    }

    /// Builds a value with arm `S` live.
    #[inline]
    pub fn with<S>(payload: PayloadOf<V, S>) -> Self
    where
        S: Select<V>,
        V::Storage: Locate<S::Index>,
    {
        let mut storage = <V::Storage as Chain>::vacant();
        unsafe { <V::Storage as Locate<S::Index>>::construct(&mut storage, payload) };
        Self::from_parts(storage, Discriminant::from_index(S::Index::VALUE))
    }

    /// Builds a value with the payload-less arm `S` live.
    #[inline]
    pub fn with_empty<S>() -> Self
    where
        S: Select<V>,
        V::Storage: Locate<S::Index, Payload = NoPayload>,
    {
        Self::with::<S>(NoPayload)
    }

    /// Tag of the live arm.
    ///
    /// # Panics
    /// If the value was moved from.
    #[inline]
    #[track_caller]
    pub fn which(&self) -> V::Tag {
        self.check_live();
        V::TAGS[self.raw()]
    }

    /// Position of the live arm.
    ///
    /// # Panics
    /// If the value was moved from.
    #[inline]
    #[track_caller]
    pub fn index(&self) -> usize {
        self.check_live();
        self.raw()
    }

    #[inline(always)]
    pub fn is<S: Select<V>>(&self) -> bool {
        self.raw() == S::Index::VALUE
    }

    #[inline(always)]
    pub fn is_moved_from(&self) -> bool {
        self.index == Self::MOVED_FROM
    }

    /// Payload of arm `S`.
    ///
    /// # Panics
    /// If `S` is not the live arm.
    #[inline]
    #[track_caller]
    pub fn as_arm<S>(&self) -> &PayloadOf<V, S>
    where
        S: Select<V>,
        V::Storage: Locate<S::Index>,
    {
        self.expect_arm::<S>();
        unsafe { <V::Storage as Locate<S::Index>>::accessor(&self.storage) }
    }

    /// Mutable payload of arm `S`.
    ///
    /// # Panics
    /// If `S` is not the live arm.
    #[inline]
    #[track_caller]
    pub fn as_arm_mut<S>(&mut self) -> &mut PayloadOf<V, S>
    where
        S: Select<V>,
        V::Storage: Locate<S::Index>,
    {
        self.expect_arm::<S>();
        unsafe { <V::Storage as Locate<S::Index>>::accessor_mut(&mut self.storage) }
    }

    #[inline]
    pub fn get<S>(&self) -> Option<&PayloadOf<V, S>>
    where
        S: Select<V>,
        V::Storage: Locate<S::Index>,
    {
        self.try_as_arm::<S>().ok()
    }

    #[inline]
    pub fn get_mut<S>(&mut self) -> Option<&mut PayloadOf<V, S>>
    where
        S: Select<V>,
        V::Storage: Locate<S::Index>,
    {
        self.try_as_arm_mut::<S>().ok()
    }

    pub fn try_as_arm<S>(&self) -> Result<&PayloadOf<V, S>, ChoiceError>
    where
        S: Select<V>,
        V::Storage: Locate<S::Index>,
    {
        self.probe::<S>()?;
        Ok(unsafe { <V::Storage as Locate<S::Index>>::accessor(&self.storage) })
    }

    pub fn try_as_arm_mut<S>(&mut self) -> Result<&mut PayloadOf<V, S>, ChoiceError>
    where
        S: Select<V>,
        V::Storage: Locate<S::Index>,
    {
        self.probe::<S>()?;
        Ok(unsafe { <V::Storage as Locate<S::Index>>::accessor_mut(&mut self.storage) })
    }

    /// # Safety
    /// `S` must be the live arm.
    #[inline(always)]
    pub unsafe fn get_unchecked<S>(&self) -> &PayloadOf<V, S>
    where
        S: Select<V>,
        V::Storage: Locate<S::Index>,
    {
        debug_assert_eq!(self.raw(), S::Index::VALUE);
        unsafe { <V::Storage as Locate<S::Index>>::accessor(&self.storage) }
    }

    /// # Safety
    /// `S` must be the live arm.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut<S>(&mut self) -> &mut PayloadOf<V, S>
    where
        S: Select<V>,
        V::Storage: Locate<S::Index>,
    {
        debug_assert_eq!(self.raw(), S::Index::VALUE);
        unsafe { <V::Storage as Locate<S::Index>>::accessor_mut(&mut self.storage) }
    }

    /// Moves the payload of arm `S` out.
    ///
    /// # Panics
    /// If `S` is not the live arm.
    #[track_caller]
    pub fn into_inner<S>(self) -> PayloadOf<V, S>
    where
        S: Select<V>,
        V::Storage: Locate<S::Index>,
    {
        self.expect_arm::<S>();
        let mut this = ManuallyDrop::new(self);
        unsafe { <V::Storage as Locate<S::Index>>::take(&mut this.storage) }
    }

    /// Moves the payload of arm `S` out, or hands the value back untouched.
    pub fn try_into_inner<S>(self) -> Result<PayloadOf<V, S>, Self>
    where
        S: Select<V>,
        V::Storage: Locate<S::Index>,
    {
        if self.probe::<S>().is_err() {
            return Err(self);
        }
        let mut this = ManuallyDrop::new(self);
        Ok(unsafe { <V::Storage as Locate<S::Index>>::take(&mut this.storage) })
    }

    /// Makes `S` the live arm.
    ///
    /// Same arm: the payload's own assignment. Different arm (or moved
    /// from): the old arm is destroyed before the new one is built.
    pub fn set<S>(&mut self, payload: PayloadOf<V, S>)
    where
        S: Select<V>,
        V::Storage: Locate<S::Index>,
    {
        let target = S::Index::VALUE;
        if self.raw() == target {
            unsafe { <V::Storage as Locate<S::Index>>::assign(&mut self.storage, payload) };
        } else {
            self.vacate();
            unsafe { <V::Storage as Locate<S::Index>>::construct(&mut self.storage, payload) };
            self.index = Discriminant::from_index(target);
        }
    }

    pub fn set_empty<S>(&mut self)
    where
        S: Select<V>,
        V::Storage: Locate<S::Index, Payload = NoPayload>,
    {
        self.set::<S>(NoPayload);
    }

    /// Moves the live arm into a new value. `self` is left moved-from.
    ///
    /// # Panics
    /// If `self` was already moved from.
    #[track_caller]
    pub fn take(&mut self) -> Self {
        self.check_live();
        let index = mem::replace(&mut self.index, Self::MOVED_FROM);
        let mut storage = <V::Storage as Chain>::vacant();
        unsafe { storage.move_construct(index.get(), &mut self.storage) };
        Self::from_parts(storage, index)
    }

    /// Move-assigns from `other`, leaving it moved-from.
    ///
    /// # Panics
    /// If `other` was already moved from.
    #[track_caller]
    pub fn move_from(&mut self, other: &mut Self) {
        other.check_live();
        let incoming = mem::replace(&mut other.index, Self::MOVED_FROM);
        if self.index == incoming {
            unsafe { self.storage.move_assign(incoming.get(), &mut other.storage) };
        } else {
            self.vacate();
            unsafe { self.storage.move_construct(incoming.get(), &mut other.storage) };
            self.index = incoming;
        }
    }

    /// Destroys the live arm, if any. The discriminant is parked on
    /// `MOVED_FROM` first so a panicking payload destructor cannot lead to
    /// a second teardown of the same arm.
    #[inline]
    fn vacate(&mut self) {
        let old = mem::replace(&mut self.index, Self::MOVED_FROM);
        if old != Self::MOVED_FROM {
            unsafe { self.storage.destroy(old.get()) };
        }
    }

    #[inline(always)]
    fn raw(&self) -> usize {
        self.index.get()
    }

    #[inline(always)]
    #[track_caller]
    fn check_live(&self) {
        assert!(!self.is_moved_from(), "use of a moved-from Choice");
    }

    #[inline(always)]
    #[track_caller]
    fn expect_arm<S: Select<V>>(&self) {
        self.check_live();
        assert!(
            self.raw() == S::Index::VALUE,
            "wrong arm: {:?} is live, {:?} was requested",
            V::TAGS[self.raw()],
            S::TAG
        );
    }

    #[inline(always)]
    fn probe<S: Select<V>>(&self) -> Result<(), ChoiceError> {
        if self.is_moved_from() {
            Err(ChoiceError::MovedFrom)
        } else if self.raw() != S::Index::VALUE {
            Err(ChoiceError::TagMismatch)
        } else {
            Ok(())
        }
    }
}

impl<V: Variants> Choice<V>
where
    V::Storage: ChainCopy,
{
    /// Bit copy. Only available when every payload is `Copy`.
    #[inline]
    #[track_caller]
    pub fn copied(&self) -> Self {
        self.check_live();
        let mut storage = <V::Storage as Chain>::vacant();
        unsafe { storage.copy_construct(self.raw(), &self.storage) };
        Self::from_parts(storage, self.index)
    }

    #[inline]
    #[track_caller]
    pub fn copy_from(&mut self, other: &Self) {
        other.check_live();
        if self.index == other.index {
            unsafe { self.storage.copy_assign(other.raw(), &other.storage) };
        } else {
            self.vacate();
            unsafe { self.storage.copy_construct(other.raw(), &other.storage) };
            self.index = other.index;
        }
    }
}

impl<V: Variants> Drop for Choice<V> {
    #[inline]
    fn drop(&mut self) {
        if <V::Storage as Chain>::NEEDS_DROP && !self.is_moved_from() {
            unsafe { self.storage.destroy(self.raw()) };
        }
    }
}

impl<V: Variants> Clone for Choice<V>
where
    V::Storage: ChainClone,
{
    #[track_caller]
    fn clone(&self) -> Self {
        self.check_live();
        let mut storage = <V::Storage as Chain>::vacant();
        unsafe { storage.clone_construct(self.raw(), &self.storage) };
        Self::from_parts(storage, self.index)
    }

    #[track_caller]
    fn clone_from(&mut self, source: &Self) {
        source.check_live();
        if self.index == source.index {
            unsafe { self.storage.clone_assign(source.raw(), &source.storage) };
        } else {
            self.vacate();
            unsafe { self.storage.clone_construct(source.raw(), &source.storage) };
            self.index = source.index;
        }
    }
}

/// Two declarations compare when their chains line up position by position
/// and each payload compares against its counterpart.
impl<V: Variants, W: Variants> PartialEq<Choice<W>> for Choice<V>
where
    V::Storage: ChainPartialEq<W::Storage>,
{
    #[track_caller]
    fn eq(&self, other: &Choice<W>) -> bool {
        self.check_live();
        other.check_live();
        self.raw() == other.raw()
            && unsafe { ChainPartialEq::eq(&self.storage, self.raw(), &other.storage) }
    }
}

impl<V: Variants> Eq for Choice<V> where V::Storage: ChainEq {}

impl<V: Variants, W: Variants> PartialOrd<Choice<W>> for Choice<V>
where
    V::Storage: ChainPartialOrd<W::Storage>,
{
    #[track_caller]
    fn partial_cmp(&self, other: &Choice<W>) -> Option<Ordering> {
        self.check_live();
        other.check_live();
        match self.raw().cmp(&other.raw()) {
            Ordering::Equal => unsafe {
                ChainPartialOrd::partial_ord(&self.storage, self.raw(), &other.storage)
            },
            unequal => Some(unequal),
        }
    }
}

impl<V: Variants> Ord for Choice<V>
where
    V::Storage: ChainOrd,
{
    #[track_caller]
    fn cmp(&self, other: &Self) -> Ordering {
        self.check_live();
        other.check_live();
        match self.raw().cmp(&other.raw()) {
            Ordering::Equal => unsafe {
                ChainOrd::ord(&self.storage, self.raw(), &other.storage)
            },
            unequal => unequal,
        }
    }
}

impl<V: Variants> WeakOrd for Choice<V>
where
    V::Storage: ChainWeakOrd,
{
    #[track_caller]
    fn weak_cmp(&self, other: &Self) -> Ordering {
        self.check_live();
        other.check_live();
        match self.raw().cmp(&other.raw()) {
            Ordering::Equal => unsafe {
                ChainWeakOrd::weak_ord(&self.storage, self.raw(), &other.storage)
            },
            unequal => unequal,
        }
    }
}

impl<V: Variants> Hash for Choice<V>
where
    V::Storage: ChainHash,
{
    #[track_caller]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.check_live();
        self.raw().hash(state);
        unsafe { ChainHash::hash(&self.storage, self.raw(), state) };
    }
}

struct Arm<'a, C> {
    chain: &'a C,
    index: usize,
}

impl<C: ChainDebug> fmt::Debug for Arm<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        unsafe { self.chain.fmt_arm(self.index, f) }
    }
}

impl<V: Variants> fmt::Debug for Choice<V>
where
    V::Storage: ChainDebug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_moved_from() {
            return f.write_str("Choice(<moved>)");
        }
        f.debug_tuple("Choice")
            .field(&V::TAGS[self.raw()])
            .field(&Arm {
                chain: &self.storage,
                index: self.raw(),
            })
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Bump(Rc<Cell<usize>>);

    impl Drop for Bump {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    crate::variants! {
        mod abc {
            A(i32, i32),
            B(f64),
            C(),
        }
    }

    crate::variants! {
        mod owned {
            Text(String),
            Count(u64),
            Gone(),
        }
    }

    crate::variants! {
        mod bumped {
            Bumped(Bump),
            Plain(u8),
        }
    }

    type Abc = Choice<abc::Variants>;
    type Owned = Choice<owned::Variants>;

    #[test]
    fn test_with_and_which() {
        let b = Abc::with::<abc::B>(3.14);
        assert_eq!(b.which(), abc::Tag::B);
        assert_eq!(b.index(), 1);
        assert!(b.is::<abc::B>());
        assert!(!b.is::<abc::A>());
        assert_eq!(b.get::<abc::B>(), Some(&3.14));
        assert_eq!(b.get::<abc::A>(), None);
    }

    #[test]
    fn test_set_same_arm_assigns() {
        let mut v = Owned::with::<owned::Text>(String::from("one"));
        v.set::<owned::Text>(String::from("two"));
        assert_eq!(v.as_arm::<owned::Text>(), "two");
        v.set::<owned::Count>(9);
        assert_eq!(v.which(), owned::Tag::Count);
        v.set_empty::<owned::Gone>();
        assert_eq!(v.which(), owned::Tag::Gone);
    }

    #[test]
    fn test_try_access_errors() {
        let mut v = Owned::with::<owned::Count>(1);
        assert_eq!(v.try_as_arm::<owned::Text>(), Err(ChoiceError::TagMismatch));
        let _moved = v.take();
        assert_eq!(v.try_as_arm::<owned::Count>(), Err(ChoiceError::MovedFrom));
        assert!(v.is_moved_from());
    }

    #[test]
    fn test_into_inner() {
        let v = Owned::with::<owned::Text>(String::from("kept"));
        let v = v.try_into_inner::<owned::Count>().unwrap_err();
        assert_eq!(v.into_inner::<owned::Text>(), "kept");
    }

    #[test]
    fn test_ordering_is_arm_then_payload() {
        let a12 = Abc::with::<abc::A>((1, 2));
        let a13 = Abc::with::<abc::A>((1, 3));
        let b = Abc::with::<abc::B>(0.0);
        assert!(a12 < a13);
        assert!(a13 < b);
        assert_eq!(Abc::with_empty::<abc::C>(), Abc::with_empty::<abc::C>());
    }

    #[test]
    fn test_debug_format() {
        let v = Abc::with::<abc::A>((4, 5));
        assert_eq!(format!("{:?}", v), "Choice(A, (4, 5))");
        let mut w = Owned::with_empty::<owned::Gone>();
        let _ = w.take();
        assert_eq!(format!("{:?}", w), "Choice(<moved>)");
    }

    #[test]
    fn test_move_from_leaves_source_moved() {
        let drops = Rc::new(Cell::new(0usize));
        let mut dst = Choice::<bumped::Variants>::with::<bumped::Plain>(1);
        let mut src = Choice::<bumped::Variants>::with::<bumped::Bumped>(Bump(drops.clone()));
        dst.move_from(&mut src);
        assert!(src.is_moved_from());
        drop(src);
        assert_eq!(drops.get(), 0);
        drop(dst);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    #[should_panic(expected = "wrong arm")]
    fn test_as_arm_panics_on_mismatch() {
        let v = Abc::with::<abc::B>(1.0);
        let _ = v.as_arm::<abc::A>();
    }

    #[test]
    #[should_panic(expected = "moved-from")]
    fn test_which_panics_after_take() {
        let mut v = Abc::with::<abc::B>(1.0);
        let _ = v.take();
        let _ = v.which();
    }

    #[test]
    fn test_trivially_destructible_flag() {
        assert!(Abc::TRIVIALLY_DESTRUCTIBLE);
        assert!(!Owned::TRIVIALLY_DESTRUCTIBLE);
    }

    #[test]
    fn test_choice_error_display() {
        assert_eq!(
            format!("{}", ChoiceError::CapacityExceeded),
            "destination capacity exceeded"
        );
        assert_ne!(ChoiceError::TagMismatch, ChoiceError::MovedFrom);
    }

    crate::variants! {
        mod tiny {
            A(u8),
            B(u8),
            C(),
        }
    }

    #[test]
    fn test_discriminant_is_one_byte() {
        assert_eq!(mem::size_of::<Choice<tiny::Variants>>(), 2);
        assert_eq!(mem::size_of::<Abc>(), 16);
        let mut v = Choice::<tiny::Variants>::with::<tiny::B>(7);
        let _ = v.take();
        assert!(v.is_moved_from());
        v.set_empty::<tiny::C>();
        assert_eq!(v.which(), tiny::Tag::C);
    }

    crate::variants! {
        mod narrow {
            Num(i32),
            Text(&'static str),
        }
    }

    crate::variants! {
        mod wide {
            Num(i32),
            Text(String),
        }
    }

    crate::variants! {
        mod mirror {
            Count(i32),
            Label(&'static str),
        }
    }

    #[test]
    fn test_compare_across_declarations() {
        let n = Choice::<narrow::Variants>::with::<narrow::Text>("same");
        let w = Choice::<wide::Variants>::with::<wide::Text>(String::from("same"));
        assert!(w == n);
        assert!(n == w);

        let m = Choice::<narrow::Variants>::with::<narrow::Num>(1);
        assert!(w != m);

        let mirrored = Choice::<mirror::Variants>::with::<mirror::Count>(2);
        assert_eq!(m.partial_cmp(&mirrored), Some(Ordering::Less));
        assert_eq!(n.partial_cmp(&mirrored), Some(Ordering::Greater));
        assert!(m != mirrored);
    }

    crate::variants! {
        mod view<'a> {
            Word(&'a str),
            Span(&'a [u8], usize),
        }
    }

    #[test]
    fn test_borrowed_payloads() {
        let text = String::from("borrowed text");
        let bytes = text.as_bytes();
        let mut v = Choice::<view::Variants<'_>>::with::<view::Word>(&text[..8]);
        assert_eq!(*v.as_arm::<view::Word>(), "borrowed");
        v.set::<view::Span>((bytes, 4));
        let (slice, len) = *v.as_arm::<view::Span>();
        assert_eq!(&slice[..len], b"borr");
        assert_eq!(format!("{:?}", v.which()), "Span");
    }
}
