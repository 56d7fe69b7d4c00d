//! Variant declarations: tags, selectors and the chain they map onto.

use core::fmt;

use super::discriminant::Discriminant;
use super::index::Index;
use crate::storage::{Chain, Locate};

/// A declared set of variants. Normally produced by [`variants!`](crate::variants).
pub trait Variants {
    /// Tag enum, one value per arm, in declaration order.
    type Tag: Copy + Eq + fmt::Debug + 'static;
    /// The storage chain holding one arm per tag.
    type Storage: Chain;
    /// Narrowest integer that indexes every arm plus the moved-from value.
    type Discriminant: Discriminant;
    /// `TAGS[i]` is the tag of arm `i`.
    const TAGS: &'static [Self::Tag];

    fn index_of(tag: Self::Tag) -> usize;
}

/// Compile-time selector for one arm of `V`.
pub trait Select<V: Variants> {
    type Index: Index;
    const TAG: V::Tag;
}

/// Payload stored for selector `S`.
pub type PayloadOf<V, S> =
    <<V as Variants>::Storage as Locate<<S as Select<V>>::Index>>::Payload;

/// Declares a set of variants inside a new module.
///
/// ```
/// sumcell::variants! {
///     pub mod shape {
///         Pair(i32, i32),
///         Float(f64),
///         Nothing(),
///     }
/// }
///
/// type Shape = sumcell::Choice<shape::Variants>;
///
/// let s = Shape::with::<shape::Float>(3.14);
/// assert_eq!(s.which(), shape::Tag::Float);
/// assert_eq!(*s.as_arm::<shape::Float>(), 3.14);
/// ```
///
/// The module gets a `Tag` enum, one selector struct per variant (same name
/// as the tag), a `Variants` marker and the `Storage` chain. A variant with
/// no types stores [`NoPayload`](crate::meta::NoPayload), one type is stored
/// bare, more are stored as a tuple.
///
/// Payload types are resolved in the scope that invokes the macro, so a
/// payload may share a name with a generated item (`Label(Tag)` stores the
/// caller's `Tag`). Names starting with `__` are reserved.
///
/// A module declared without a visibility keeps its generated items
/// `pub(super)`, so private payload types are accepted. A single lifetime
/// parameter allows borrowed payloads:
///
/// ```
/// sumcell::variants! {
///     mod view<'a> {
///         Text(&'a str),
///         Len(usize),
///     }
/// }
///
/// let owned = String::from("borrowed");
/// let v = sumcell::Choice::<view::Variants<'_>>::with::<view::Text>(owned.as_str());
/// assert_eq!(*v.as_arm::<view::Text>(), "borrowed");
/// ```
#[macro_export]
macro_rules! variants {
    (
        $(#[$meta:meta])*
        mod $module:ident $(< $lt:lifetime >)? { $($body:tt)* }
    ) => {
        $crate::__variants! {
            [pub(super)] [] [$($lt)?]
            $(#[$meta])*
            mod $module { $($body)* }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis mod $module:ident $(< $lt:lifetime >)? { $($body:tt)* }
    ) => {
        $crate::__variants! {
            [pub] [$vis] [$($lt)?]
            $(#[$meta])*
            mod $module { $($body)* }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __variants {
    (
        [$item:vis] [$($vis:tt)*] [$($lt:lifetime)?]
        $(#[$meta:meta])*
        mod $module:ident {
            $(
                $(#[$arm_meta:meta])*
                $arm:ident ( $($ty:ty),* $(,)? )
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $($vis)* mod $module {
            mod __payloads {
                #[allow(unused_imports)]
                use super::super::*;

                pub(super) type __Chain<$($lt)?> =
                    $crate::__chain!(0; $( $crate::__payload!($($ty),*) ),+);
            }

            const __ARMS: usize = [$( stringify!($arm) ),+].len();

            type __Discriminant = $crate::meta::discriminant::DiscriminantFor<
                { $crate::meta::discriminant::fits_u8(__ARMS) },
                { $crate::meta::discriminant::fits_u16(__ARMS) },
            >;

            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            $item enum Tag {
                $( $(#[$arm_meta])* $arm ),+
            }

            $(
                $(#[$arm_meta])*
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
                $item struct $arm;
            )+

            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            $item struct Variants<$($lt)?>($(::core::marker::PhantomData<&$lt ()>)?);

            $item type Storage<$($lt)?> = __payloads::__Chain<$($lt)?>;

            impl<$($lt)?> $crate::meta::Variants for Variants<$($lt)?> {
                type Tag = Tag;
                type Storage = Storage<$($lt)?>;
                type Discriminant = __Discriminant;
                const TAGS: &'static [Tag] = &[$( Tag::$arm ),+];

                #[inline(always)]
                fn index_of(tag: Tag) -> usize {
                    tag as usize
                }
            }

            $crate::__select!([$($lt)?] $crate::meta::Z; $($arm),+);
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __select {
    ([$($lt:lifetime)?] $index:ty; $arm:ident $(, $rest:ident)*) => {
        impl<$($lt)?> $crate::meta::Select<Variants<$($lt)?>> for $arm {
            type Index = $index;
            const TAG: Tag = Tag::$arm;
        }

        $crate::__select!([$($lt)?] $crate::meta::S<$index>; $($rest),*);
    };
    ([$($lt:lifetime)?] $index:ty;) => {};
}
