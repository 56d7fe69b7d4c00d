//! Discriminant width. The narrowest unsigned integer that fits the arm count
//! plus the reserved moved-from value.

use core::fmt;
use core::hash::Hash;

mod sealed {
    pub trait Sealed {}
}

/// Storage type of a `Choice` discriminant.
///
/// The type's maximum is reserved for the moved-from state, so a type with
/// maximum `M` indexes at most `M` arms.
pub trait Discriminant: sealed::Sealed + Copy + Eq + Hash + fmt::Debug + 'static {
    /// Reserved value of a moved-from `Choice`. Never a valid index.
    const MOVED_FROM: Self;
    /// Largest arm count this type can index.
    const MAX_ARMS: usize;

    fn from_index(index: usize) -> Self;

    fn get(self) -> usize;
}

macro_rules! discriminant {
    ($($t:ty),+) => {
        $(
            impl sealed::Sealed for $t {}

            impl Discriminant for $t {
                const MOVED_FROM: Self = <$t>::MAX;
                const MAX_ARMS: usize = <$t>::MAX as usize;

                #[inline(always)]
                fn from_index(index: usize) -> Self {
                    debug_assert!(index < Self::MAX_ARMS);
                    index as $t
                }

                #[inline(always)]
                fn get(self) -> usize {
                    self as usize
                }
            }
        )+
    };
}

discriminant!(u8, u16, u32);

/// Width selector. `U8`: the arms fit a `u8`; `U16`: they fit a `u16`.
pub struct Fit<const U8: bool, const U16: bool>;

pub trait Pick {
    type Type: Discriminant;
}

impl Pick for Fit<true, true> {
    type Type = u8;
}

impl Pick for Fit<false, true> {
    type Type = u16;
}

impl Pick for Fit<false, false> {
    type Type = u32;
}

/// Discriminant type for `ARMS` arms, spelled as the two fit flags.
///
/// `variants!` expands to
/// `DiscriminantFor<{ fits_u8(ARMS) }, { fits_u16(ARMS) }>`.
pub type DiscriminantFor<const U8: bool, const U16: bool> = <Fit<U8, U16> as Pick>::Type;

#[inline(always)]
pub const fn fits_u8(arms: usize) -> bool {
    arms <= u8::MAX as usize
}

#[inline(always)]
pub const fn fits_u16(arms: usize) -> bool {
    arms <= u16::MAX as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::any::TypeId;

    #[test]
    fn test_width_follows_arm_count() {
        assert!(fits_u8(255));
        assert!(!fits_u8(256));
        assert!(fits_u16(256));
        assert!(!fits_u16(65_536));
        assert_eq!(
            TypeId::of::<DiscriminantFor<{ fits_u8(3) }, { fits_u16(3) }>>(),
            TypeId::of::<u8>()
        );
        assert_eq!(
            TypeId::of::<DiscriminantFor<{ fits_u8(300) }, { fits_u16(300) }>>(),
            TypeId::of::<u16>()
        );
        assert_eq!(
            TypeId::of::<DiscriminantFor<{ fits_u8(70_000) }, { fits_u16(70_000) }>>(),
            TypeId::of::<u32>()
        );
    }

    #[test]
    fn test_moved_from_is_reserved() {
        assert_eq!(u8::MOVED_FROM, 255);
        assert_eq!(<u8 as Discriminant>::MAX_ARMS, 255);
        assert_eq!(<u16 as Discriminant>::from_index(300).get(), 300);
        assert_ne!(<u8 as Discriminant>::from_index(254), u8::MOVED_FROM);
    }
}
