//! Weak ordering: a total preorder. Equivalent is not the same as equal.

use core::cmp::Ordering;

use crate::meta::NoPayload;

/// Total preorder whose equivalence classes may be coarser than `Eq`.
///
/// Sits between `Ord` (equivalent means equal) and `PartialOrd` (some pairs
/// are unordered). A case-insensitive name is the usual example: `"Ada"` and
/// `"ADA"` are equivalent but not equal.
///
/// Must be reflexive, transitive and total.
pub trait WeakOrd {
    fn weak_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! weak_ord_via_ord {
    ($($t:ty),* $(,)?) => {
        $(
            impl WeakOrd for $t {
                #[inline(always)]
                fn weak_cmp(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

weak_ord_via_ord!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, str, (),
    NoPayload,
);

impl<T: WeakOrd + ?Sized> WeakOrd for &T {
    #[inline(always)]
    fn weak_cmp(&self, other: &Self) -> Ordering {
        T::weak_cmp(*self, *other)
    }
}

impl<T: WeakOrd + ?Sized> WeakOrd for &mut T {
    #[inline(always)]
    fn weak_cmp(&self, other: &Self) -> Ordering {
        T::weak_cmp(&**self, &**other)
    }
}

#[cfg(feature = "std")]
impl WeakOrd for std::string::String {
    #[inline(always)]
    fn weak_cmp(&self, other: &Self) -> Ordering {
        <str as WeakOrd>::weak_cmp(self, other)
    }
}

#[cfg(feature = "std")]
impl<T: WeakOrd + ?Sized> WeakOrd for std::boxed::Box<T> {
    #[inline(always)]
    fn weak_cmp(&self, other: &Self) -> Ordering {
        T::weak_cmp(&**self, &**other)
    }
}

#[cfg(feature = "std")]
impl<T: WeakOrd> WeakOrd for std::vec::Vec<T> {
    #[inline]
    fn weak_cmp(&self, other: &Self) -> Ordering {
        <[T] as WeakOrd>::weak_cmp(self, other)
    }
}

impl<T: WeakOrd> WeakOrd for Option<T> {
    fn weak_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.weak_cmp(b),
        }
    }
}

impl<T: WeakOrd> WeakOrd for [T] {
    fn weak_cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.iter().zip(other.iter()) {
            match a.weak_cmp(b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        self.len().cmp(&other.len())
    }
}

impl<T: WeakOrd, const N: usize> WeakOrd for [T; N] {
    #[inline]
    fn weak_cmp(&self, other: &Self) -> Ordering {
        self[..].weak_cmp(&other[..])
    }
}

// Lexicographic, left to right.
macro_rules! weak_ord_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: WeakOrd),+> WeakOrd for ($($name,)+) {
            fn weak_cmp(&self, other: &Self) -> Ordering {
                $(
                    match self.$idx.weak_cmp(&other.$idx) {
                        Ordering::Equal => {}
                        unequal => return unequal,
                    }
                )+
                Ordering::Equal
            }
        }
    };
}

weak_ord_tuple!(A.0);
weak_ord_tuple!(A.0, B.1);
weak_ord_tuple!(A.0, B.1, C.2);
weak_ord_tuple!(A.0, B.1, C.2, D.3);
weak_ord_tuple!(A.0, B.1, C.2, D.3, E.4);
weak_ord_tuple!(A.0, B.1, C.2, D.3, E.4, F.5);
weak_ord_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
weak_ord_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);
weak_ord_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8);
weak_ord_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9);
weak_ord_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10);
weak_ord_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10, L.11);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Caseless(&'static str);

    impl WeakOrd for Caseless {
        fn weak_cmp(&self, other: &Self) -> Ordering {
            let a = self.0.bytes().map(|b| b.to_ascii_lowercase());
            let b = other.0.bytes().map(|b| b.to_ascii_lowercase());
            a.cmp(b)
        }
    }

    #[test]
    fn test_equivalent_but_not_equal() {
        let a = Caseless("Ada");
        let b = Caseless("ADA");
        assert_eq!(a.weak_cmp(&b), Ordering::Equal);
        assert_ne!(a, b);
    }

    #[test]
    fn test_tuple_is_lexicographic() {
        assert_eq!((1, Caseless("b")).weak_cmp(&(1, Caseless("A"))), Ordering::Greater);
        assert_eq!((0, Caseless("z")).weak_cmp(&(1, Caseless("a"))), Ordering::Less);
        assert_eq!((7u8,).weak_cmp(&(7u8,)), Ordering::Equal);
    }

    #[test]
    fn test_slices_and_options() {
        assert_eq!([1, 2].weak_cmp(&[1, 3]), Ordering::Less);
        assert_eq!([1, 2][..].weak_cmp(&[1, 2, 0][..]), Ordering::Less);
        assert_eq!(None::<u8>.weak_cmp(&Some(0)), Ordering::Less);
        assert_eq!(NoPayload.weak_cmp(&NoPayload), Ordering::Equal);
        assert_eq!("abc".weak_cmp("abd"), Ordering::Less);
    }
}
