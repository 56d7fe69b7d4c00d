//! Bulk relocation into fixed-capacity buffers.
//!
//! When every payload is `Copy` the whole slice goes over in one
//! `copy_nonoverlapping`; otherwise each element is cloned.

use core::ptr;

use arrayvec::ArrayVec;

use super::{Choice, ChoiceError};
use crate::meta::Variants;
use crate::storage::{ChainClone, ChainCopy};

/// Appends a bit copy of `src` to `dst`.
///
/// Nothing is written when `dst` cannot take all of `src`.
pub fn copy_into<V, const CAP: usize>(
    dst: &mut ArrayVec<Choice<V>, CAP>,
    src: &[Choice<V>],
) -> Result<(), ChoiceError>
where
    V: Variants,
    V::Storage: ChainCopy,
{
    if dst.remaining_capacity() < src.len() {
        return Err(ChoiceError::CapacityExceeded);
    }

    let len = dst.len();
    // SAFETY: capacity checked above. Storage is `Copy` and has no drop glue,
    // so the duplicates own nothing the originals also own.
    unsafe {
        ptr::copy_nonoverlapping(src.as_ptr(), dst.as_mut_ptr().add(len), src.len());
        dst.set_len(len + src.len());
    }
    Ok(())
}

/// Appends a clone of every element of `src` to `dst`.
///
/// Nothing is written when `dst` cannot take all of `src`.
///
/// # Panics
/// If any element of `src` was moved from.
pub fn clone_into<V, const CAP: usize>(
    dst: &mut ArrayVec<Choice<V>, CAP>,
    src: &[Choice<V>],
) -> Result<(), ChoiceError>
where
    V: Variants,
    V::Storage: ChainClone,
{
    if dst.remaining_capacity() < src.len() {
        return Err(ChoiceError::CapacityExceeded);
    }
    for item in src {
        dst.push(item.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;

    crate::variants! {
        mod pod {
            Point(i32, i32),
            Scalar(u64),
            Empty(),
        }
    }

    crate::variants! {
        mod named {
            Name(String),
            Id(u32),
        }
    }

    type Pod = Choice<pod::Variants>;
    type Named = Choice<named::Variants>;

    #[test]
    fn test_copy_into_appends_all() {
        let src = [
            Pod::with::<pod::Point>((1, -1)),
            Pod::with::<pod::Scalar>(7),
            Pod::with_empty::<pod::Empty>(),
        ];
        let mut dst: ArrayVec<Pod, 4> = ArrayVec::new();
        copy_into(&mut dst, &src).unwrap();
        assert_eq!(dst.as_slice(), &src[..]);
    }

    #[test]
    fn test_copy_into_rejects_without_partial_write() {
        let src = [Pod::with::<pod::Scalar>(1), Pod::with::<pod::Scalar>(2)];
        let mut dst: ArrayVec<Pod, 3> = ArrayVec::new();
        dst.push(Pod::with_empty::<pod::Empty>());
        dst.push(Pod::with_empty::<pod::Empty>());
        assert_eq!(copy_into(&mut dst, &src), Err(ChoiceError::CapacityExceeded));
        assert_eq!(dst.len(), 2);
    }

    #[test]
    fn test_clone_into_owned_payloads() {
        let src = [
            Named::with::<named::Name>(String::from("ada")),
            Named::with::<named::Id>(3),
        ];
        let mut dst: ArrayVec<Named, 2> = ArrayVec::new();
        clone_into(&mut dst, &src).unwrap();
        assert_eq!(dst[0].as_arm::<named::Name>(), "ada");
        assert_eq!(dst[1], src[1]);
        assert_eq!(
            clone_into(&mut dst, &src[..1]),
            Err(ChoiceError::CapacityExceeded)
        );
    }
}
