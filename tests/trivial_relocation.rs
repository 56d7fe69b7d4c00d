//! Bulk relocation of trivially copyable `Choice` values.
//!
//! Payloads are plain-old-data structs so copies can be compared byte for
//! byte through their `zerocopy` views.

use arrayvec::ArrayVec;
use zerocopy::{Immutable, IntoBytes};

use sumcell::choice::relocate::{clone_into, copy_into};
use sumcell::{Choice, ChoiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntoBytes, Immutable)]
#[repr(C)]
struct Pixel {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntoBytes, Immutable)]
#[repr(C)]
struct Span {
    start: u32,
    len: u32,
}

sumcell::variants! {
    mod cell {
        Color(Pixel),
        Range(Span),
        Blank(),
    }
}

type Cell = Choice<cell::Variants>;

fn sample() -> Vec<Cell> {
    (0..6u8)
        .map(|i| match i % 3 {
            0 => Cell::with::<cell::Color>(Pixel { r: i, g: 2 * i, b: 3 * i, a: 255 }),
            1 => Cell::with::<cell::Range>(Span { start: u32::from(i) << 8, len: 7 }),
            _ => Cell::with_empty::<cell::Blank>(),
        })
        .collect()
}

fn payload_bytes(c: &Cell) -> Vec<u8> {
    match c.which() {
        cell::Tag::Color => c.as_arm::<cell::Color>().as_bytes().to_vec(),
        cell::Tag::Range => c.as_arm::<cell::Range>().as_bytes().to_vec(),
        cell::Tag::Blank => Vec::new(),
    }
}

#[test]
fn test_copy_into_is_bitwise() {
    assert!(Cell::TRIVIALLY_DESTRUCTIBLE);
    let src = sample();
    let mut dst: ArrayVec<Cell, 8> = ArrayVec::new();
    copy_into(&mut dst, &src).unwrap();

    assert_eq!(dst.len(), src.len());
    for (copy, original) in dst.iter().zip(&src) {
        assert_eq!(copy.which(), original.which());
        assert_eq!(payload_bytes(copy), payload_bytes(original));
    }
}

#[test]
fn test_copy_into_appends_after_existing() {
    let src = sample();
    let mut dst: ArrayVec<Cell, 8> = ArrayVec::new();
    dst.push(Cell::with_empty::<cell::Blank>());
    copy_into(&mut dst, &src[..3]).unwrap();
    assert_eq!(dst.len(), 4);
    assert_eq!(dst[1], src[0]);
    assert_eq!(dst[3], src[2]);
}

#[test]
fn test_capacity_is_checked_up_front() {
    let src = sample();
    let mut dst: ArrayVec<Cell, 4> = ArrayVec::new();
    assert_eq!(copy_into(&mut dst, &src), Err(ChoiceError::CapacityExceeded));
    assert!(dst.is_empty());
    assert_eq!(clone_into(&mut dst, &src), Err(ChoiceError::CapacityExceeded));
    assert!(dst.is_empty());
}

#[test]
fn test_clone_into_matches_copy_into() {
    let src = sample();
    let mut copied: ArrayVec<Cell, 6> = ArrayVec::new();
    let mut cloned: ArrayVec<Cell, 6> = ArrayVec::new();
    copy_into(&mut copied, &src).unwrap();
    clone_into(&mut cloned, &src).unwrap();
    assert_eq!(copied, cloned);
}
