//! Type-level arm indices. Peano encoded so the accessor can recurse on them.

use core::marker::PhantomData;

/// Index zero.
pub struct Z;

/// Successor of `N`.
pub struct S<N>(PhantomData<N>);

/// A compile-time arm index.
pub trait Index {
    const VALUE: usize;
}

impl Index for Z {
    const VALUE: usize = 0;
}

impl<N: Index> Index for S<N> {
    const VALUE: usize = 1 + N::VALUE;
}

pub type I0 = Z;
pub type I1 = S<I0>;
pub type I2 = S<I1>;
pub type I3 = S<I2>;
pub type I4 = S<I3>;
pub type I5 = S<I4>;
pub type I6 = S<I5>;
pub type I7 = S<I6>;
pub type I8 = S<I7>;
pub type I9 = S<I8>;
pub type I10 = S<I9>;
pub type I11 = S<I10>;
pub type I12 = S<I11>;
pub type I13 = S<I12>;
pub type I14 = S<I13>;
pub type I15 = S<I14>;
