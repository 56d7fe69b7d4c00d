//! The storage engine. Unions all the way down, one per arm.
//!
//! A chain for arms `P0, P1, P2` is
//! `Node<0, P0, Node<1, P1, Last<2, P2>>>`. Node `i`'s cell means either "arm
//! `i`'s payload" or "the rest of the chain", never both, and nothing in the
//! chain records which. The discriminant lives in the owner and is passed
//! into every operation.

pub mod accessor;
pub mod chain;
pub mod node;

pub use accessor::Locate;
pub use chain::{
    Chain, ChainClone, ChainCopy, ChainDebug, ChainEq, ChainHash, ChainOrd, ChainPartialEq,
    ChainPartialOrd, ChainWeakOrd,
};
pub use node::{Last, Node};

/// Builds a chain type from payload types, numbering positions from `$pos`.
#[doc(hidden)]
#[macro_export]
macro_rules! __chain {
    ($pos:expr; $last:ty) => {
        $crate::storage::Last<{ $pos }, $last>
    };
    ($pos:expr; $head:ty, $($rest:ty),+) => {
        $crate::storage::Node<{ $pos }, $head, $crate::__chain!($pos + 1; $($rest),+)>
    };
}
