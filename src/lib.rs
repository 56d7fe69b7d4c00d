#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod choice;
pub mod meta;
pub mod ops;
pub mod storage;

/// Prelude for convenient imports of primary API types.
pub mod prelude {
    pub use crate::choice::{Choice, ChoiceError};
    pub use crate::meta::{NoPayload, PayloadOf, Select, Variants};
    pub use crate::ops::WeakOrd;
    pub use crate::variants;
}

// Re-export primary types at crate root for convenience.
pub use choice::{Choice, ChoiceError};
pub use meta::{NoPayload, PayloadOf, Select, Variants};
pub use ops::WeakOrd;
