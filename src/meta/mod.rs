//! Variant metadata. Compile time only: payload shapes, tags, arm indices.

pub mod discriminant;
pub mod index;
pub mod payload;
pub mod variants;

pub use discriminant::{Discriminant, DiscriminantFor};
pub use index::{
    Index, I0, I1, I10, I11, I12, I13, I14, I15, I2, I3, I4, I5, I6, I7, I8, I9, S, Z,
};
pub use payload::NoPayload;
pub use variants::{PayloadOf, Select, Variants};
