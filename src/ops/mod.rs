//! Comparison traits the engine dispatches to besides `core::cmp`.

pub mod ord;

pub use ord::WeakOrd;
