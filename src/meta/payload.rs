//! Payload shapes. Arity 0 is `NoPayload`, arity 1 the bare type, more a tuple.

/// Payload of a variant that carries no values.
///
/// Distinct from `()`: a variant declared as `Unit(())` stores a real `()`,
/// a variant declared as `Empty()` stores `NoPayload`. All `NoPayload`s are
/// equal, so two `Empty` arms always compare equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoPayload;

/// Collapses a declared type list into its stored payload type.
#[doc(hidden)]
#[macro_export]
macro_rules! __payload {
    () => {
        $crate::meta::NoPayload
    };
    ($only:ty) => {
        $only
    };
    ($($many:ty),+) => {
        ($($many),+)
    };
}
