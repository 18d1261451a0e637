//! Value object trait: equality by value, not identity.
//!
//! Money amounts, price ranges and date ranges carry no identity; two of them
//! with the same attributes are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. To "modify" one, build a
/// new one.
///
/// ```ignore
/// let a = Amount::from_euros(1_500);
/// let b = Amount::from_cents(150_000);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
