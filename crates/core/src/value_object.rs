//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. Two value objects with the same values are
//! considered equal: `Money(30_000)` is `Money(30_000)` wherever it came from, and
//! a sale line snapshot is equal to any other snapshot with the same fields.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. To "modify" one, build a new
/// one. The bounds keep them cheap to copy around, comparable in tests and
/// printable in logs.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
