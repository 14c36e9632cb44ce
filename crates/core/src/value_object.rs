//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Positions and zone requests carry no identity; two of them
/// with the same attributes are interchangeable. Implementors must be cheap to
/// clone and comparable by value.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Position { x: usize, y: usize }
///
/// impl ValueObject for Position {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
