//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// They are immutable: "changing" one means building a new one, which is why
/// constructors are the only place their invariants are checked.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct DiscountPercent(u8);
///
/// impl ValueObject for DiscountPercent {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
