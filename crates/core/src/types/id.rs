//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`, `is_positive()`
/// - `From<i32>`, `Into<i32>` and `FromStr` implementations
/// - A transparent `sqlx::Type` over `INTEGER` (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use bite_core::define_id;
/// define_id!(CustomerId);
/// define_id!(OrderId);
///
/// let customer_id = CustomerId::new(1);
/// let order_id = OrderId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: CustomerId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type), sqlx(transparent))]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }

            /// Whether the ID could have been assigned by the store.
            ///
            /// Store-assigned IDs start at 1.
            #[must_use]
            pub const fn is_positive(&self) -> bool {
                self.0 > 0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

// Entity IDs assigned by the intake store
define_id!(CustomerId);
define_id!(OrderId);
define_id!(OrderItemId);

// Product IDs are chosen by the catalog and echoed back by the cart client
define_id!(ProductId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&CustomerId::new(7)).unwrap_or_default();
        assert_eq!(json, "7");
    }

    #[test]
    fn test_is_positive() {
        assert!(OrderId::new(42).is_positive());
        assert!(!OrderId::new(0).is_positive());
        assert!(!OrderId::new(-3).is_positive());
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!(" 8 ".parse::<CustomerId>(), Ok(CustomerId::new(8)));
        assert!("eight".parse::<CustomerId>().is_err());
    }

    #[test]
    fn test_display_and_conversions() {
        let id = ProductId::from(12);
        assert_eq!(id.to_string(), "12");
        assert_eq!(i32::from(id), 12);
    }
}
