//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_string_id!` macro to create type-safe ID wrappers that
//! prevent accidentally mixing identifiers from different entity types.
//! Catalog identifiers are human-readable slugs (`iphone-17-pro`), so the
//! wrapper holds a `String` rather than a numeric key.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>`, `AsRef<str>`, `Borrow<str>` and `Display`
///
/// # Example
///
/// ```rust
/// # use aictronics_core::define_string_id;
/// define_string_id!(SkuId);
/// define_string_id!(CollectionId);
///
/// let sku = SkuId::new("case-blue");
/// let collection = CollectionId::new("case-blue");
///
/// assert_eq!(sku.as_str(), collection.as_str());
/// // These are different types, so this won't compile:
/// // let _: SkuId = collection;
/// ```
#[macro_export]
macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(ProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_display_is_raw_slug() {
        let id = ProductId::new("iphone-air");
        assert_eq!(id.to_string(), "iphone-air");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ProductId::from("airpods-pro-3");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"airpods-pro-3\"");

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_borrow_allows_str_lookup() {
        let mut index = HashMap::new();
        index.insert(ProductId::new("macbook-pro-m5"), 2_usize);
        assert_eq!(index.get("macbook-pro-m5"), Some(&2));
        assert_eq!(index.get("missing"), None);
    }
}
