//! Plain records and their create/update payloads.
//!
//! Every record here implements [`ActorEntity`](resource_store::ActorEntity) (see the
//! `*_actor` modules) so a `ResourceActor` can serve as its repository. Payloads that
//! arrive over HTTP implement [`Validate`](crate::validation::Validate).

/// Declares a type-safe `u32` identifier that renders as `"{prefix}_{n}"` in logs and
/// as a bare number in JSON.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub mod access;
pub mod address;
pub mod category;
pub mod order;
pub mod product;
pub mod product_image;
pub mod review;
pub mod user;

pub use access::*;
pub use address::*;
pub use category::*;
pub use order::*;
pub use product::*;
pub use product_image::*;
pub use review::*;
pub use user::*;

/// URL-safe slug: lowercase ASCII alphanumerics, every other run collapsed to one `-`.
///
/// ```
/// assert_eq!(storefront::model::slugify("  Red Shoes, 42 EU! "), "red-shoes-42-eu");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// The slug a new record is stored under: the given one unless empty, else one
/// derived from `name`.
pub fn effective_slug(slug: Option<&str>, name: &str) -> String {
    match slug.filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_json() {
        let id = ProductId(7);
        assert_eq!(id.to_string(), "product_7");
        assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!(7));
        assert_eq!(serde_json::from_str::<OrderId>("3").unwrap(), OrderId(3));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Winter Sale"), "winter-sale");
        assert_eq!(slugify("--A__B--"), "a-b");
        assert_eq!(slugify("Über 50%"), "ber-50");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_effective_slug_ignores_empty() {
        assert_eq!(effective_slug(Some("mugs"), "Cups"), "mugs");
        assert_eq!(effective_slug(Some(""), "Cups"), "cups");
        assert_eq!(effective_slug(None, "Cups"), "cups");
    }
}
