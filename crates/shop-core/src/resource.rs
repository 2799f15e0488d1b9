//! Resource and cache-tag vocabulary.
//!
//! Every cached query result provides a set of [`Tag`]s naming the records it
//! depends on. Mutations declare the tags they invalidate; the resource cache
//! marks every entry whose provided tags intersect that set as stale.
//!
//! ```text
//! GET /products      provides {Product, p1} {Product, p2} {Product, LIST}
//! GET /products/p1   provides {Product, p1}
//! PUT /products/p1   invalidates {Product, p1}   -> both entries stale
//! POST /products     invalidates {Product, LIST} -> only the list is stale
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server resource families the client caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum ResourceType {
    Product,
    User,
    Cart,
    Order,
}

impl ResourceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::User => "User",
            Self::Cart => "Cart",
            Self::Order => "Order",
        }
    }

    /// Tag for one record of this type.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Tag {
        Tag {
            resource: self,
            id: Some(TagId::Id(id.into())),
        }
    }

    /// Tag for the collection of this type.
    #[must_use]
    pub const fn list(self) -> Tag {
        Tag {
            resource: self,
            id: Some(TagId::List),
        }
    }

    /// Type-wide tag. Invalidating it hits every entry tagged with this type.
    #[must_use]
    pub const fn all(self) -> Tag {
        Tag {
            resource: self,
            id: None,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of a resource family a tag names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum TagId {
    Id(String),
    /// Sentinel for collection queries.
    List,
}

/// A cache dependency label: a resource type plus an optional id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct Tag {
    pub resource: ResourceType,
    pub id: Option<TagId>,
}

impl Tag {
    /// Whether invalidating `self` reaches an entry that provided `provided`.
    ///
    /// A type-wide tag (`id: None`) matches any tag of the same type. A
    /// specific tag only matches an equal tag.
    #[must_use]
    pub fn invalidates(&self, provided: &Self) -> bool {
        if self.resource != provided.resource {
            return false;
        }
        match &self.id {
            None => true,
            Some(id) => provided.id.as_ref() == Some(id),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            None => write!(f, "{}", self.resource),
            Some(TagId::List) => write!(f, "{}:LIST", self.resource),
            Some(TagId::Id(id)) => write!(f, "{}:{id}", self.resource),
        }
    }
}

/// Tags a collection result provides: one per item id plus the `LIST` tag.
#[must_use]
pub fn list_tags<'a, I>(resource: ResourceType, ids: I) -> Vec<Tag>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tags: Vec<Tag> = ids.into_iter().map(|id| resource.id(id)).collect();
    tags.push(resource.list());
    tags
}

/// State that belongs to one signed-in identity and must be discarded when
/// the session changes hands (login, registration, logout).
pub trait SessionScoped: Send + Sync {
    /// Drop everything held for the previous identity.
    fn reset(&self);
}
