use serde::Serialize;
use shop_core::resource::ResourceType;
use std::fmt;

/// Identity of one cached query: a resource type plus a selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CacheKey {
    pub resource: ResourceType,
    pub selector: Selector,
}

/// Which slice of a resource a query reads.
///
/// Items and collections live in separate variants, so no item id can
/// alias a collection key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    Item(String),
    /// Canonical query string with parameters sorted by name, `None` when
    /// unparameterised.
    List(Option<String>),
}

impl CacheKey {
    #[must_use]
    pub fn item(resource: ResourceType, id: impl Into<String>) -> Self {
        Self {
            resource,
            selector: Selector::Item(id.into()),
        }
    }

    #[must_use]
    pub const fn list(resource: ResourceType) -> Self {
        Self {
            resource,
            selector: Selector::List(None),
        }
    }

    /// Collection key for a filtered/paged query.
    #[must_use]
    pub fn list_with<K, V>(resource: ResourceType, params: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if params.is_empty() {
            return Self::list(resource);
        }
        let mut pairs: Vec<(&str, &str)> = params
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_ref()))
            .collect();
        pairs.sort_unstable();
        let query = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        Self {
            resource,
            selector: Selector::List(Some(query)),
        }
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self.selector, Selector::List(_))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/", self.resource)?;
        match &self.selector {
            Selector::Item(id) => write!(f, "{id}"),
            Selector::List(None) => f.write_str("LIST"),
            Selector::List(Some(query)) => write!(f, "LIST?{query}"),
        }
    }
}
