//! User administration and profiles.

use reqwest::Method;
use shop_cache::CacheKey;
use shop_core::entities::User;
use shop_core::requests::UserPatch;
use shop_core::resource::ResourceType;

use crate::{ApiError, Storefront, collection_tags, decode, encode};

impl Storefront {
    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.read(
            CacheKey::list(ResourceType::User),
            "users".to_string(),
            Vec::new(),
            |value| collection_tags(ResourceType::User, value),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn user(&self, id: &str) -> Result<User, ApiError> {
        let tag = ResourceType::User.id(id);
        self.read(
            CacheKey::item(ResourceType::User, id),
            format!("users/{}", urlencoding::encode(id)),
            Vec::new(),
            move |_| vec![tag],
        )
        .await
    }

    /// # Errors
    ///
    /// Returns the request error.
    pub async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<User, ApiError> {
        let value = self
            .write(
                Method::PUT,
                &format!("users/{}", urlencoding::encode(id)),
                Some(encode(patch)?),
                &[ResourceType::User.id(id)],
            )
            .await?;
        decode(&value)
    }

    /// # Errors
    ///
    /// Returns the request error.
    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.write_discarding(
            Method::DELETE,
            &format!("users/{}", urlencoding::encode(id)),
            &[ResourceType::User.id(id)],
        )
        .await
    }
}
