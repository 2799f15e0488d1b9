//! Product catalogue.

use reqwest::Method;
use shop_cache::CacheKey;
use shop_core::entities::{Page, Product};
use shop_core::requests::{NewProduct, ProductPatch, ProductQuery};
use shop_core::resource::ResourceType;

use crate::{ApiError, Storefront, collection_tags, decode, encode};

impl Storefront {
    /// One page of products matching `query`. Unset filters are not sent,
    /// and each distinct filter set is cached under its own key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Invalid`] for an impossible price range, otherwise
    /// the fetch error.
    pub async fn products(&self, query: &ProductQuery) -> Result<Page<Product>, ApiError> {
        query.validate()?;
        let params = query.to_params();
        let key = CacheKey::list_with(ResourceType::Product, &params);
        self.read(key, "products".to_string(), params, |value| {
            collection_tags(ResourceType::Product, value)
        })
        .await
    }

    /// # Errors
    ///
    /// Returns the fetch error, e.g. [`ApiError::Status`] 404 for an unknown id.
    pub async fn product(&self, id: &str) -> Result<Product, ApiError> {
        let tag = ResourceType::Product.id(id);
        self.read(
            CacheKey::item(ResourceType::Product, id),
            format!("products/{}", urlencoding::encode(id)),
            Vec::new(),
            move |_| vec![tag],
        )
        .await
    }

    /// Create a product. Every cached product list goes stale.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Invalid`] for an invalid payload, otherwise the
    /// request error.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        product.validate()?;
        let value = self
            .write(
                Method::POST,
                "products",
                Some(encode(product)?),
                &[ResourceType::Product.list()],
            )
            .await?;
        decode(&value)
    }

    /// # Errors
    ///
    /// Returns the request error.
    pub async fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<Product, ApiError> {
        let value = self
            .write(
                Method::PUT,
                &format!("products/{}", urlencoding::encode(id)),
                Some(encode(patch)?),
                &[ResourceType::Product.id(id)],
            )
            .await?;
        decode(&value)
    }

    /// # Errors
    ///
    /// Returns the request error.
    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        self.write_discarding(
            Method::DELETE,
            &format!("products/{}", urlencoding::encode(id)),
            &[ResourceType::Product.id(id)],
        )
        .await
    }
}
