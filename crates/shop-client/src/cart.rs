//! The signed-in user's cart. Every mutation invalidates the whole `Cart` tag.

use reqwest::Method;
use shop_cache::CacheKey;
use shop_core::entities::CartItem;
use shop_core::requests::{AddToCart, CartQuantity, validate_quantity};
use shop_core::resource::ResourceType;

use crate::{ApiError, Storefront, decode, encode};

const CART_SELECTOR: &str = "current";

impl Storefront {
    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn cart(&self) -> Result<Vec<CartItem>, ApiError> {
        self.read(
            CacheKey::item(ResourceType::Cart, CART_SELECTOR),
            "cart".to_string(),
            Vec::new(),
            |_| vec![ResourceType::Cart.all()],
        )
        .await
    }

    /// Add `quantity` (default 1) of a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Invalid`] for a zero quantity, otherwise the
    /// request error.
    pub async fn add_to_cart(&self, product_id: &str, quantity: Option<u32>) -> Result<CartItem, ApiError> {
        let req = AddToCart {
            product_id: product_id.to_string(),
            quantity: quantity.unwrap_or(1),
        };
        validate_quantity(req.quantity)?;
        let value = self
            .write(Method::POST, "cart", Some(encode(&req)?), &[ResourceType::Cart.all()])
            .await?;
        decode(&value)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Invalid`] for a zero quantity, otherwise the
    /// request error.
    pub async fn update_cart_item(&self, item_id: &str, quantity: u32) -> Result<CartItem, ApiError> {
        validate_quantity(quantity)?;
        let value = self
            .write(
                Method::PUT,
                &format!("cart/{}", urlencoding::encode(item_id)),
                Some(encode(&CartQuantity { quantity })?),
                &[ResourceType::Cart.all()],
            )
            .await?;
        decode(&value)
    }

    /// # Errors
    ///
    /// Returns the request error.
    pub async fn remove_from_cart(&self, item_id: &str) -> Result<(), ApiError> {
        self.write_discarding(
            Method::DELETE,
            &format!("cart/{}", urlencoding::encode(item_id)),
            &[ResourceType::Cart.all()],
        )
        .await
    }

    /// # Errors
    ///
    /// Returns the request error.
    pub async fn clear_cart(&self) -> Result<(), ApiError> {
        self.write_discarding(Method::DELETE, "cart", &[ResourceType::Cart.all()])
            .await
    }
}
