//! Orders and checkout.

use reqwest::Method;
use shop_cache::CacheKey;
use shop_core::entities::Order;
use shop_core::enums::OrderStatus;
use shop_core::requests::{NewOrder, OrderStatusUpdate};
use shop_core::resource::ResourceType;

use crate::{ApiError, Storefront, collection_tags, decode, encode};

impl Storefront {
    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        self.read(
            CacheKey::list(ResourceType::Order),
            "orders".to_string(),
            Vec::new(),
            |value| collection_tags(ResourceType::Order, value),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn order(&self, id: &str) -> Result<Order, ApiError> {
        let tag = ResourceType::Order.id(id);
        self.read(
            CacheKey::item(ResourceType::Order, id),
            format!("orders/{}", urlencoding::encode(id)),
            Vec::new(),
            move |_| vec![tag],
        )
        .await
    }

    /// Place an order from the current cart. The backend empties the cart,
    /// so both the order list and the cart go stale.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Invalid`] when the address or phone is empty,
    /// otherwise the request error.
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        order.validate()?;
        let value = self
            .write(
                Method::POST,
                "orders",
                Some(encode(order)?),
                &[ResourceType::Order.list(), ResourceType::Cart.all()],
            )
            .await?;
        decode(&value)
    }

    /// # Errors
    ///
    /// Returns the request error.
    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<Order, ApiError> {
        let value = self
            .write(
                Method::PUT,
                &format!("orders/{}/status", urlencoding::encode(id)),
                Some(encode(&OrderStatusUpdate { status })?),
                &[ResourceType::Order.id(id)],
            )
            .await?;
        decode(&value)
    }
}
