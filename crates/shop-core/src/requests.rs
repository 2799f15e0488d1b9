//! Request payloads sent to the storefront backend.
//!
//! Each payload with required fields has a `validate()` that mirrors the
//! checks the storefront forms perform before submitting. The backend still
//! validates everything; these checks only spare a round-trip.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::User;
use crate::enums::{OrderStatus, PaymentMethod, ProductBrand, ProductCategory, Role};
use crate::errors::CoreError;

fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::required(field));
    }
    Ok(())
}

// ── Auth ───────────────────────────────────────────────────────────

/// `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if email or password is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

/// `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if any field is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("username", &self.username)?;
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

/// Response body of both login and register.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

// ── Products ───────────────────────────────────────────────────────

/// Filters and paging for `GET /products`. Unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<ProductBrand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

impl ProductQuery {
    /// Query-string pairs in a fixed order, skipping unset filters.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(category) = self.category {
            params.push(("category", category.as_str().to_string()));
        }
        if let Some(brand) = self.brand {
            params.push(("brand", brand.as_str().to_string()));
        }
        if let Some(min) = self.min_price {
            params.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            params.push(("maxPrice", max.to_string()));
        }
        if let Some(in_stock) = self.in_stock {
            params.push(("inStock", in_stock.to_string()));
        }
        params
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the price range is inverted or negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price)
            && min > max
        {
            return Err(CoreError::Validation(format!(
                "minPrice ({min}) is greater than maxPrice ({max})"
            )));
        }
        if self.min_price.is_some_and(|p| p < 0.0) || self.max_price.is_some_and(|p| p < 0.0) {
            return Err(CoreError::Validation("prices cannot be negative".into()));
        }
        Ok(())
    }
}

/// `POST /products`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
    pub brand: ProductBrand,
    pub power: u32,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub images: Vec<String>,
}

impl NewProduct {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the name is blank or the price negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)?;
        if self.price < 0.0 {
            return Err(CoreError::Validation("price cannot be negative".into()));
        }
        Ok(())
    }
}

/// `PUT /products/:id`. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<ProductBrand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

// ── Users ──────────────────────────────────────────────────────────

/// `PUT /users/:id`. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UserPatch {
    #[must_use]
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }
}

// ── Cart ───────────────────────────────────────────────────────────

/// `POST /cart`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub product_id: String,
    pub quantity: u32,
}

/// `PUT /cart/:itemId`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CartQuantity {
    pub quantity: u32,
}

/// # Errors
///
/// Returns [`CoreError::Validation`] for a zero quantity.
pub fn validate_quantity(quantity: u32) -> Result<(), CoreError> {
    if quantity == 0 {
        return Err(CoreError::Validation("quantity must be at least 1".into()));
    }
    Ok(())
}

// ── Orders ─────────────────────────────────────────────────────────

/// `POST /orders`. The backend builds the order from the current cart.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub shipping_address: String,
    pub phone: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl NewOrder {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the address or phone is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("shippingAddress", &self.shipping_address)?;
        require("phone", &self.phone)
    }
}

/// `PUT /orders/:id/status`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}
