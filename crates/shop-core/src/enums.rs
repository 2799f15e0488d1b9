//! Closed vocabularies used by the storefront backend.
//!
//! All enums serialize in lowercase to match the JSON the backend emits.
//! Each one offers `as_str()`, `Display`, and `FromStr` so CLI arguments and
//! wire values go through the same spelling.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role of an account. Gates admin views and admin-only mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub const ALL: [Self; 2] = [Self::User, Self::Admin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(CoreError::InvalidValue {
                kind: "role",
                value: s.to_string(),
                expected: "user, admin",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ProductCategory
// ---------------------------------------------------------------------------

/// Air conditioner form factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Split,
    Window,
    Mobile,
    Cassette,
}

impl ProductCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Window => "window",
            Self::Mobile => "mobile",
            Self::Cassette => "cassette",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "split" => Ok(Self::Split),
            "window" => Ok(Self::Window),
            "mobile" => Ok(Self::Mobile),
            "cassette" => Ok(Self::Cassette),
            _ => Err(CoreError::InvalidValue {
                kind: "category",
                value: s.to_string(),
                expected: "split, window, mobile, cassette",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ProductBrand
// ---------------------------------------------------------------------------

/// Manufacturer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductBrand {
    Daikin,
    Mitsubishi,
    Lg,
    Samsung,
}

impl ProductBrand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daikin => "daikin",
            Self::Mitsubishi => "mitsubishi",
            Self::Lg => "lg",
            Self::Samsung => "samsung",
        }
    }
}

impl fmt::Display for ProductBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductBrand {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daikin" => Ok(Self::Daikin),
            "mitsubishi" => Ok(Self::Mitsubishi),
            "lg" => Ok(Self::Lg),
            "samsung" => Ok(Self::Samsung),
            _ => Err(CoreError::InvalidValue {
                kind: "brand",
                value: s.to_string(),
                expected: "daikin, mitsubishi, lg, samsung",
            }),
        }
    }
}

/// Cooling capacities (BTU) the catalog offers.
pub const PRODUCT_POWERS: [u32; 4] = [7000, 9000, 12000, 18000];

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

/// Fulfilment status of an order. Admins may set any status; the backend is
/// the authority on which changes it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the order has reached an end state.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(CoreError::InvalidValue {
                kind: "order status",
                value: s.to_string(),
                expected: "pending, processing, shipped, delivered, cancelled",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// PaymentMethod
// ---------------------------------------------------------------------------

/// How the customer pays at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    #[default]
    Card,
    Online,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Online => "online",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "online" => Ok(Self::Online),
            _ => Err(CoreError::InvalidValue {
                kind: "payment method",
                value: s.to_string(),
                expected: "cash, card, online",
            }),
        }
    }
}
