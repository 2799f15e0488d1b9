//! # shop-core
//!
//! Core types shared across the storefront client crates:
//! - Entity structs for the server-owned resources (products, users, cart items, orders)
//! - The client-side [`Session`](entities::Session) and [`UserSummary`](entities::UserSummary)
//! - Request payloads sent to the REST backend
//! - Resource and cache tag vocabulary used by the resource cache
//! - The [`SessionScoped`](resource::SessionScoped) seam that ties auth changes to cache resets
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod requests;
pub mod resource;

pub use errors::CoreError;
