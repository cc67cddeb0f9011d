//! # Domain Types
//!
//! Catalog types shared by the database layer, the controller and the
//! frontend, plus the result of the startup connectivity probe.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Retailer     │   │     Product     │   │     Listing     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│                 │◄──│  product_id     │       │
//! │  │  name           │   │  id (UUID)      │   │  retailer_id    │       │
//! │  │  website        │   │  name, brand    │   │  price_cents    │       │
//! │  └─────────────────┘   │  category       │   │  in_stock       │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌──────────────────────────────────────┐                              │
//! │  │ ConnectionStatus                     │                              │
//! │  │  Connected | Failed(ProbeFailure)    │  ◄── one per startup         │
//! │  └──────────────────────────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Catalog
// =============================================================================

/// A shop that sells products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Retailer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name ("MegaMart").
    pub name: String,

    /// Storefront URL, if known.
    pub website: Option<String>,
}

/// A product as the user thinks of it, independent of who sells it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Manufacturer / brand.
    pub brand: Option<String>,

    /// Free-form category ("Laptops", "Coffee").
    pub category: Option<String>,
}

/// One retailer's offer for one product, as last observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Listing {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Product this offer is for.
    pub product_id: String,

    /// Retailer making the offer.
    pub retailer_id: String,

    /// Retailer display name (joined for convenience).
    pub retailer_name: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Whether the retailer had stock when observed.
    pub in_stock: bool,

    /// Product page at the retailer.
    pub url: Option<String>,

    /// When the price was observed.
    #[ts(as = "String")]
    pub observed_at: DateTime<Utc>,
}

impl Listing {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Connectivity Probe
// =============================================================================

/// Why a connectivity probe failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeFailureKind {
    /// The connection settings could not be turned into a connection
    /// attempt (bad URL, unknown scheme).
    InvalidConfig,

    /// The attempt was made and refused, rejected or errored.
    Unreachable,

    /// The attempt did not finish within the probe timeout.
    Timeout,
}

impl fmt::Display for ProbeFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailureKind::InvalidConfig => write!(f, "invalid configuration"),
            ProbeFailureKind::Unreachable => write!(f, "unreachable"),
            ProbeFailureKind::Timeout => write!(f, "timed out"),
        }
    }
}

/// Details of a failed probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeFailure {
    pub kind: ProbeFailureKind,
    pub detail: String,
}

impl ProbeFailure {
    pub fn new(kind: ProbeFailureKind, detail: impl Into<String>) -> Self {
        ProbeFailure {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

/// Result of one connectivity probe.
///
/// ## State Machine Input
/// ```text
/// ProbingDb ──► Connected ──────────► Loading
///           └─► Failed(reason) ─────► DbFailed (diagnostic, exit 1)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Failed(ProbeFailure),
}

impl ConnectionStatus {
    /// Shorthand for a failed status.
    pub fn failed(kind: ProbeFailureKind, detail: impl Into<String>) -> Self {
        ConnectionStatus::Failed(ProbeFailure::new(kind, detail))
    }

    /// Returns true for `Connected`.
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_price() {
        let listing = Listing {
            id: "l-1".to_string(),
            product_id: "p-1".to_string(),
            retailer_id: "r-1".to_string(),
            retailer_name: "MegaMart".to_string(),
            price_cents: 1299,
            in_stock: true,
            url: None,
            observed_at: Utc::now(),
        };
        assert_eq!(listing.price(), Money::from_cents(1299));
    }

    #[test]
    fn test_connection_status() {
        assert!(ConnectionStatus::Connected.is_connected());

        let failed = ConnectionStatus::failed(ProbeFailureKind::Timeout, "after 10s");
        assert!(!failed.is_connected());

        match failed {
            ConnectionStatus::Failed(reason) => {
                assert_eq!(reason.to_string(), "timed out: after 10s");
            }
            ConnectionStatus::Connected => panic!("expected failure"),
        }
    }

    #[test]
    fn test_listing_serializes_camel_case() {
        let product = Product {
            id: "p-1".to_string(),
            name: "Espresso Beans".to_string(),
            brand: Some("Lavazza".to_string()),
            category: None,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["name"], "Espresso Beans");
        assert!(json["category"].is_null());
    }
}
