//! # Price Comparison
//!
//! Ranks one product's offers across retailers.
//!
//! ## Ranking Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Listings for "Espresso Beans 1kg"                                      │
//! │                                                                         │
//! │   MegaMart     $18.99  in stock   ──► rank 1  (cheapest)                │
//! │   CornerShop   $21.50  in stock   ──► rank 2                            │
//! │   BeanHouse    $24.00  in stock   ──► rank 3  (priciest)                │
//! │   QuickBuy     $15.00  SOLD OUT   ──► unranked, listed last             │
//! │                                                                         │
//! │   spread       = $24.00 - $18.99 = $5.01                                │
//! │   savings_bps  = 5.01 / 24.00    = 2088 (20.88%)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ties on price are broken by retailer name so the order is stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Listing, Product};

/// One retailer's offer, positioned within a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Offer {
    pub listing_id: String,
    pub retailer_id: String,
    pub retailer_name: String,
    pub price: Money,
    pub in_stock: bool,
    pub url: Option<String>,
    #[ts(as = "String")]
    pub observed_at: DateTime<Utc>,

    /// 1-based position among in-stock offers; `None` when sold out.
    pub rank: Option<u32>,

    /// How much cheaper than the priciest in-stock offer, in basis points.
    pub savings_bps: u32,
}

/// A product and all its offers, ranked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceComparison {
    pub product: Product,

    /// In-stock offers by price, then sold-out offers by price.
    pub offers: Vec<Offer>,

    /// Lowest in-stock price.
    pub lowest: Option<Money>,

    /// Highest in-stock price.
    pub highest: Option<Money>,

    /// `highest - lowest`, zero with fewer than two in-stock offers.
    pub spread: Money,

    /// Savings of the cheapest over the priciest in-stock offer.
    pub savings_bps: u32,
}

impl PriceComparison {
    /// The rank-1 offer, if anything is in stock.
    pub fn cheapest(&self) -> Option<&Offer> {
        self.offers.iter().find(|offer| offer.rank == Some(1))
    }

    /// Number of in-stock offers.
    pub fn in_stock_count(&self) -> usize {
        self.offers.iter().filter(|offer| offer.in_stock).count()
    }
}

/// Compares every listing of `product`.
///
/// ## Errors
/// - [`CoreError::NoListings`] when `listings` is empty
/// - [`CoreError::ForeignListing`] when a listing is for another product
pub fn compare(product: Product, listings: &[Listing]) -> CoreResult<PriceComparison> {
    if listings.is_empty() {
        return Err(CoreError::NoListings {
            product_id: product.id,
        });
    }

    if let Some(stray) = listings.iter().find(|l| l.product_id != product.id) {
        return Err(CoreError::ForeignListing {
            listing_id: stray.id.clone(),
            expected: product.id,
            actual: stray.product_id.clone(),
        });
    }

    let mut sorted: Vec<&Listing> = listings.iter().collect();
    sorted.sort_by(|a, b| by_availability_then_price(a, b));

    let in_stock: Vec<&Listing> = sorted.iter().copied().filter(|l| l.in_stock).collect();
    let lowest = in_stock.first().map(|l| l.price());
    let highest = in_stock.last().map(|l| l.price());

    let spread = match (lowest, highest) {
        (Some(low), Some(high)) => high - low,
        _ => Money::zero(),
    };
    let savings_bps = match (lowest, highest) {
        (Some(low), Some(high)) => low.savings_bps(high),
        _ => 0,
    };

    let mut next_rank = 1;
    let offers = sorted
        .into_iter()
        .map(|listing| {
            let rank = if listing.in_stock {
                let rank = next_rank;
                next_rank += 1;
                Some(rank)
            } else {
                None
            };
            let savings_bps = match (listing.in_stock, highest) {
                (true, Some(high)) => listing.price().savings_bps(high),
                _ => 0,
            };

            Offer {
                listing_id: listing.id.clone(),
                retailer_id: listing.retailer_id.clone(),
                retailer_name: listing.retailer_name.clone(),
                price: listing.price(),
                in_stock: listing.in_stock,
                url: listing.url.clone(),
                observed_at: listing.observed_at,
                rank,
                savings_bps,
            }
        })
        .collect();

    Ok(PriceComparison {
        product,
        offers,
        lowest,
        highest,
        spread,
        savings_bps,
    })
}

fn by_availability_then_price(a: &Listing, b: &Listing) -> Ordering {
    b.in_stock
        .cmp(&a.in_stock)
        .then(a.price_cents.cmp(&b.price_cents))
        .then_with(|| a.retailer_name.cmp(&b.retailer_name))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Espresso Beans 1kg".to_string(),
            brand: None,
            category: Some("Coffee".to_string()),
        }
    }

    fn listing(retailer: &str, cents: i64, in_stock: bool) -> Listing {
        Listing {
            id: format!("l-{}", retailer),
            product_id: "p-1".to_string(),
            retailer_id: format!("r-{}", retailer),
            retailer_name: retailer.to_string(),
            price_cents: cents,
            in_stock,
            url: None,
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn test_ranks_in_stock_offers() {
        let listings = vec![
            listing("BeanHouse", 2400, true),
            listing("QuickBuy", 1500, false),
            listing("MegaMart", 1899, true),
            listing("CornerShop", 2150, true),
        ];

        let cmp = compare(product(), &listings).unwrap();

        let order: Vec<&str> = cmp.offers.iter().map(|o| o.retailer_name.as_str()).collect();
        assert_eq!(order, vec!["MegaMart", "CornerShop", "BeanHouse", "QuickBuy"]);

        let ranks: Vec<Option<u32>> = cmp.offers.iter().map(|o| o.rank).collect();
        assert_eq!(ranks, vec![Some(1), Some(2), Some(3), None]);

        assert_eq!(cmp.lowest, Some(Money::from_cents(1899)));
        assert_eq!(cmp.highest, Some(Money::from_cents(2400)));
        assert_eq!(cmp.spread, Money::from_cents(501));
        assert_eq!(cmp.savings_bps, 2088);
        assert_eq!(cmp.cheapest().unwrap().retailer_name, "MegaMart");
        assert_eq!(cmp.in_stock_count(), 3);
        assert_eq!(cmp.offers[3].savings_bps, 0);
        assert_eq!(cmp.offers[2].savings_bps, 0);
    }

    #[test]
    fn test_price_ties_break_by_name() {
        let listings = vec![listing("Zeta", 1000, true), listing("Alpha", 1000, true)];
        let cmp = compare(product(), &listings).unwrap();
        assert_eq!(cmp.offers[0].retailer_name, "Alpha");
        assert_eq!(cmp.spread, Money::zero());
        assert_eq!(cmp.savings_bps, 0);
    }

    #[test]
    fn test_all_sold_out() {
        let listings = vec![listing("QuickBuy", 1500, false)];
        let cmp = compare(product(), &listings).unwrap();
        assert_eq!(cmp.lowest, None);
        assert_eq!(cmp.highest, None);
        assert!(cmp.cheapest().is_none());
        assert_eq!(cmp.spread, Money::zero());
    }

    #[test]
    fn test_no_listings() {
        let err = compare(product(), &[]).unwrap_err();
        assert!(matches!(err, CoreError::NoListings { .. }));
    }

    #[test]
    fn test_foreign_listing() {
        let mut stray = listing("MegaMart", 100, true);
        stray.product_id = "p-2".to_string();

        let err = compare(product(), &[stray]).unwrap_err();
        assert!(matches!(err, CoreError::ForeignListing { ref actual, .. } if actual == "p-2"));
    }
}
