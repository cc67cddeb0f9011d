//! # Product Repository
//!
//! Database operations for retailers, products and their listings.
//!
//! ## Key Operations
//! - Case-insensitive search over name, brand and category
//! - Listings for one product, joined with retailer names
//! - Inserts used by the seed binary and tests
//!
//! ## Portable SQL
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  One query text runs on both drivers:                                   │
//! │                                                                         │
//! │   placeholders   $1, $2 …          (SQLite and PostgreSQL accept both)  │
//! │   integers       BIGINT → i64      (in_stock is 0/1)                    │
//! │   timestamps     RFC 3339 TEXT     (parsed with chrono)                 │
//! │   search         LOWER(col) LIKE   (no ILIKE, no FTS)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::AnyPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stopb4u_core::{Listing, Product, Retailer};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    brand: Option<String>,
    category: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            brand: row.brand,
            category: row.category,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ListingRow {
    id: String,
    product_id: String,
    retailer_id: String,
    retailer_name: String,
    price_cents: i64,
    in_stock: i64,
    url: Option<String>,
    observed_at: String,
}

impl TryFrom<ListingRow> for Listing {
    type Error = DbError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        let observed_at = DateTime::parse_from_rfc3339(&row.observed_at)
            .map_err(|e| DbError::decode("observed_at", e))?
            .with_timezone(&Utc);

        Ok(Listing {
            id: row.id,
            product_id: row.product_id,
            retailer_id: row.retailer_id,
            retailer_name: row.retailer_name,
            price_cents: row.price_cents,
            in_stock: row.in_stock != 0,
            url: row.url,
            observed_at,
        })
    }
}

const LISTING_COLUMNS: &str = r#"
    l.id,
    l.product_id,
    l.retailer_id,
    r.name AS retailer_name,
    l.price_cents,
    l.in_stock,
    l.url,
    l.observed_at
"#;

/// Escapes LIKE wildcards and wraps the term for a substring match.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for catalog database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let results = repo.search("espresso", 20).await?;
/// let listings = repo.listings_for(&results[0].id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: AnyPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: AnyPool) -> Self {
        ProductRepository { pool }
    }

    /// Searches products by name, brand or category.
    ///
    /// ## Arguments
    /// * `query` - Search term, matched anywhere and ignoring case
    /// * `limit` - Maximum results to return
    ///
    /// An empty query lists products by name.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();
        debug!(query = %query, limit = %limit, "Searching products");

        if query.is_empty() {
            return self.list(limit).await;
        }

        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, brand, category
            FROM products
            WHERE LOWER(name) LIKE $1 ESCAPE '\'
               OR LOWER(COALESCE(brand, '')) LIKE $1 ESCAPE '\'
               OR LOWER(COALESCE(category, '')) LIKE $1 ESCAPE '\'
            ORDER BY name, id
            LIMIT $2
            "#,
        )
        .bind(like_pattern(query))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Search returned products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Lists products by name (no search filter).
    async fn list(&self, limit: u32) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, brand, category
            FROM products
            ORDER BY name, id
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, name, brand, category FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// All listings of a product, cheapest first.
    pub async fn listings_for(&self, product_id: &str) -> DbResult<Vec<Listing>> {
        let sql = format!(
            r#"
            SELECT {LISTING_COLUMNS}
            FROM listings l
            INNER JOIN retailers r ON r.id = l.retailer_id
            WHERE l.product_id = $1
            ORDER BY l.price_cents, r.name
            "#
        );

        let rows: Vec<ListingRow> = sqlx::query_as(&sql)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(product_id = %product_id, count = rows.len(), "Loaded listings");
        rows.into_iter().map(Listing::try_from).collect()
    }

    /// Inserts a retailer.
    pub async fn insert_retailer(&self, name: &str, website: Option<&str>) -> DbResult<Retailer> {
        let retailer = Retailer {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            website: website.map(str::to_string),
        };

        sqlx::query("INSERT INTO retailers (id, name, website) VALUES ($1, $2, $3)")
            .bind(&retailer.id)
            .bind(&retailer.name)
            .bind(retailer.website.clone())
            .execute(&self.pool)
            .await?;

        debug!(id = %retailer.id, name = %retailer.name, "Inserted retailer");
        Ok(retailer)
    }

    /// Inserts a product.
    pub async fn insert_product(
        &self,
        name: &str,
        brand: Option<&str>,
        category: Option<&str>,
    ) -> DbResult<Product> {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            brand: brand.map(str::to_string),
            category: category.map(str::to_string),
        };

        sqlx::query(
            r#"
            INSERT INTO products (id, name, brand, category, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.brand.clone())
        .bind(product.category.clone())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(id = %product.id, name = %product.name, "Inserted product");
        Ok(product)
    }

    /// Records a retailer's price for a product.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - unknown product or retailer
    /// * `DbError::UniqueViolation` - the retailer already lists the product
    pub async fn insert_listing(
        &self,
        product_id: &str,
        retailer_id: &str,
        price_cents: i64,
        in_stock: bool,
        url: Option<&str>,
    ) -> DbResult<Listing> {
        let retailer_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM retailers WHERE id = $1")
                .bind(retailer_id)
                .fetch_optional(&self.pool)
                .await?;
        let retailer_name =
            retailer_name.ok_or_else(|| DbError::not_found("Retailer", retailer_id))?;

        if self.get_by_id(product_id).await?.is_none() {
            return Err(DbError::not_found("Product", product_id));
        }

        // Seconds precision so the stored text round-trips exactly.
        let observed_at = Utc::now().trunc_subsecs(0);

        let listing = Listing {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            retailer_id: retailer_id.to_string(),
            retailer_name,
            price_cents,
            in_stock,
            url: url.map(str::to_string),
            observed_at,
        };

        sqlx::query(
            r#"
            INSERT INTO listings
                (id, product_id, retailer_id, price_cents, in_stock, url, observed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&listing.id)
        .bind(&listing.product_id)
        .bind(&listing.retailer_id)
        .bind(listing.price_cents)
        .bind(i64::from(listing.in_stock))
        .bind(listing.url.clone())
        .bind(listing.observed_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(
            product_id = %product_id,
            retailer = %listing.retailer_name,
            price_cents = price_cents,
            "Inserted listing"
        );
        Ok(listing)
    }

    /// Number of products in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
