//! # stopb4u-db: Database Layer for STOP B4U SHOP
//!
//! Access to the product catalog, over SQLite in development and
//! PostgreSQL in production, through sqlx's `Any` driver.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     STOP B4U SHOP Data Flow                             │
//! │                                                                         │
//! │  Startup (shell)                 Commands (search / compare)            │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    stopb4u-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐  ┌──────────────┐  ┌───────────────────┐   │   │
//! │  │   │   SqlProbe    │  │   Database   │  │ ProductRepository │   │   │
//! │  │   │  (probe.rs)   │  │  (pool.rs)   │◄─│  (repository/)    │   │   │
//! │  │   │               │  │              │  │                   │   │   │
//! │  │   │ one bounded   │  │ AnyPool      │  │ search, listings  │   │   │
//! │  │   │ connection    │  │ migrations   │  │ inserts           │   │   │
//! │  │   └───────────────┘  └──────────────┘  └───────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sqlite://…/catalog.db   or   postgres://host/catalog                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection configuration and the pooled handle
//! - [`probe`] - Startup connectivity probe
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Catalog repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stopb4u_db::{Database, DbConfig, SqlProbe};
//!
//! let config = DbConfig::new("sqlite://catalog.db");
//! if SqlProbe::new(config.clone()).probe().await.is_connected() {
//!     let db = Database::new(config).await?;
//!     let products = db.products().search("espresso", 20).await?;
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod probe;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, IN_MEMORY_URL};
pub use probe::{SqlProbe, DEFAULT_PROBE_TIMEOUT};

pub use repository::product::ProductRepository;
