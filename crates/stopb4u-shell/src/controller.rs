//! # Controllers
//!
//! The object bound to the view at load time, and the main window's
//! implementation of it.
//!
//! ## Controller Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ControllerRegistry::create("main")                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bind(&view) ──Err──► LoadError::Controller (fatal)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  first search / compare ──► catalog.prepare() (schema, once)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  search / compare  (commands, many times, from any thread)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  shutdown()  (once, on close) ──► catalog.close()                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  further commands ──► ControllerError::ShutDown                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use stopb4u_core::{compare, Listing, PriceComparison, Product, ViewTree};
use stopb4u_db::{Database, DbResult};

use crate::error::{ControllerError, ControllerResult};

// =============================================================================
// Controller Trait
// =============================================================================

/// Stateful object bound to a view.
#[async_trait]
pub trait Controller: Send + Sync + 'static {
    /// Node ids the controller needs in its view.
    fn required_ids(&self) -> &'static [&'static str] {
        &[]
    }

    /// Attaches to a freshly loaded view.
    ///
    /// The default checks [`Controller::required_ids`].
    fn bind(&self, view: &ViewTree) -> ControllerResult<()> {
        let missing = view.missing_ids(self.required_ids());
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ControllerError::MissingNodes(
                missing.into_iter().map(str::to_string).collect(),
            ))
        }
    }

    /// Releases held resources. Must be safe when nothing was ever
    /// acquired.
    async fn shutdown(&self) -> ControllerResult<()>;

    /// Upcast for [`downcast_controller`].
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Recovers the concrete controller type behind a trait object.
pub fn downcast_controller<C: Controller>(controller: Arc<dyn Controller>) -> Option<Arc<C>> {
    controller.into_any().downcast::<C>().ok()
}

// =============================================================================
// Catalog
// =============================================================================

/// Read access to the product catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Brings the backing store up to date before first use.
    async fn prepare(&self) -> DbResult<()> {
        Ok(())
    }

    async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Product>>;

    async fn product(&self, id: &str) -> DbResult<Option<Product>>;

    async fn listings(&self, product_id: &str) -> DbResult<Vec<Listing>>;

    /// Releases connections. Idempotent.
    async fn close(&self);
}

#[async_trait]
impl Catalog for Database {
    /// Applies pending migrations; the startup path only probes.
    async fn prepare(&self) -> DbResult<()> {
        self.run_migrations().await
    }

    async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        self.products().search(query, limit).await
    }

    async fn product(&self, id: &str) -> DbResult<Option<Product>> {
        self.products().get_by_id(id).await
    }

    async fn listings(&self, product_id: &str) -> DbResult<Vec<Listing>> {
        self.products().listings_for(product_id).await
    }

    async fn close(&self) {
        Database::close(self).await
    }
}

// =============================================================================
// Main Controller
// =============================================================================

/// Name the main layout binds to.
pub const MAIN_CONTROLLER: &str = "main";

/// Search results are capped at this many products.
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Controller behind the main window: product search and comparison.
pub struct MainController {
    catalog: Arc<dyn Catalog>,
    search_limit: u32,
    last_comparison: Mutex<Option<PriceComparison>>,
    prepared: OnceCell<()>,
    shut_down: AtomicBool,
}

impl MainController {
    /// Node ids the main layout must provide.
    pub const REQUIRED_IDS: &'static [&'static str] =
        &["searchField", "productTable", "comparisonPanel"];

    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        MainController {
            catalog,
            search_limit: DEFAULT_SEARCH_LIMIT,
            last_comparison: Mutex::new(None),
            prepared: OnceCell::new(),
            shut_down: AtomicBool::new(false),
        }
    }

    /// Sets the search result cap.
    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    /// Products matching `query`; an empty query lists the catalog.
    pub async fn search(&self, query: &str) -> ControllerResult<Vec<Product>> {
        self.ensure_ready().await?;
        let products = self.catalog.search(query, self.search_limit).await?;
        debug!(query = %query, count = products.len(), "Search complete");
        Ok(products)
    }

    /// Compares every retailer's offer for one product and remembers the
    /// result.
    pub async fn compare(&self, product_id: &str) -> ControllerResult<PriceComparison> {
        self.ensure_ready().await?;

        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or_else(|| ControllerError::UnknownProduct(product_id.to_string()))?;
        let listings = self.catalog.listings(product_id).await?;

        let comparison = compare(product, &listings)?;
        debug!(
            product_id = %product_id,
            offers = comparison.offers.len(),
            savings_bps = comparison.savings_bps,
            "Comparison complete"
        );

        *self.lock_last() = Some(comparison.clone());
        Ok(comparison)
    }

    /// The most recent successful comparison.
    pub fn last_comparison(&self) -> Option<PriceComparison> {
        self.lock_last().clone()
    }

    /// Returns true once shutdown has run.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    fn ensure_running(&self) -> ControllerResult<()> {
        if self.is_shut_down() {
            return Err(ControllerError::ShutDown);
        }
        Ok(())
    }

    /// Prepares the catalog on first use. A failed attempt is retried on
    /// the next call.
    async fn ensure_ready(&self) -> ControllerResult<()> {
        self.ensure_running()?;
        self.prepared
            .get_or_try_init(|| async {
                self.catalog.prepare().await?;
                debug!("Catalog prepared");
                Ok::<(), ControllerError>(())
            })
            .await?;
        Ok(())
    }

    fn lock_last(&self) -> std::sync::MutexGuard<'_, Option<PriceComparison>> {
        // A panic while holding the lock leaves at worst a stale cache.
        self.last_comparison
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for MainController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainController")
            .field("search_limit", &self.search_limit)
            .field("shut_down", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Controller for MainController {
    fn required_ids(&self) -> &'static [&'static str] {
        Self::REQUIRED_IDS
    }

    async fn shutdown(&self) -> ControllerResult<()> {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            debug!("Main controller already shut down");
            return Ok(());
        }

        info!("Main controller shutting down");
        self.lock_last().take();
        self.catalog.close().await;
        Ok(())
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
