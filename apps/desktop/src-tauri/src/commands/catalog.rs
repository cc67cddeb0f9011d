//! # Catalog Commands
//!
//! Product search and price comparison, delegated to the main controller.
//!
//! ```text
//! search field ──► search_products(query) ──► product table
//!                                                  │ (row click)
//!                                                  ▼
//!                  compare_product(productId) ──► comparison panel
//! ```

use std::sync::Arc;
use tauri::State;
use tracing::debug;

use stopb4u_core::{PriceComparison, Product};
use stopb4u_shell::MainController;

use crate::error::ApiError;
use crate::state::LifecycleState;

/// Longest accepted search string.
const MAX_QUERY_LEN: usize = 200;

fn controller(lifecycle: &LifecycleState) -> Result<Arc<MainController>, ApiError> {
    lifecycle
        .controller()
        .ok_or_else(|| ApiError::unavailable("Application is not running"))
}

/// Products whose name, brand or category contains `query`
/// (case-insensitive). An empty query lists the catalog.
#[tauri::command]
pub async fn search_products(
    lifecycle: State<'_, LifecycleState>,
    query: String,
) -> Result<Vec<Product>, ApiError> {
    debug!(query = %query, "search_products command");

    let query = query.trim();
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ApiError::validation(format!(
            "Search text is longer than {} characters",
            MAX_QUERY_LEN
        )));
    }

    let controller = controller(&lifecycle)?;
    Ok(controller.search(query).await?)
}

/// Every retailer's offer for one product, cheapest in-stock first.
#[tauri::command]
pub async fn compare_product(
    lifecycle: State<'_, LifecycleState>,
    product_id: String,
) -> Result<PriceComparison, ApiError> {
    debug!(product_id = %product_id, "compare_product command");

    if product_id.trim().is_empty() {
        return Err(ApiError::validation("Product id is required"));
    }

    let controller = controller(&lifecycle)?;
    Ok(controller.compare(product_id.trim()).await?)
}
