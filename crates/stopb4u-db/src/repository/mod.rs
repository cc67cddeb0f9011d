//! # Repository Module
//!
//! Database repository implementations for the product catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  MainController                                                        │
//! │       │                                                                 │
//! │       │  catalog.search("espresso", 50)                                │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── search(&self, query, limit)                                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── listings_for(&self, product_id)                                   │
//! │  └── insert_retailer / insert_product / insert_listing                 │
//! │       │                                                                 │
//! │       │  SQL (runtime-checked, portable across drivers)                 │
//! │       ▼                                                                 │
//! │  SQLite / PostgreSQL                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog search, listings and inserts

pub mod product;
