//! # catalog-browser
//!
//! Turns flat astronomical catalogs (solar-system bodies, stars, deep-sky objects) into
//! cached, navigable trees of named groups and leaf objects for drill-down browsers.
//!
//! ```text
//! CatalogQueryPort ──▶ BrowserTreeBuilder ──▶ BrowserCache ──▶ presentation
//!                       (GroupClassifier)      (memoized roots)  (BrowserNode::listing)
//! ```
//!
//! Start from [`browser::BrowserCache`].
pub mod browser;
pub mod browser_errors;
pub mod builder;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod node;
