pub mod auth;
pub mod db;
pub mod domain;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Length of generated product barcodes.
pub const BARCODE_LEN: usize = 12;
/// Default number of products returned by low-stock queries.
pub const DEFAULT_LOW_STOCK_LIMIT: i64 = 5;
