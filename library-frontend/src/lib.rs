pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod shell;
pub mod state;
pub mod utils;
pub mod views;

pub use error::{CatalogError, Result};
pub use services::catalog::{CatalogApi, HttpCatalog};
pub use state::{Action, AppState, Origin, Store, SyncPolicy};
