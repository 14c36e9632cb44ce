//! Request/response surface for the layout engine: DTOs, error mapping, and
//! the `LayoutService` used by the `storeplan` binary.

pub mod app;
pub mod config;

pub use app::{ApiError, LayoutService};
pub use config::ServiceConfig;
