//! Operation surface.
//!
//! - `services.rs`: `LayoutService`, one method per operation plus the JSON dispatcher
//! - `dto.rs`: request/response DTOs and wire mapping
//! - `errors.rs`: error type and its `{"error": ...}` rendering

pub mod dto;
pub mod errors;
pub mod services;

pub use errors::ApiError;
pub use services::LayoutService;
