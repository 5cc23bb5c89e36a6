// ============================================================================
// Account Management Service
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod state;
pub mod workflow;

pub use app::build_router;
pub use error::{ApiResult, ErrorDetails, Failure};
pub use gateway::{GatewayError, InMemoryGateway, ManagementGateway, SqlGateway};
pub use state::AppState;
