//! JSON API: health, reindex triggers and the webhook receiver.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, ReindexResponse, WebhookResponse};
pub use handlers::{status_for, ApiAppState, ApiError};
pub use routes::api_router;
