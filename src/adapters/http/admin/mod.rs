//! Admin console: a dashboard page and form-driven reindex triggers.

mod handlers;
mod routes;
mod views;

pub use handlers::{AdminAppState, ConferenceForm, TalkForm};
pub use routes::admin_router;
pub use views::escape_html;
