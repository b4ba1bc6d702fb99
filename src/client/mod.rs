//! Client side of the events API: HTTP access, a cached calendar view,
//! the create form model and text rendering used by the `eventos` binary.

pub mod api;
pub mod badge;
pub mod calendar;
pub mod form;
pub mod render;
pub mod time;

use thiserror::Error;

pub use api::EventsApi;
pub use badge::Badge;
pub use calendar::{upcoming_events, Calendar};
pub use form::{EventForm, FormError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Api { status: u16, message: String },
}
