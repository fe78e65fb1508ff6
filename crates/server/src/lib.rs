use axum::{Json, extract::rejection::PathRejection, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener};
pub use session::{DEFAULT_MAX_SESSIONS, SESSION_COOKIE, SessionStore};

mod form;
mod server;
mod session;
mod signals;
mod states;
mod validate;

pub mod types {
    pub mod form {
        pub use api_types::form::{CustomerSignals, ProductSignals};
        pub use engine::{CustomerRecord, ProductRecord};
    }

    pub mod signals {
        pub use api_types::signals::SignalsPatch;
    }

    pub mod state {
        pub use api_types::state::{StateList, StateView};
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Request body or query could not be turned into signals.
    Decode(String),
    /// The outcome could not be written back to the client.
    Transport(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::UnknownField(_) | EngineError::UnknownState(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidStateTable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::InvalidStateTable(reason) => {
            tracing::error!("state table error: {reason}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Decode(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Transport(err) => {
                tracing::error!("transport error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        let reason = value.body_text();
        tracing::warn!("malformed request path: {reason}");
        Self::Decode(reason)
    }
}
