use axum::{Router, routing::get};

use std::sync::Arc;

use crate::{session::SessionStore, states, validate};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub sessions: SessionStore,
}

impl ServerState {
    pub fn new(engine: Engine, sessions: SessionStore) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions,
        }
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/form/validate/{field}",
            get(validate::customer).post(validate::customer),
        )
        .route(
            "/form/validate/product/{index}/{field}",
            get(validate::product).post(validate::product),
        )
        .route("/form/states", get(states::list))
        .route("/form/states/{name}", get(states::get))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    sessions: SessionStore,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine, sessions))).await
}
