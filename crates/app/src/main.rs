use std::time::Duration;

mod settings;

const SESSION_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "invoice={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    // A broken state table must stop the process before it serves anything.
    let engine = match engine::Engine::builder().build() {
        Ok(engine) => engine,
        Err(err) => {
            tracing::error!("failed to build validation engine: {err}");
            return Err(err.into());
        }
    };
    tracing::info!("Loaded {} states", engine.states().len());

    let sessions = server::SessionStore::with_idle_minutes(
        settings.server.session_idle_minutes,
        settings.server.max_sessions,
    );
    let _sweeper = sessions.spawn_eviction(SESSION_SWEEP_PERIOD);

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return Err(err.into());
        }
    };

    if let Err(err) = server::run_with_listener(engine, sessions, listener).await {
        tracing::error!("server failed: {err}");
        return Err(err.into());
    }

    Ok(())
}
