//! Per-field validation endpoints.

use api_types::form::CustomerSignals;
use axum::{
    extract::{Path, State, rejection::PathRejection},
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use engine::{Field, ProductField};

use crate::{
    ServerError, form,
    server::ServerState,
    session,
    signals::{ReadSignals, outcome_patch, patch_signals},
};

/// Merge the signals into the caller's form, run the rule of `field` and
/// answer with the outcome patch.
async fn validate(
    state: ServerState,
    jar: CookieJar,
    field: Field,
    signals: CustomerSignals,
) -> Result<impl IntoResponse, ServerError> {
    let engine = state.engine.clone();
    let (session_id, outcome) = state
        .sessions
        .with_form(session::session_id(&jar), |record| {
            form::apply(record, signals);
            engine.evaluate(field, record)
        })
        .await;

    if let Err(violation) = &outcome {
        tracing::debug!("{} rejected: {violation}", field.signal_name());
    }

    let sse = patch_signals(&outcome_patch(field, &outcome))?;
    Ok((session::remember(jar, session_id), sse))
}

pub async fn customer(
    State(state): State<ServerState>,
    path: Result<Path<String>, PathRejection>,
    jar: CookieJar,
    ReadSignals(signals): ReadSignals<CustomerSignals>,
) -> Result<impl IntoResponse, ServerError> {
    let Path(name) = path?;
    let field = Field::try_from(name.as_str())?;
    validate(state, jar, field, signals).await
}

pub async fn product(
    State(state): State<ServerState>,
    path: Result<Path<(usize, String)>, PathRejection>,
    jar: CookieJar,
    ReadSignals(signals): ReadSignals<CustomerSignals>,
) -> Result<impl IntoResponse, ServerError> {
    let Path((index, name)) = path?;
    let field = Field::Product {
        index,
        field: ProductField::try_from(name.as_str())?,
    };
    validate(state, jar, field, signals).await
}
