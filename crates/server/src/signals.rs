//! Reading signals from the browser and patching them back.
//!
//! The browser sends its signals as the JSON body of a POST, or as the
//! `datastar` query parameter of a GET. Outcomes go back as a single
//! `datastar-patch-signals` server-sent event.

use std::{
    convert::Infallible,
    pin::Pin,
    task::{Context, Poll},
};

use api_types::signals::SignalsPatch;
use axum::{
    body::Bytes,
    extract::{FromRequest, Query, Request},
    http::Method,
    response::sse::{Event, Sse},
};
use engine::{Field, Outcome};
use futures_util::Stream;
use serde::{Deserialize, de::DeserializeOwned};

use crate::ServerError;

pub(crate) const PATCH_SIGNALS_EVENT: &str = "datastar-patch-signals";

#[derive(Deserialize)]
struct DatastarQuery {
    datastar: String,
}

/// Extractor decoding the request's signals into `T`.
///
/// Decoding finishes before the handler runs, so a malformed request never
/// touches the stored form.
pub(crate) struct ReadSignals<T>(pub T);

fn decode_error(reason: String) -> ServerError {
    tracing::warn!("failed to read signals: {reason}");
    ServerError::Decode(reason)
}

impl<S, T> FromRequest<S> for ReadSignals<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let signals = if req.method() == Method::GET {
            let Query(query) = Query::<DatastarQuery>::try_from_uri(req.uri())
                .map_err(|err| decode_error(err.body_text()))?;
            serde_json::from_str(&query.datastar)
        } else {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|err| decode_error(err.body_text()))?;
            serde_json::from_slice(&body)
        };

        signals
            .map(ReadSignals)
            .map_err(|err| decode_error(err.to_string()))
    }
}

/// Build the patch for one rule outcome.
pub(crate) fn outcome_patch(field: Field, outcome: &Outcome) -> SignalsPatch {
    let patch = match outcome {
        Ok(()) => SignalsPatch::valid(field.error_key()),
        Err(violation) => SignalsPatch::invalid(field.error_key(), violation.to_string()),
    };
    patch.clearing(field.sibling_error_keys().iter().copied())
}

/// Single-event stream carrying one patch.
///
/// The body is written after the handler returns, so a client that goes away
/// first drops the stream with its event still unsent. That case is logged
/// here since nothing else observes it.
pub(crate) struct PatchStream {
    event: Option<Event>,
    error_key: String,
}

impl PatchStream {
    fn new(event: Event, error_key: impl Into<String>) -> Self {
        Self {
            event: Some(event),
            error_key: error_key.into(),
        }
    }

    fn is_pending(&self) -> bool {
        self.event.is_some()
    }
}

impl Stream for PatchStream {
    type Item = Result<Event, Infallible>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().event.take().map(Ok))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::from(self.is_pending());
        (left, Some(left))
    }
}

impl Drop for PatchStream {
    fn drop(&mut self) {
        if self.is_pending() {
            tracing::warn!(
                "transport error: client disconnected before {} was sent",
                self.error_key
            );
        }
    }
}

/// Wrap `patch` into the event stream answering the request.
pub(crate) fn patch_signals(patch: &SignalsPatch) -> Result<Sse<PatchStream>, ServerError> {
    let json = serde_json::to_string(patch).map_err(|err| {
        tracing::error!("failed to marshal {patch:?}: {err}");
        ServerError::Transport(err.to_string())
    })?;

    let event = Event::default()
        .event(PATCH_SIGNALS_EVENT)
        .data(format!("signals {json}"));
    Ok(Sse::new(PatchStream::new(event, &patch.error_key)))
}
