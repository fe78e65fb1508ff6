//! State reference endpoints, used to fill the state dropdown.

use api_types::state::{StateList, StateView};
use axum::{
    Json,
    extract::{Path, State},
};
use engine::{EngineError, StateInfo};

use crate::{ServerError, server::ServerState};

fn map_state(name: &str, info: &StateInfo) -> StateView {
    StateView {
        name: name.to_string(),
        min_code: info.min_code,
        max_code: info.max_code,
        cities: info.cities.iter().map(|city| city.to_string()).collect(),
    }
}

pub async fn list(State(state): State<ServerState>) -> Json<StateList> {
    let states = state
        .engine
        .states()
        .iter()
        .map(|(name, info)| map_state(name, info))
        .collect();

    Json(StateList { states })
}

pub async fn get(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<StateView>, ServerError> {
    let info = state
        .engine
        .states()
        .get(&name)
        .ok_or_else(|| EngineError::UnknownState(name.clone()))?;

    Ok(Json(map_state(name.trim(), info)))
}
