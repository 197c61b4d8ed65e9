use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rating::RatingSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayersResponse {
    pub players: Vec<String>,
}

/// Fields are optional so a sparse or empty body reaches validation instead
/// of failing at deserialization with the wrong error code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub player: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub player: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub const fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub player: Option<String>,
}

/// `score` stays raw JSON; coercion to an integer happens in validation so
/// `1.5`, `"abc"` and `null` all produce `invalid_score`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub score: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingsResponse {
    pub summary: BTreeMap<String, RatingSummary>,
}
