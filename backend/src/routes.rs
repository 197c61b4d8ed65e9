use rocket::http::CookieJar;
use rocket::serde::json::Json;
use rocket::{get, post, State};
use tracing::{debug, instrument};

use shared::models::{
    LoginRequest, LoginResponse, MeResponse, OkResponse, PlayersResponse, RatingsResponse,
    VoteRequest,
};
use shared::rating::compute_summary;
use shared::validation::{validate_login, validate_vote};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session;
use crate::store::LedgerStore;

pub struct AppState {
    pub config: AppConfig,
    pub store: LedgerStore,
}

impl AppState {
    pub fn new(config: AppConfig, store: LedgerStore) -> Self {
        Self { config, store }
    }
}

#[get("/players")]
pub async fn players(state: &State<AppState>) -> Json<PlayersResponse> {
    Json(PlayersResponse {
        players: state.config.roster.names().to_vec(),
    })
}

#[instrument(skip(state, jar, request))]
#[post("/login", format = "json", data = "<request>")]
pub async fn login(
    state: &State<AppState>,
    jar: &CookieJar<'_>,
    request: Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let player = validate_login(request.player.as_deref(), &state.config.roster)?;
    session::log_in(jar, &player);
    debug!("Session opened for {player}");
    Ok(Json(LoginResponse { ok: true, player }))
}

#[post("/logout")]
pub async fn logout(jar: &CookieJar<'_>) -> Json<OkResponse> {
    session::log_out(jar);
    Json(OkResponse::new())
}

#[get("/me")]
pub async fn me(jar: &CookieJar<'_>) -> Json<MeResponse> {
    Json(MeResponse {
        player: session::current_player(jar),
    })
}

#[instrument(skip(state, jar, request))]
#[post("/vote", format = "json", data = "<request>")]
pub async fn vote(
    state: &State<AppState>,
    jar: &CookieJar<'_>,
    request: Json<VoteRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let identity = session::current_player(jar);
    let (from, to, score) = validate_vote(
        identity.as_deref(),
        request.to.as_deref(),
        &request.score,
        &state.config.roster,
    )?;
    state.store.record(&from, &to, score)?;
    Ok(Json(OkResponse::new()))
}

#[get("/ratings")]
pub async fn ratings(state: &State<AppState>) -> Result<Json<RatingsResponse>, ApiError> {
    let votes = state.store.snapshot()?;
    Ok(Json(RatingsResponse {
        summary: compute_summary(&state.config.roster, &votes),
    }))
}
