pub mod catchers;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod store;

use rocket::{catchers, routes, Build, Rocket};

use crate::config::AppConfig;
use crate::routes::AppState;
use crate::store::{LedgerStore, StoreError};

pub use shared::{models::*, error::*};

/// Builds the full application rocket from explicit config, loading the
/// ledger at startup. Tests stand up instances against scratch data dirs.
pub fn build_app(config: AppConfig) -> Result<Rocket<Build>, StoreError> {
    let store = LedgerStore::open(&config.ledger_path)?;
    let figment = rocket::Config::figment().merge(("port", config.port));

    Ok(rocket::custom(figment)
        .manage(AppState::new(config, store))
        .mount(
            "/api",
            routes![
                routes::players,
                routes::login,
                routes::logout,
                routes::me,
                routes::vote,
                routes::ratings,
            ],
        )
        .register(
            "/",
            catchers![
                catchers::bad_request,
                catchers::unauthorized,
                catchers::not_found,
                catchers::unprocessable,
                catchers::internal_error,
            ],
        ))
}

#[cfg(test)]
mod tests;
