use std::env;
use std::path::PathBuf;

use shared::rating::Roster;
use tracing::{info, warn};

const DEFAULT_PLAYERS: &str = "player1,player2,player3";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = "data";
const LEDGER_FILE: &str = "votes.json";

/// Process-lifetime configuration. The roster is fixed here and immutable
/// afterwards; membership in it is the only authorization check.
#[derive(Debug)]
pub struct AppConfig {
    pub roster: Roster,
    pub port: u16,
    pub ledger_path: PathBuf,
}

impl AppConfig {
    /// `PLAYERS` (comma-separated roster), `PORT`, `DATA_DIR`. Missing or
    /// invalid values log and fall back to defaults.
    pub fn from_env() -> Self {
        let players = env::var("PLAYERS").unwrap_or_else(|_| {
            info!("PLAYERS not set, using default roster");
            DEFAULT_PLAYERS.to_string()
        });

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Invalid PORT value {raw:?}: {e}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        Self::new(&players, port, data_dir)
    }

    pub fn new(players: &str, port: u16, data_dir: PathBuf) -> Self {
        let roster = Roster::parse(players);
        if roster.is_empty() {
            warn!("Roster is empty; every login will be rejected");
        }
        Self {
            roster,
            port,
            ledger_path: data_dir.join(LEDGER_FILE),
        }
    }
}
