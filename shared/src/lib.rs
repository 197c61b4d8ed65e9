pub mod error;
pub mod models;
pub mod rating;
pub mod validation;

pub use error::{ErrorResponse, VoteError};
pub use models::*;
pub use rating::{compute_summary, RatingSummary, Roster, Score, VoteMap};
pub use validation::{validate_login, validate_vote};
