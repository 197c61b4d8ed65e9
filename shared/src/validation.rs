use serde_json::Value;

use crate::error::VoteError;
use crate::rating::{Roster, Score};

/// A login succeeds only for a non-empty, exact roster member.
pub fn validate_login(player: Option<&str>, roster: &Roster) -> Result<String, VoteError> {
    match player {
        Some(name) if !name.is_empty() && roster.contains(name) => Ok(name.to_string()),
        _ => Err(VoteError::InvalidPlayer),
    }
}

/// Validates a vote submission. The check order is load-bearing: the first
/// failed check decides the error a malformed request receives, so an
/// unauthenticated self-vote with a bad score reports `NotLoggedIn`.
///
/// `identity` is trusted as-is; roster membership was checked when the
/// session was issued, and an identity the roster no longer contains still
/// counts as authenticated.
pub fn validate_vote(
    identity: Option<&str>,
    to: Option<&str>,
    score: &Value,
    roster: &Roster,
) -> Result<(String, String, Score), VoteError> {
    let from = identity.ok_or(VoteError::NotLoggedIn)?;

    let to = match to {
        Some(t) if !t.is_empty() && roster.contains(t) => t,
        _ => return Err(VoteError::InvalidTarget),
    };

    if from == to {
        return Err(VoteError::SelfVoteForbidden);
    }

    let score = coerce_score(score).ok_or(VoteError::InvalidScore)?;

    Ok((from.to_string(), to.to_string(), score))
}

/// Accepts a JSON number that is numerically an integer in range; `5` and
/// `5.0` pass, strings and everything else do not.
fn coerce_score(raw: &Value) -> Option<Score> {
    let n = raw.as_i64().or_else(|| {
        raw.as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })?;
    Score::try_from(n).ok()
}
