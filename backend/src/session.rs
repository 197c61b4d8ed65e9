use rocket::http::{Cookie, CookieJar, SameSite};

/// Session state is the cookie itself: a private (encrypted + authenticated)
/// cookie holding the player name, no server-side table. Forgeability is a
/// key-management concern (`ROCKET_SECRET_KEY`), not an application one.
const SESSION_COOKIE: &str = "player";

/// Resolves the request's identity, or `None` when no session exists. The
/// decrypted value is trusted as-is; roster membership was checked when the
/// session was issued.
pub fn current_player(jar: &CookieJar<'_>) -> Option<String> {
    jar.get_private(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Binds the client to `player`. Callers validate roster membership first.
pub fn log_in(jar: &CookieJar<'_>, player: &str) {
    let cookie = Cookie::build((SESSION_COOKIE, player.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/");
    jar.add_private(cookie);
}

/// Idempotent; clearing an absent session is fine.
pub fn log_out(jar: &CookieJar<'_>) {
    jar.remove_private(SESSION_COOKIE);
}
