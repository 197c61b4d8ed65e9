use rocket::{catch, serde::json::Json, Request};
use shared::error::ErrorResponse;

// Fallbacks for errors raised outside route handlers (bad routes, bodies
// the JSON guard rejects before validation runs). Keeps every error body
// in the `{"error": code}` shape.

#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: "invalid_request".into(),
    })
}

#[catch(401)]
pub fn unauthorized(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: "not_logged_in".into(),
    })
}

#[catch(404)]
pub fn not_found(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: "not_found".into(),
    })
}

#[catch(422)]
pub fn unprocessable(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: "invalid_request".into(),
    })
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: "internal_error".into(),
    })
}
