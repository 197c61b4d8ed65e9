use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use shared::error::{ErrorResponse, VoteError};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Vote(#[from] VoteError),
    #[error("Failed to persist ledger: {0}")]
    Persistence(#[from] StoreError),
}

impl ApiError {
    fn status(&self) -> Status {
        match self {
            ApiError::Vote(VoteError::NotLoggedIn) => Status::Unauthorized,
            ApiError::Vote(_) => Status::BadRequest,
            ApiError::Persistence(_) => Status::InternalServerError,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Vote(e) => e.code(),
            ApiError::Persistence(_) => "persistence_error",
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let body = serde_json::to_string(&ErrorResponse {
            error: self.code().into(),
        })
        .map_err(|_| Status::InternalServerError)?;

        rocket::Response::build_from(body.respond_to(req)?)
            .status(self.status())
            .header(ContentType::JSON)
            .ok()
    }
}
