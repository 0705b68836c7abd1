use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;

use padel_common::errors::{Error, ErrorKind};

/// Body of every error response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorBody
{
    pub error: String,
}

impl ErrorBody
{
    pub fn new<S>(error: S) -> ErrorBody
        where S: Into<String>
    {
        ErrorBody {
            error: error.into(),
        }
    }
}

#[derive(Debug)]
pub struct ApiError
{
    pub status: Status,
    pub message: String,
}

pub type ApiResult<T> = ::std::result::Result<T, ApiError>;

fn status_for(kind: &ErrorKind) -> Status
{
    match *kind
    {
        ErrorKind::NoSuchLeague(_) | ErrorKind::NoSuchPlayer(_) | ErrorKind::NoSuchMatch(_) => Status::NotFound,
        ErrorKind::DuplicateName(_) | ErrorKind::PlayerHasMatches(_, _) => Status::Conflict,
        ErrorKind::EmptyName
            | ErrorKind::InvalidSets(_)
            | ErrorKind::NoMajority(_, _)
            | ErrorKind::DuplicatePlayer(_)
            | ErrorKind::NotInRoster(_, _)
            | ErrorKind::RosterTooSmall(_, _) => Status::UnprocessableEntity,
        /* UnknownPlayer and CorruptSnapshot mean stored data disagrees with itself, nothing the caller can fix */
        _ => Status::InternalServerError,
    }
}

impl From<Error> for ApiError
{
    fn from(error: Error) -> ApiError
    {
        let status = status_for(error.kind());

        if status == Status::InternalServerError
        {
            error!("Failed to handle request because {}", error);
        } else
        {
            warn!("Rejected request because {}", error);
        }

        ApiError {
            status,
            message: error.to_string(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError
{
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static>
    {
        status::Custom(self.status, Json(ErrorBody::new(self.message))).respond_to(request)
    }
}
