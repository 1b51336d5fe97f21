//! Error types shared across the store, recommender and server

use std::path::PathBuf;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A product or target id is not in the catalog
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input the computation cannot work with
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Io { .. } | Error::Json { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({"error": self.to_string()}))
    }
}

#[cfg(test)]
mod error_test {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::NotFound("99".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::InvalidInput("empty".into()).status_code(), StatusCode::BAD_REQUEST);

        let io = Error::Io {
            path: PathBuf::from("products.json"),
            source: std::io::Error::other("disk"),
        };
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_messages() {
        assert_eq!(Error::NotFound("product 99".into()).to_string(), "Not found: product 99");

        let io = Error::Io {
            path: PathBuf::from("users.json"),
            source: std::io::Error::other("disk"),
        };
        assert_eq!(io.to_string(), "Failed to access 'users.json': disk");
    }
}
