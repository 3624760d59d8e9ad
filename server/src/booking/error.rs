use std::fmt::Display;

use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Venue,
    Artist,
    Show,
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Venue => write!(f, "Venue"),
            Kind::Artist => write!(f, "Artist"),
            Kind::Show => write!(f, "Show"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{kind} {id} not found")]
    NotFound { kind: Kind, id: i32 },

    #[error("Show references a missing {kind} {id}")]
    IntegrityViolation { kind: Kind, id: i32 },

    #[error("Invalid form data: {0}")]
    Validation(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] DbErr),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
