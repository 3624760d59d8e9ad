use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Genre tags exactly as submitted: order and duplicates are kept.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Genres(pub Vec<String>);

impl From<Vec<String>> for Genres {
    fn from(genres: Vec<String>) -> Self {
        Genres(genres)
    }
}

impl<'a> From<&[&'a str]> for Genres {
    fn from(genres: &[&'a str]) -> Self {
        Genres(genres.iter().map(|g| g.to_string()).collect())
    }
}
