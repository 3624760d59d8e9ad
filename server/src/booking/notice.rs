use serde::Serialize;

use super::{Error, Kind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Success,
    Failure,
}

/// A message for the person who submitted a mutation, shown on the next page
/// they land on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn success(message: String) -> Self {
        Self {
            level: Level::Success,
            message,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            level: Level::Failure,
            message,
        }
    }

    pub fn listed(kind: Kind, name: Option<&str>) -> (Self, Self) {
        let subject = subject(kind, name);
        (
            Self::success(format!("{} was successfully listed!", subject)),
            Self::failure(format!(
                "An error occurred. {} could not be listed.",
                subject
            )),
        )
    }

    pub fn updated(kind: Kind, name: &str) -> (Self, Self) {
        let subject = subject(kind, Some(name));
        (
            Self::success(format!("{} was successfully updated!", subject)),
            Self::failure(format!(
                "An error occurred. {} could not be updated.",
                subject
            )),
        )
    }

    pub fn deleted(kind: Kind) -> (Self, Self) {
        (
            Self::success(format!("{} was successfully deleted!", kind)),
            Self::failure(format!("An error occurred. {} could not be deleted.", kind)),
        )
    }
}

fn subject(kind: Kind, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{} {}", kind, name),
        None => kind.to_string(),
    }
}

/// The result of a mutation together with the notice describing it.
#[derive(Debug)]
pub struct Outcome<T> {
    pub notice: Notice,
    pub result: Result<T, Error>,
}

impl<T> Outcome<T> {
    pub fn new(result: Result<T, Error>, (success, failure): (Notice, Notice)) -> Self {
        let notice = if result.is_ok() { success } else { failure };
        Self { notice, result }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_name_the_entity() {
        let (ok, err) = Notice::listed(Kind::Venue, Some("Blue Note"));
        assert_eq!(ok.message, "Venue Blue Note was successfully listed!");
        assert_eq!(ok.level, Level::Success);
        assert_eq!(
            err.message,
            "An error occurred. Venue Blue Note could not be listed."
        );
        assert_eq!(err.level, Level::Failure);

        let (ok, _) = Notice::listed(Kind::Show, None);
        assert_eq!(ok.message, "Show was successfully listed!");

        let (_, err) = Notice::updated(Kind::Artist, "Sax Trio");
        assert_eq!(
            err.message,
            "An error occurred. Artist Sax Trio could not be updated."
        );

        let (ok, err) = Notice::deleted(Kind::Artist);
        assert_eq!(ok.message, "Artist was successfully deleted!");
        assert_eq!(err.message, "An error occurred. Artist could not be deleted.");
    }

    #[test]
    fn outcome_picks_notice_from_result() {
        let outcome: Outcome<i32> = Outcome::new(
            Err(Error::NotFound {
                kind: Kind::Venue,
                id: 4,
            }),
            Notice::deleted(Kind::Venue),
        );
        assert!(!outcome.is_success());
        assert_eq!(outcome.notice.level, Level::Failure);
    }
}
