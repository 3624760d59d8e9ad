//! The booking directory: venues, artists and the shows linking them.
//!
//! [`store`] holds the primitive record operations, [`resolver`] splits a
//! record's shows into past and upcoming ones, [`query`] assembles the read
//! views and [`mutation`] wraps every write in its own transaction.

pub mod error;
pub mod mutation;
pub mod notice;
pub mod query;
pub mod resolver;
pub mod store;

pub use error::{Error, Kind};
pub use notice::{Notice, Outcome};

use time::{OffsetDateTime, PrimitiveDateTime};

/// The current instant as a naive UTC timestamp, comparable with stored
/// start times.
pub fn now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}
