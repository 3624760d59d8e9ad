use std::cmp::Ordering;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use time::{format_description::FormatItem, macros::format_description, PrimitiveDateTime};

use super::{Error, Kind};
use base::setting::TimeFormat;
use entity::{ArtistEntity, ShowColumn, ShowEntity, VenueEntity};

const MEDIUM: &[FormatItem<'_>] = format_description!(
    "[weekday repr:short] [month], [day], [year] [hour repr:12 padding:none]:[minute][period]"
);
const FULL: &[FormatItem<'_>] = format_description!(
    "[weekday] [month repr:long], [day padding:none], [year] at [hour repr:12 padding:none]:[minute][period]"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    Past,
    Upcoming,
}

/// Places a start time relative to `now`. A show starting exactly now is
/// neither past nor upcoming.
pub fn classify(start_time: PrimitiveDateTime, now: PrimitiveDateTime) -> Option<When> {
    match start_time.cmp(&now) {
        Ordering::Less => Some(When::Past),
        Ordering::Greater => Some(When::Upcoming),
        Ordering::Equal => None,
    }
}

pub fn format_start_time(start_time: PrimitiveDateTime, format: TimeFormat) -> String {
    let description = match format {
        TimeFormat::Medium => MEDIUM,
        TimeFormat::Full => FULL,
    };
    start_time.format(description).unwrap_or_else(|e| {
        tracing::warn!(%start_time, error = %e, "Could not format start time");
        start_time.to_string()
    })
}

/// Whose shows are being resolved. The counterpart is the other end of each
/// show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Venue,
    Artist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counterpart {
    pub kind: Kind,
    pub id: i32,
    pub name: String,
    pub image_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowEntry {
    pub show_id: i32,
    pub counterpart: Counterpart,
    pub start_time: PrimitiveDateTime,
    pub formatted_start_time: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub past: Vec<ShowEntry>,
    pub upcoming: Vec<ShowEntry>,
}

impl Partition {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }

    fn push(&mut self, entry: ShowEntry, now: PrimitiveDateTime) {
        match classify(entry.start_time, now) {
            Some(When::Past) => self.past.push(entry),
            Some(When::Upcoming) => self.upcoming.push(entry),
            None => (),
        }
    }
}

/// Splits the shows of the venue or artist `id` into past and upcoming ones,
/// each ordered by start time with ties broken by show id.
pub async fn shows_for<C>(
    db: &C,
    side: Side,
    id: i32,
    now: PrimitiveDateTime,
    format: TimeFormat,
) -> Result<Partition, Error>
where
    C: ConnectionTrait,
{
    let (column, counterpart) = match side {
        Side::Venue => (ShowColumn::VenueId, Kind::Artist),
        Side::Artist => (ShowColumn::ArtistId, Kind::Venue),
    };
    let select = ShowEntity::find()
        .filter(column.eq(id))
        .order_by_asc(ShowColumn::StartTime)
        .order_by_asc(ShowColumn::Id);

    let rows: Vec<_> = match side {
        Side::Venue => select
            .find_also_related(ArtistEntity)
            .all(db)
            .await?
            .into_iter()
            .map(|(show, artist)| {
                let artist = artist.map(|a| Counterpart {
                    kind: Kind::Artist,
                    id: a.id,
                    name: a.name,
                    image_link: a.image_link,
                });
                (show, artist)
            })
            .collect(),
        Side::Artist => select
            .find_also_related(VenueEntity)
            .all(db)
            .await?
            .into_iter()
            .map(|(show, venue)| {
                let venue = venue.map(|v| Counterpart {
                    kind: Kind::Venue,
                    id: v.id,
                    name: v.name,
                    image_link: v.image_link,
                });
                (show, venue)
            })
            .collect(),
    };

    let mut partition = Partition::default();
    for (show, other) in rows {
        let other = other.ok_or(Error::IntegrityViolation {
            kind: counterpart,
            id: match side {
                Side::Venue => show.artist_id,
                Side::Artist => show.venue_id,
            },
        })?;
        partition.push(
            ShowEntry {
                show_id: show.id,
                counterpart: other,
                start_time: show.start_time,
                formatted_start_time: format_start_time(show.start_time, format),
            },
            now,
        );
    }
    Ok(partition)
}
