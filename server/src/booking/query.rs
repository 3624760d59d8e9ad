use std::collections::HashMap;

use sea_orm::{
    sea_query::{Expr, LikeExpr},
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, LoaderTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;
use time::PrimitiveDateTime;

use super::{
    resolver::{self, format_start_time, Partition, Side},
    store::{self, Named, Record},
    Error, Kind,
};
use base::setting::TimeFormat;
use entity::{
    Artist, ArtistColumn, ArtistEntity, Show, ShowColumn, ShowEntity, Venue, VenueColumn,
    VenueEntity,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing a city and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<Summary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub show_id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: PrimitiveDateTime,
    pub formatted_start_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail<T> {
    #[serde(flatten)]
    pub entity: T,
    pub past_shows: Vec<resolver::ShowEntry>,
    pub upcoming_shows: Vec<resolver::ShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T> Detail<T> {
    fn new(entity: T, partition: Partition) -> Self {
        Self {
            past_shows_count: partition.past_count(),
            upcoming_shows_count: partition.upcoming_count(),
            past_shows: partition.past,
            upcoming_shows: partition.upcoming,
            entity,
        }
    }
}

/// Every venue ordered by city, ties broken by id.
pub async fn list_venues_by_city<C>(db: &C) -> Result<Vec<Venue>, Error>
where
    C: ConnectionTrait,
{
    store::list::<Venue, _>(db, Some(VenueColumn::City)).await
}

pub async fn list_artists<C>(db: &C) -> Result<Vec<Artist>, Error>
where
    C: ConnectionTrait,
{
    store::list::<Artist, _>(db, None).await
}

/// Buckets venues by their (city, state) pair. Areas keep the order in which
/// they are first seen.
pub fn areas(venues: Vec<Venue>, upcoming: &HashMap<i32, usize>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    for venue in venues {
        let summary = Summary {
            id: venue.id,
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
            name: venue.name,
        };
        match areas
            .iter_mut()
            .find(|a| a.city == venue.city && a.state == venue.state)
        {
            Some(area) => area.venues.push(summary),
            None => areas.push(Area {
                city: venue.city,
                state: venue.state,
                venues: vec![summary],
            }),
        }
    }
    areas
}

#[derive(Debug, FromQueryResult)]
struct UpcomingCount {
    record_id: i32,
    upcoming: i64,
}

/// Number of shows after `now`, keyed by venue or artist id. Records without
/// upcoming shows are absent.
pub async fn upcoming_show_counts<C>(
    db: &C,
    side: Side,
    now: PrimitiveDateTime,
) -> Result<HashMap<i32, usize>, Error>
where
    C: ConnectionTrait,
{
    let column = match side {
        Side::Venue => ShowColumn::VenueId,
        Side::Artist => ShowColumn::ArtistId,
    };
    let counts = ShowEntity::find()
        .select_only()
        .column_as(column, "record_id")
        .column_as(Expr::col(ShowColumn::Id).count(), "upcoming")
        .filter(ShowColumn::StartTime.gt(now))
        .group_by(column)
        .into_model::<UpcomingCount>()
        .all(db)
        .await?;
    Ok(counts
        .into_iter()
        .map(|c| (c.record_id, c.upcoming as usize))
        .collect())
}

/// Pairs each named record with its number of upcoming shows.
pub fn summaries<R>(records: Vec<R>, upcoming: &HashMap<i32, usize>) -> Vec<Summary>
where
    R: Named,
{
    records
        .into_iter()
        .map(|r| Summary {
            id: r.id(),
            name: r.name().to_string(),
            num_upcoming_shows: upcoming.get(&r.id()).copied().unwrap_or(0),
        })
        .collect()
}

/// A LIKE pattern matching `term` anywhere, with the term lowercased and its
/// wildcards escaped by `\`.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Matches `term` anywhere in a column of lowercased names.
fn name_contains<E, Col>(column: Col, term: &str) -> sea_orm::sea_query::SimpleExpr
where
    E: EntityTrait,
    Col: ColumnTrait,
{
    Expr::col((E::default(), column)).like(LikeExpr::new(contains_pattern(term)).escape('\\'))
}

/// Case-insensitive substring search on names. An empty term matches
/// everything.
pub async fn search_by_name<R, C>(db: &C, term: &str) -> Result<SearchResults<R>, Error>
where
    R: Named,
    C: ConnectionTrait,
{
    let data = R::Entity::find()
        .filter(name_contains::<R::Entity, _>(R::search_column(), term))
        .order_by_asc(R::id_column())
        .all(db)
        .await?;
    tracing::trace!(kind = %R::KIND, term, count = data.len(), "Searched by name");
    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

async fn listings<C>(
    db: &C,
    shows: Vec<Show>,
    format: TimeFormat,
) -> Result<Vec<ShowListing>, Error>
where
    C: ConnectionTrait,
{
    let artists = shows.load_one(ArtistEntity, db).await?;
    let venues = shows.load_one(VenueEntity, db).await?;
    shows
        .into_iter()
        .zip(artists.into_iter().zip(venues))
        .map(|(show, (artist, venue))| {
            let artist = artist.ok_or(Error::IntegrityViolation {
                kind: Kind::Artist,
                id: show.artist_id,
            })?;
            let venue = venue.ok_or(Error::IntegrityViolation {
                kind: Kind::Venue,
                id: show.venue_id,
            })?;
            Ok(ShowListing {
                show_id: show.id,
                venue_id: venue.id,
                venue_name: venue.name,
                artist_id: artist.id,
                artist_name: artist.name,
                artist_image_link: artist.image_link,
                formatted_start_time: format_start_time(show.start_time, format),
                start_time: show.start_time,
            })
        })
        .collect()
}

/// Every show joined with its artist and venue, ordered by start time then id.
pub async fn list_all_shows<C>(db: &C, format: TimeFormat) -> Result<Vec<ShowListing>, Error>
where
    C: ConnectionTrait,
{
    let shows = ShowEntity::find()
        .order_by_asc(ShowColumn::StartTime)
        .order_by_asc(ShowColumn::Id)
        .all(db)
        .await?;
    listings(db, shows, format).await
}

/// The show listing restricted to artists whose name contains `term`.
pub async fn search_shows<C>(
    db: &C,
    term: &str,
    format: TimeFormat,
) -> Result<SearchResults<ShowListing>, Error>
where
    C: ConnectionTrait,
{
    let shows = ShowEntity::find()
        .join(
            sea_orm::JoinType::InnerJoin,
            entity::show::Relation::Artist.def(),
        )
        .filter(name_contains::<ArtistEntity, _>(ArtistColumn::NameSearch, term))
        .order_by_asc(ShowColumn::StartTime)
        .order_by_asc(ShowColumn::Id)
        .all(db)
        .await?;
    let data = listings(db, shows, format).await?;
    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

pub async fn venue_detail<C>(
    db: &C,
    id: i32,
    now: PrimitiveDateTime,
    format: TimeFormat,
) -> Result<Detail<Venue>, Error>
where
    C: ConnectionTrait,
{
    let venue = store::get::<Venue, _>(db, id).await?;
    let partition = resolver::shows_for(db, Side::Venue, venue.id(), now, format).await?;
    Ok(Detail::new(venue, partition))
}

pub async fn artist_detail<C>(
    db: &C,
    id: i32,
    now: PrimitiveDateTime,
    format: TimeFormat,
) -> Result<Detail<Artist>, Error>
where
    C: ConnectionTrait,
{
    let artist = store::get::<Artist, _>(db, id).await?;
    let partition = resolver::shows_for(db, Side::Artist, artist.id(), now, format).await?;
    Ok(Detail::new(artist, partition))
}
