use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use time::PrimitiveDateTime;

use super::{Error, Kind};
use entity::{
    Artist, ArtistColumn, ArtistEntity, Show, ShowColumn, ShowEntity, Venue, VenueColumn,
    VenueEntity,
};

/// A row of one of the three booking tables.
pub trait Record: Sized + Send + Sync {
    type Entity: EntityTrait<Model = Self>;

    const KIND: Kind;

    fn id(&self) -> i32;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    /// The show column referencing this record, if shows hang off it.
    fn show_column() -> Option<ShowColumn> {
        None
    }
}

/// A record that can be searched by name.
pub trait Named: Record {
    fn name(&self) -> &str;

    /// The lowercased copy of the name that searches match against.
    fn search_column() -> <Self::Entity as EntityTrait>::Column;
}

impl Record for Venue {
    type Entity = VenueEntity;
    const KIND: Kind = Kind::Venue;

    fn id(&self) -> i32 {
        self.id
    }

    fn id_column() -> VenueColumn {
        VenueColumn::Id
    }

    fn show_column() -> Option<ShowColumn> {
        Some(ShowColumn::VenueId)
    }
}

impl Named for Venue {
    fn name(&self) -> &str {
        &self.name
    }

    fn search_column() -> VenueColumn {
        VenueColumn::NameSearch
    }
}

impl Record for Artist {
    type Entity = ArtistEntity;
    const KIND: Kind = Kind::Artist;

    fn id(&self) -> i32 {
        self.id
    }

    fn id_column() -> ArtistColumn {
        ArtistColumn::Id
    }

    fn show_column() -> Option<ShowColumn> {
        Some(ShowColumn::ArtistId)
    }
}

impl Named for Artist {
    fn name(&self) -> &str {
        &self.name
    }

    fn search_column() -> ArtistColumn {
        ArtistColumn::NameSearch
    }
}

impl Record for Show {
    type Entity = ShowEntity;
    const KIND: Kind = Kind::Show;

    fn id(&self) -> i32 {
        self.id
    }

    fn id_column() -> ShowColumn {
        ShowColumn::Id
    }
}

pub async fn get<R, C>(db: &C, id: i32) -> Result<R, Error>
where
    R: Record,
    C: ConnectionTrait,
{
    R::Entity::find()
        .filter(R::id_column().eq(id))
        .one(db)
        .await?
        .ok_or(Error::NotFound { kind: R::KIND, id })
}

/// Lists every record of a kind, ordered by `order_by` (when given) with ties
/// broken by id.
pub async fn list<R, C>(
    db: &C,
    order_by: Option<<R::Entity as EntityTrait>::Column>,
) -> Result<Vec<R>, Error>
where
    R: Record,
    C: ConnectionTrait,
{
    let mut select = R::Entity::find();
    if let Some(column) = order_by {
        select = select.order_by_asc(column);
    }
    Ok(select.order_by_asc(R::id_column()).all(db).await?)
}

/// The `limit` most recently created records, newest first.
pub async fn recent<R, C>(db: &C, limit: u64) -> Result<Vec<R>, Error>
where
    R: Record,
    C: ConnectionTrait,
{
    Ok(R::Entity::find()
        .order_by_desc(R::id_column())
        .limit(limit)
        .all(db)
        .await?)
}

/// Deletes a record together with every show referencing it and returns how
/// many shows went with it. Callers run this inside a transaction so a failure
/// halfway through leaves the shows in place.
pub async fn delete<R, C>(db: &C, id: i32) -> Result<u64, Error>
where
    R: Record,
    C: ConnectionTrait,
{
    let cascaded = match R::show_column() {
        Some(column) => {
            ShowEntity::delete_many()
                .filter(column.eq(id))
                .exec(db)
                .await?
                .rows_affected
        }
        None => 0,
    };
    let deleted = R::Entity::delete_many()
        .filter(R::id_column().eq(id))
        .exec(db)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(Error::NotFound { kind: R::KIND, id });
    }
    tracing::trace!(kind = %R::KIND, id, cascaded, "Deleted record");
    Ok(cascaded)
}

/// Inserts a show after checking that both ends of it exist.
pub async fn insert_show<C>(
    db: &C,
    artist_id: i32,
    venue_id: i32,
    start_time: PrimitiveDateTime,
) -> Result<Show, Error>
where
    C: ConnectionTrait,
{
    get::<Artist, _>(db, artist_id)
        .await
        .map_err(dangling)?;
    get::<Venue, _>(db, venue_id).await.map_err(dangling)?;
    Ok(entity::show::new_active_model(artist_id, venue_id, start_time)
        .insert(db)
        .await?)
}

fn dangling(e: Error) -> Error {
    match e {
        Error::NotFound { kind, id } => Error::IntegrityViolation { kind, id },
        e => e,
    }
}
