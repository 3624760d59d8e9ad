//! Writes. Each operation runs in its own transaction and reports a notice
//! alongside its result; failures leave the store untouched.

use sea_orm::{ActiveModelTrait, DatabaseTransaction, TransactionTrait};
use time::PrimitiveDateTime;

use super::{store, Error, Kind, Notice, Outcome};
use entity::{Artist, ArtistActive, ArtistFields, Show, Venue, VenueActive, VenueFields};

/// Commits on success, rolls back otherwise.
async fn finish<T>(txn: DatabaseTransaction, result: Result<T, Error>) -> Result<T, Error> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                tracing::warn!(error = %rollback, "Could not roll back transaction");
            }
            Err(e)
        }
    }
}

fn logged<T>(kind: Kind, id: Option<i32>, result: Result<T, Error>) -> Result<T, Error> {
    if let Err(e) = &result {
        match e {
            Error::Storage(_) => tracing::error! {%kind, ?id, error = %e, "Mutation failed"},
            _ => tracing::warn! {%kind, ?id, error = %e, "Mutation rejected"},
        }
    }
    result
}

pub async fn create_venue<C>(db: &C, fields: VenueFields) -> Outcome<i32>
where
    C: TransactionTrait,
{
    let notices = Notice::listed(Kind::Venue, Some(&fields.name));
    let result = async {
        let txn = db.begin().await?;
        let result = fields
            .into_active_model()
            .insert(&txn)
            .await
            .map(|venue| venue.id)
            .map_err(Error::from);
        finish(txn, result).await
    }
    .await;
    if let Ok(id) = &result {
        tracing::info! {%id, "Venue listed"};
    }
    Outcome::new(logged(Kind::Venue, None, result), notices)
}

/// Replaces every editable field of the venue.
pub async fn update_venue<C>(db: &C, id: i32, fields: VenueFields) -> Outcome<Venue>
where
    C: TransactionTrait,
{
    let notices = Notice::updated(Kind::Venue, &fields.name);
    let result = async {
        let txn = db.begin().await?;
        let result = async {
            let mut active: VenueActive = store::get::<Venue, _>(&txn, id).await?.into();
            fields.assign(&mut active);
            Ok::<_, Error>(active.update(&txn).await?)
        }
        .await;
        finish(txn, result).await
    }
    .await;
    Outcome::new(logged(Kind::Venue, Some(id), result), notices)
}

/// Deletes the venue and its shows. The result is the number of shows removed.
pub async fn delete_venue<C>(db: &C, id: i32) -> Outcome<u64>
where
    C: TransactionTrait,
{
    let result = async {
        let txn = db.begin().await?;
        let result = store::delete::<Venue, _>(&txn, id).await;
        finish(txn, result).await
    }
    .await;
    Outcome::new(logged(Kind::Venue, Some(id), result), Notice::deleted(Kind::Venue))
}

pub async fn create_artist<C>(db: &C, fields: ArtistFields) -> Outcome<i32>
where
    C: TransactionTrait,
{
    let notices = Notice::listed(Kind::Artist, Some(&fields.name));
    let result = async {
        let txn = db.begin().await?;
        let result = fields
            .into_active_model()
            .insert(&txn)
            .await
            .map(|artist| artist.id)
            .map_err(Error::from);
        finish(txn, result).await
    }
    .await;
    if let Ok(id) = &result {
        tracing::info! {%id, "Artist listed"};
    }
    Outcome::new(logged(Kind::Artist, None, result), notices)
}

pub async fn update_artist<C>(db: &C, id: i32, fields: ArtistFields) -> Outcome<Artist>
where
    C: TransactionTrait,
{
    let notices = Notice::updated(Kind::Artist, &fields.name);
    let result = async {
        let txn = db.begin().await?;
        let result = async {
            let mut active: ArtistActive = store::get::<Artist, _>(&txn, id).await?.into();
            fields.assign(&mut active);
            Ok::<_, Error>(active.update(&txn).await?)
        }
        .await;
        finish(txn, result).await
    }
    .await;
    Outcome::new(logged(Kind::Artist, Some(id), result), notices)
}

pub async fn delete_artist<C>(db: &C, id: i32) -> Outcome<u64>
where
    C: TransactionTrait,
{
    let result = async {
        let txn = db.begin().await?;
        let result = store::delete::<Artist, _>(&txn, id).await;
        finish(txn, result).await
    }
    .await;
    Outcome::new(
        logged(Kind::Artist, Some(id), result),
        Notice::deleted(Kind::Artist),
    )
}

/// Books `artist_id` at `venue_id`. Both must exist; shows are never edited
/// afterwards.
pub async fn create_show<C>(
    db: &C,
    artist_id: i32,
    venue_id: i32,
    start_time: PrimitiveDateTime,
) -> Outcome<Show>
where
    C: TransactionTrait,
{
    let result = async {
        let txn = db.begin().await?;
        let result = store::insert_show(&txn, artist_id, venue_id, start_time).await;
        finish(txn, result).await
    }
    .await;
    if let Ok(show) = &result {
        tracing::info! {id = show.id, artist_id, venue_id, "Show listed"};
    }
    Outcome::new(
        logged(Kind::Show, None, result),
        Notice::listed(Kind::Show, None),
    )
}
