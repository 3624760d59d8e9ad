pub mod artist;
pub mod genres;
pub mod show;
pub mod venue;

pub use genres::Genres;

pub use artist::ActiveModel as ArtistActive;
pub use artist::Column as ArtistColumn;
pub use artist::Entity as ArtistEntity;
pub use artist::Fields as ArtistFields;
pub use artist::Model as Artist;
pub use show::ActiveModel as ShowActive;
pub use show::Column as ShowColumn;
pub use show::Entity as ShowEntity;
pub use show::Model as Show;
pub use venue::ActiveModel as VenueActive;
pub use venue::Column as VenueColumn;
pub use venue::Entity as VenueEntity;
pub use venue::Fields as VenueFields;
pub use venue::Model as Venue;
