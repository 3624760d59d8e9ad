use time::{macros::format_description, PrimitiveDateTime};

use crate::booking::Error;
use base::util::non_empty;
use entity::{ArtistFields, VenueFields};

/// Decoded form pairs in submission order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormData(Vec<(String, String)>);

impl FormData {
    pub fn parse(body: &[u8]) -> Self {
        Self(url::form_urlencoded::parse(body).into_owned().collect())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted under `key`, in order.
    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.to_owned())
            .collect()
    }

    pub fn required(&self, key: &str) -> Result<String, Error> {
        self.optional(key)
            .ok_or_else(|| Error::Validation(format!("missing field `{}`", key)))
    }

    pub fn optional(&self, key: &str) -> Option<String> {
        non_empty(self.get(key).map(str::to_owned))
    }

    /// Checkbox semantics: absent or unrecognised values are false.
    pub fn flag(&self, key: &str) -> bool {
        matches!(
            self.get(key).map(str::trim),
            Some("y" | "on" | "true" | "True" | "1")
        )
    }

    pub fn id(&self, key: &str) -> Result<i32, Error> {
        let value = self.required(key)?;
        value
            .parse()
            .map_err(|_| Error::Validation(format!("`{}` is not a valid id: {}", key, value)))
    }

    /// Accepts `YYYY-MM-DD HH:MM[:SS]`, with either a space or a `T` between
    /// date and time.
    pub fn timestamp(&self, key: &str) -> Result<PrimitiveDateTime, Error> {
        let value = self.required(key)?;
        let normalized = value.replacen('T', " ", 1);
        PrimitiveDateTime::parse(
            &normalized,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        )
        .or_else(|_| {
            PrimitiveDateTime::parse(
                &normalized,
                format_description!("[year]-[month]-[day] [hour]:[minute]"),
            )
        })
        .map_err(|e| Error::Validation(format!("`{}` is not a valid time: {}", key, e)))
    }
}

pub fn venue_fields(form: &FormData) -> Result<VenueFields, Error> {
    Ok(VenueFields {
        name: form.required("name")?,
        city: form.required("city")?,
        state: form.required("state")?,
        address: form.required("address")?,
        phone: form.required("phone")?,
        genres: form.get_all("genres"),
        website: form.optional("website"),
        image_link: form.optional("image_link"),
        facebook_link: form.optional("facebook_link"),
        seeking_talent: form.flag("seeking_talent"),
        seeking_description: form.optional("seeking_description"),
    })
}

pub fn artist_fields(form: &FormData) -> Result<ArtistFields, Error> {
    Ok(ArtistFields {
        name: form.required("name")?,
        city: form.required("city")?,
        state: form.required("state")?,
        phone: form.required("phone")?,
        genres: form.get_all("genres"),
        image_link: form.optional("image_link"),
        facebook_link: form.optional("facebook_link"),
        seeking_venue: form.flag("seeking_venue"),
        seeking_description: form.optional("seeking_description"),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowForm {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: PrimitiveDateTime,
}

pub fn show_form(form: &FormData) -> Result<ShowForm, Error> {
    Ok(ShowForm {
        artist_id: form.id("artist_id")?,
        venue_id: form.id("venue_id")?,
        start_time: form.timestamp("start_time")?,
    })
}
