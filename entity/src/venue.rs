use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use super::genres::Genres;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "venue")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// `name` in Unicode lowercase, matched by name searches.
    #[serde(skip)]
    pub name_search: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Genres,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub seeking_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show::Entity")]
    Show,
}

impl Related<super::show::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Show.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Every user-editable venue field, as submitted by a create or edit form.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Fields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl Fields {
    /// Overwrites every editable column of `active`; the id is left untouched.
    pub fn assign(self, active: &mut ActiveModel) {
        active.name_search = Set(self.name.to_lowercase());
        active.name = Set(self.name);
        active.city = Set(self.city);
        active.state = Set(self.state);
        active.address = Set(self.address);
        active.phone = Set(self.phone);
        active.genres = Set(self.genres.into());
        active.website = Set(self.website);
        active.image_link = Set(self.image_link);
        active.facebook_link = Set(self.facebook_link);
        active.seeking_talent = Set(self.seeking_talent);
        active.seeking_description = Set(self.seeking_description);
    }

    pub fn into_active_model(self) -> ActiveModel {
        let mut active = ActiveModel::new();
        self.assign(&mut active);
        active
    }
}
