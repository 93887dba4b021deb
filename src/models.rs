use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::favorites::Model as FavoriteModel;

/// A user's bookmarked recipe as returned over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i32,
    pub user_id: String,
    pub recipe_id: i32,
    pub title: String,
    pub image: Option<String>,
    pub cook_time: Option<String>,
    pub servings: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Validated input for an insert; `id` and `created_at` come from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFavorite {
    pub user_id: String,
    pub recipe_id: i32,
    pub title: String,
    pub image: Option<String>,
    pub cook_time: Option<String>,
    pub servings: Option<String>,
}

impl From<FavoriteModel> for Favorite {
    fn from(model: FavoriteModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            recipe_id: model.recipe_id,
            title: model.title,
            image: model.image,
            cook_time: model.cook_time,
            servings: model.servings,
            // zone-less column defaulted to `NOW() AT TIME ZONE 'UTC'`
            created_at: model.created_at.map(|ts| ts.and_utc()),
        }
    }
}
