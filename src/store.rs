use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set,
};

use crate::{
    db::OrmConn,
    entity::favorites::{ActiveModel, Column, Entity as Favorites},
    error::AppResult,
    models::{Favorite, NewFavorite},
};

/// Data access for the favorites relation. One method per SQL statement.
#[async_trait]
pub trait FavoriteStore: Send + Sync + 'static {
    async fn create(&self, new: NewFavorite) -> AppResult<Favorite>;

    /// All favorites whose `user_id` equals `user_id`, in storage order.
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Favorite>>;

    /// Deletes every row matching both keys; returns how many rows went away.
    async fn delete(&self, user_id: &str, recipe_id: i32) -> AppResult<u64>;
}

#[derive(Clone)]
pub struct OrmFavoriteStore {
    orm: OrmConn,
}

impl OrmFavoriteStore {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl FavoriteStore for OrmFavoriteStore {
    async fn create(&self, new: NewFavorite) -> AppResult<Favorite> {
        let active = ActiveModel {
            id: NotSet,
            user_id: Set(new.user_id),
            recipe_id: Set(new.recipe_id),
            title: Set(new.title),
            image: Set(new.image),
            cook_time: Set(new.cook_time),
            servings: Set(new.servings),
            created_at: NotSet,
        };
        let model = active.insert(&self.orm).await?;
        Ok(model.into())
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Favorite>> {
        let items = Favorites::find()
            .filter(Column::UserId.eq(user_id))
            .all(&self.orm)
            .await?
            .into_iter()
            .map(Favorite::from)
            .collect();
        Ok(items)
    }

    async fn delete(&self, user_id: &str, recipe_id: i32) -> AppResult<u64> {
        let result = Favorites::delete_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::RecipeId.eq(recipe_id))
            .exec(&self.orm)
            .await?;
        Ok(result.rows_affected)
    }
}
