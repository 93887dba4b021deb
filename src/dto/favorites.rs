use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{error::AppError, models::NewFavorite};

pub const MISSING_FIELDS: &str = "Missing required fields";

/// Body of `POST /api/favorites`.
///
/// Every field is optional at the parsing stage so that an incomplete body
/// reaches [`CreateFavoriteRequest::validate`] instead of being rejected by
/// the extractor. `recipeId` accepts a JSON number or a numeric string.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavoriteRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub recipe_id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cook_time: Option<String>,
    #[serde(default)]
    pub servings: Option<String>,
}

impl CreateFavoriteRequest {
    /// Presence check only: empty strings and a zero recipe id count as missing.
    pub fn validate(self) -> Result<NewFavorite, AppError> {
        let user_id = self.user_id.filter(|s| !s.is_empty());
        let recipe_id = self.recipe_id.as_ref().and_then(recipe_id_from_json);
        let title = self.title.filter(|s| !s.is_empty());

        match (user_id, recipe_id, title) {
            (Some(user_id), Some(recipe_id), Some(title)) => Ok(NewFavorite {
                user_id,
                recipe_id,
                title,
                image: self.image,
                cook_time: self.cook_time,
                servings: self.servings,
            }),
            _ => Err(AppError::BadRequest(MISSING_FIELDS.to_string())),
        }
    }
}

fn recipe_id_from_json(value: &Value) -> Option<i32> {
    let id = match value {
        Value::Number(n) => match n.as_i64() {
            Some(id) => id,
            None => {
                let f = n.as_f64().filter(|f| f.fract() == 0.0)?;
                if f < f64::from(i32::MIN) || f > f64::from(i32::MAX) {
                    return None;
                }
                f as i64
            }
        },
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    i32::try_from(id).ok().filter(|id| *id != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> CreateFavoriteRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn accepts_complete_body() {
        let new = parse(json!({
            "userId": "u1",
            "recipeId": 42,
            "title": "Soup",
            "image": "https://img/soup.png",
            "cookTime": "30 minutes",
            "servings": "2"
        }))
        .validate()
        .unwrap();

        assert_eq!(new.user_id, "u1");
        assert_eq!(new.recipe_id, 42);
        assert_eq!(new.title, "Soup");
        assert_eq!(new.image.as_deref(), Some("https://img/soup.png"));
        assert_eq!(new.cook_time.as_deref(), Some("30 minutes"));
        assert_eq!(new.servings.as_deref(), Some("2"));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let new = parse(json!({ "userId": "u1", "recipeId": 1, "title": "Bread" }))
            .validate()
            .unwrap();
        assert!(new.image.is_none());
        assert!(new.cook_time.is_none());
        assert!(new.servings.is_none());
    }

    #[test]
    fn integral_float_recipe_id_is_accepted() {
        let new = parse(json!({ "userId": "u1", "recipeId": 42.0, "title": "Soup" }))
            .validate()
            .unwrap();
        assert_eq!(new.recipe_id, 42);
    }

    #[test]
    fn fractional_or_out_of_range_recipe_id_is_rejected() {
        for recipe_id in [json!(42.5), json!(1e12), json!(-3e10), json!(0.0)] {
            let body = json!({ "userId": "u1", "recipeId": recipe_id, "title": "Soup" });
            assert!(parse(body).validate().is_err(), "recipeId {recipe_id}");
        }
    }

    #[test]
    fn numeric_string_recipe_id_is_accepted() {
        let new = parse(json!({ "userId": "u1", "recipeId": "52772", "title": "Teriyaki" }))
            .validate()
            .unwrap();
        assert_eq!(new.recipe_id, 52772);
    }

    #[test]
    fn missing_or_falsy_required_fields_are_rejected() {
        let bodies = [
            json!({ "title": "Soup" }),
            json!({ "userId": "u1", "title": "Soup" }),
            json!({ "recipeId": 42, "title": "Soup" }),
            json!({ "userId": "u1", "recipeId": 42 }),
            json!({ "userId": "", "recipeId": 42, "title": "Soup" }),
            json!({ "userId": "u1", "recipeId": 0, "title": "Soup" }),
            json!({ "userId": "u1", "recipeId": 42, "title": "" }),
            json!({ "userId": "u1", "recipeId": null, "title": "Soup" }),
            json!({ "userId": "u1", "recipeId": "abc", "title": "Soup" }),
            json!({}),
        ];

        for body in bodies {
            let err = parse(body.clone()).validate().unwrap_err();
            match err {
                AppError::BadRequest(msg) => assert_eq!(msg, MISSING_FIELDS, "body: {body}"),
                other => panic!("unexpected error for {body}: {other:?}"),
            }
        }
    }
}
