use crate::{
    dto::favorites::CreateFavoriteRequest,
    error::{AppError, AppResult},
    models::Favorite,
    response::MessageResponse,
    state::AppState,
};

pub const FAVORITE_REMOVED: &str = "Favorite removed successfully";

pub async fn add_favorite(state: &AppState, payload: CreateFavoriteRequest) -> AppResult<Favorite> {
    let new = payload.validate()?;
    let favorite = state.store.create(new).await?;
    tracing::info!(
        id = favorite.id,
        user_id = %favorite.user_id,
        recipe_id = favorite.recipe_id,
        "favorite added"
    );
    Ok(favorite)
}

pub async fn list_favorites(state: &AppState, user_id: &str) -> AppResult<Vec<Favorite>> {
    state.store.list_by_user(user_id).await
}

/// Succeeds whether or not a matching row existed.
pub async fn remove_favorite(
    state: &AppState,
    user_id: &str,
    recipe_id: &str,
) -> AppResult<MessageResponse> {
    let recipe_id = leading_int(recipe_id)
        .ok_or_else(|| AppError::BadRequest("Invalid recipeId".to_string()))?;

    let removed = state.store.delete(user_id, recipe_id).await?;
    tracing::info!(user_id = %user_id, recipe_id, removed, "favorite removed");

    Ok(MessageResponse::new(FAVORITE_REMOVED))
}

/// Integer prefix of a path segment: optional sign followed by digits, so
/// `"42abc"` reads as 42. `None` when no digits lead the segment.
fn leading_int(raw: &str) -> Option<i32> {
    let raw = raw.trim_start();
    let sign_len = usize::from(raw.starts_with(['+', '-']));
    let digits = raw[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    raw[..sign_len + digits].parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_integer_prefix() {
        assert_eq!(leading_int("42"), Some(42));
        assert_eq!(leading_int(" 42"), Some(42));
        assert_eq!(leading_int("42abc"), Some(42));
        assert_eq!(leading_int("-7"), Some(-7));
        assert_eq!(leading_int("+7x"), Some(7));
        assert_eq!(leading_int("4.9"), Some(4));
    }

    #[test]
    fn rejects_segments_without_leading_digits() {
        assert_eq!(leading_int("abc"), None);
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_int("-"), None);
        assert_eq!(leading_int("99999999999"), None);
    }
}
