#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use chrono::Utc;
use recipe_favorites_api::{
    error::{AppError, AppResult},
    models::{Favorite, NewFavorite},
    startup::build_app,
    state::AppState,
    store::FavoriteStore,
};
use serde_json::Value;
use tower::ServiceExt;

/// In-memory stand-in for the favorites table.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Favorite>>,
    next_id: Mutex<i32>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "connection refused (os error 111)"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl FavoriteStore for MemoryStore {
    async fn create(&self, new: NewFavorite) -> AppResult<Favorite> {
        self.check()?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let favorite = Favorite {
            id,
            user_id: new.user_id,
            recipe_id: new.recipe_id,
            title: new.title,
            image: new.image,
            cook_time: new.cook_time,
            servings: new.servings,
            created_at: Some(Utc::now()),
        };
        self.rows.lock().unwrap().push(favorite.clone());
        Ok(favorite)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Favorite>> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, user_id: &str, recipe_id: i32) -> AppResult<u64> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|f| !(f.user_id == user_id && f.recipe_id == recipe_id));
        Ok((before - rows.len()) as u64)
    }
}

pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let app = build_app(AppState {
        store: store.clone(),
    });
    (app, store)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
