pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod jobs;
pub mod migrate;
pub mod models;
pub mod response;
pub mod routes;
pub mod schema;
pub mod services;
pub mod startup;
pub mod state;
pub mod store;
