pub mod alert;
pub mod api;
pub mod config;
pub mod duration;
pub mod format;
pub mod models;
pub mod portfolio;
pub mod preferences;
pub mod query;
