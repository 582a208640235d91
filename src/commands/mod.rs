pub mod analytics;
pub mod auth;
pub mod chat;
pub mod datasource;
pub mod db;
pub mod export;
pub mod settings;
