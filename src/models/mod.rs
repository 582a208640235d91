pub mod aggregate;
pub mod chat;
pub mod dashboard;
pub mod policy;
pub mod record;
pub mod report;
pub mod risk;
pub mod summary;
pub mod user;
pub mod view;
