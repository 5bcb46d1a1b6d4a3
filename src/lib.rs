pub mod config;
pub mod context;
pub mod i18n;
pub mod models;
pub mod preference;
pub mod screen;
pub mod speech;
