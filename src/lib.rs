pub mod config;
pub mod domain;
pub mod query;
pub mod repository;
pub mod store;
pub mod utils;
