pub mod admin;
pub mod chrome;
pub mod error;
pub mod generation;
pub mod posts;
pub mod repos;
