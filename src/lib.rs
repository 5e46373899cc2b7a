//! Server-rendered blog with an admin dashboard, a JSON API and LLM-assisted drafting.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
