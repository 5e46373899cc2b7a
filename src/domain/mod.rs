//! Domain layer types and invariants.

pub mod author;
pub mod entities;
pub mod headings;
pub mod posts;
pub mod reading;
pub mod slug;
