//! Models used by the Mongodex REST API.

pub mod pokemon;
