//! Services implementing the business logic behind the Mongodex REST API.

pub mod pokemon;
