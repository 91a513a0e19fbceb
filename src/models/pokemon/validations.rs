//! Helpers to validate Pokemon data.

use std::borrow::Cow;

use mongodb::bson::oid::ObjectId;
use validator::ValidationError;

/// Validates a pokemon identifier value.
///
/// An identifier is only considered valid if it conforms to the MongoDB [`ObjectId`] format,
/// e.g. a 24-character hex string. This guard runs before the request reaches a handler, so
/// malformed identifiers are rejected without touching the database.
pub fn validate_object_id(id_value: &str) -> Result<(), ValidationError> {
    match ObjectId::parse_str(id_value) {
        Ok(_) => Ok(()),
        Err(_) => {
            let error_message = format!("{} is not valid identifier", id_value);

            let mut validation_error = ValidationError::new("invalid_object_id");
            validation_error.message = Some(Cow::from(error_message));

            Err(validation_error)
        },
    }
}
