//! Helpers to connect to the Pokedex database. Currently supports MongoDB as backend only.

use std::env;

use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};

use crate::error::{DatabaseContext, EnvVarContext};
use crate::models::pokemon::{Pokemon, COLLECTION_NAME};

/// A handle to the Pokedex database.
///
/// Handles are cheap to clone and can be shared among worker threads in the web application;
/// connection pooling is handled internally by the [`mongodb`] driver.
pub type Db = Database;

/// Database name used when the `MONGODB_DATABASE` environment variable is not set.
pub const DEFAULT_DB_NAME: &str = "pokedex";

/// Server error code reported by MongoDB when a write violates a unique index.
pub const DUPLICATE_KEY_ERROR_CODE: i32 = 11000;

/// Returns the Pokedex database connection URL.
///
/// The URL should be specified through the `MONGODB_URI` environment variable.
pub fn get_db_url() -> crate::Result<String> {
    env::var("MONGODB_URI").with_env_var_context(|| "MONGODB_URI environment variable must be set")
}

/// Returns the name of the Pokedex database.
///
/// This can be specified through the `MONGODB_DATABASE` environment variable, but is optional.
/// If not specified, [`DEFAULT_DB_NAME`] is used.
pub fn get_db_name() -> crate::Result<String> {
    match env::var("MONGODB_DATABASE") {
        Ok(name) => Ok(name),
        Err(env::VarError::NotPresent) => Ok(DEFAULT_DB_NAME.into()),
        Err(err) => Err(err.with_env_var_context(|| {
            "failed to parse content of MONGODB_DATABASE environment variable"
        })),
    }
}

/// Connects to the MongoDB deployment and returns a handle to the Pokedex database.
///
/// The returned [`Db`] handle can be cloned freely; all clones share the same underlying
/// connection pool, managed by the [`mongodb`] driver.
pub async fn get_database() -> crate::Result<Db> {
    let db_url = get_db_url()?;
    let client = Client::with_uri_str(db_url)
        .await
        .with_db_context(|| "failed to connect to MongoDB deployment")?;

    Ok(client.database(&get_db_name()?))
}

/// Synchronizes the unique indexes of the pokemons collection.
///
/// Both the `no` and `name` fields carry a unique index; these indexes, not application code,
/// are what detects conflicting writes. Called at server startup and by the `seed_db` binary.
pub async fn ensure_indexes(db: &Db) -> crate::Result<()> {
    let indexes = [doc! { "no": 1 }, doc! { "name": 1 }]
        .into_iter()
        .map(|keys| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build()
        })
        .collect::<Vec<_>>();

    db.collection::<Pokemon>(COLLECTION_NAME)
        .create_indexes(indexes)
        .await
        .with_db_context(|| "failed to create unique indexes on pokemons collection")?;

    Ok(())
}

/// Checks whether a [`mongodb`] error is a duplicate-unique-key failure.
///
/// If it is, returns the server's error message, which names the violated index and the
/// conflicting key/value pair. Any other kind of error returns `None`.
pub fn duplicate_key_message(error: &mongodb::error::Error) -> Option<&str> {
    match *error.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error))
            if write_error.code == DUPLICATE_KEY_ERROR_CODE =>
        {
            Some(&write_error.message)
        },
        ErrorKind::Command(ref command_error)
            if command_error.code == DUPLICATE_KEY_ERROR_CODE =>
        {
            Some(&command_error.message)
        },
        _ => None,
    }
}
