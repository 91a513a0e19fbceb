//! [`Error`] type definition for our app.

use std::env;
use std::ffi::OsString;
use std::num::ParseIntError;

/// [`Result`](core::result::Result) type for our crate.
///
/// Uses our crate's [`Error`] type automatically.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type used throughout this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error that occurred when loading data from an environment variable.
    #[error("error related to environment variable: {context}")]
    EnvVar {
        /// Environment variable error context.
        ///
        /// Used by the code (via [`EnvVarContext::with_env_var_context`]) to provide context for the error.
        context: String,

        /// Source of the environment error.
        source: EnvVarError,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Error caused by invalid user input.
    #[error("input parsing error")]
    Input {
        /// Source of the input error.
        #[from]
        source: actix_web_validator::error::Error,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },

    /// Error returned when a lookup term resolves to no pokemon.
    ///
    /// Also returned when deleting a pokemon whose id does not exist in the database.
    #[error("pokemon with id, name or no \"{term}\" not found")]
    NotFound {
        /// The term that failed to resolve, exactly as the caller supplied it.
        term: String,
    },

    /// Error that occurred while performing an operation against MongoDB.
    #[error("database error: {context}")]
    Database {
        /// Database error context.
        ///
        /// Used by the code (via [`DatabaseContext::with_db_context`]) to provide some context
        /// as to the type of operation that caused the error.
        context: String,

        /// Source of the database error.
        source: mongodb::error::Error,

        /// [`Backtrace`](std::backtrace::Backtrace) indicating where the error occurred.
        ///
        /// Will only contain useful information if backtrace is enabled (see
        /// [`Backtrace::capture`](std::backtrace::Backtrace::capture)).
        #[cfg(backtrace_support)]
        backtrace: std::backtrace::Backtrace,
    },
}

/// Error type used for errors related to environment variables.
///
/// This is our variant of [`VarError`], with additional variants for our specific use cases.
/// In particular, a [`From`] `impl` is provided to be able to convert a [`VarError`] to this type.
///
/// [`VarError`]: env::VarError
#[derive(Debug, thiserror::Error)]
pub enum EnvVarError {
    /// The environment variable did not exist.
    ///
    /// This is our equivalent for [`VarError::NotPresent`](env::VarError::NotPresent).
    #[error("variable not found in environment")]
    NotFound,

    /// The environment variable could not be parsed to a Rust string because it contains
    /// invalid Unicode characters.
    ///
    /// This is our equivalent for [`VarError::NotUnicode`](env::VarError::NotUnicode).
    #[error("variable contained invalid, non-Unicode characters")]
    NotUnicode(OsString),

    /// The environment variable was expected to contain an int value, but didn't.
    #[error("expected int value, found {value}")]
    IntExpected {
        /// The actual value found in the environment variable.
        value: String,

        /// The parsing error that occurred when we tried to parse the value as an int.
        source: ParseIntError,
    },
}

impl From<env::VarError> for EnvVarError {
    /// Converts an `std` [`VarError`] to our intermediate [`EnvVarError`] type.
    ///
    /// Each variant of [`VarError`] has a corresponding variant in our [`EnvVarError`] type,
    /// so the mapping is straightforward.
    ///
    /// [`VarError`]: env::VarError
    fn from(value: env::VarError) -> Self {
        match value {
            env::VarError::NotPresent => Self::NotFound,
            env::VarError::NotUnicode(os_str) => Self::NotUnicode(os_str),
        }
    }
}

/// Helper trait to provide context for [`EnvVar`](Error::EnvVar) errors.
pub trait EnvVarContext {
    /// Type of output returned by [`with_env_var_context`](EnvVarContext::with_env_var_context).
    type Output;

    /// Provides context about the error that occurred.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::env;
    ///
    /// use mongodex::error::EnvVarContext;
    ///
    /// # fn example() -> mongodex::Result<()> {
    /// let db_url = env::var("MONGODB_URI")
    ///     .with_env_var_context(|| "MONGODB_URI environment variable should be set")?;
    /// #
    /// # Ok(())
    /// # }
    /// ```
    fn with_env_var_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<E> EnvVarContext for E
where
    E: Into<EnvVarError>,
{
    type Output = Error;

    fn with_env_var_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        Error::EnvVar {
            context: (context)().into(),
            source: self.into(),
            #[cfg(backtrace_support)]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl<T, E> EnvVarContext for core::result::Result<T, E>
where
    E: EnvVarContext<Output = Error>,
{
    type Output = Result<T>;

    fn with_env_var_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.with_env_var_context(context))
    }
}

/// Helper trait to provide context for [`Database`](Error::Database) errors.
pub trait DatabaseContext {
    /// Type of output returned by [`with_db_context`](DatabaseContext::with_db_context).
    type Output;

    /// Provides context about the database operation performed when the error occurred.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use mongodb::bson::doc;
    /// use mongodex::error::DatabaseContext;
    /// # use mongodex::db::get_database;
    /// use mongodex::models::pokemon::{Pokemon, COLLECTION_NAME};
    ///
    /// # async fn example(pokemon_no: i64) -> mongodex::Result<()> {
    /// # let db = get_database().await?;
    /// #
    /// let pokemon: Option<Pokemon> = db
    ///     .collection(COLLECTION_NAME)
    ///     .find_one(doc! { "no": pokemon_no })
    ///     .await
    ///     .with_db_context(|| format!("failed to fetch pokemon with no {}", pokemon_no))?;
    /// #
    /// # Ok(())
    /// # }
    /// ```
    fn with_db_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl DatabaseContext for mongodb::error::Error {
    type Output = Error;

    fn with_db_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        Error::Database {
            context: (context)().into(),
            source: self,
            #[cfg(backtrace_support)]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl<T, E> DatabaseContext for core::result::Result<T, E>
where
    E: DatabaseContext<Output = Error>,
{
    type Output = Result<T>;

    fn with_db_context<C, F>(self, context: F) -> Self::Output
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.with_db_context(context))
    }
}
