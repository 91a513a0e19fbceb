//! Library crate implementing the Mongodex, a Pokedex REST API backed by MongoDB.
//!
//! The actual web application is created by the [main crate](../mongodex/index.html); this
//! crate contains the API endpoints, the pokemon service and the supporting helpers.
//!
//! For more information, see `README.md`.

#![cfg_attr(backtrace_support, feature(error_generic_member_access))]

pub mod api;
pub mod db;
pub mod error;
pub mod helpers;
pub mod models;
pub mod service_env;
pub mod services;

use actix_web::web;
use actix_web::web::ServiceConfig;
use log::trace;

pub use crate::error::{Error, Result};

use crate::db::Db;

/// Registers all endpoints of the Mongodex application.
///
/// This includes the REST API endpoints (under the `/api` scope) as well as the OpenAPI
/// documentation endpoints. Usually not called directly; use [`mongodex_app!`] instead.
pub fn configure_api(db: &Db) -> impl FnOnce(&mut ServiceConfig) + '_ {
    |config| {
        trace!("Adding endpoints for the Mongodex app");
        config.service(web::scope("/api").configure(api::configure(db)));
        api::doc::configure(config);
    }
}

/// Creates the Mongodex [`App`](actix_web::App), ready to be served.
///
/// Wires the input validation configs to our [error handler](api::errors::actix_error_handler),
/// installs the request logger middleware and registers every endpoint via [`configure_api`].
/// Provided as a macro because the concrete type of [`App`](actix_web::App) cannot be named.
///
/// # Examples
///
/// ```no_run
/// use actix_web::HttpServer;
/// use mongodex::db::get_database;
/// use mongodex::mongodex_app;
///
/// # async fn example() -> anyhow::Result<()> {
/// let db = get_database().await?;
/// let server = HttpServer::new(move || mongodex_app!(db.clone()))
///     .bind(("127.0.0.1", 8080))?
///     .run();
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! mongodex_app {
    ($db:expr) => {{
        let json_config = ::actix_web_validator::JsonConfig::default()
            .error_handler($crate::api::errors::actix_error_handler);
        let path_config = ::actix_web_validator::PathConfig::default()
            .error_handler($crate::api::errors::actix_error_handler);
        let query_config = ::actix_web_validator::QueryConfig::default()
            .error_handler($crate::api::errors::actix_error_handler);

        ::actix_web::App::new()
            .wrap(::actix_web::middleware::Logger::default())
            .app_data(json_config)
            .app_data(path_config)
            .app_data(query_config)
            .configure($crate::configure_api(&$db))
    }};
}
