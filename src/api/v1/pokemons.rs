//! Implementation of the Mongodex REST API endpoints for pokemons.
//!
//! # Endpoints
//!
//! | HTTP method | Endpoint                  | Usage                                                    | See                       |
//! |-------------|---------------------------|----------------------------------------------------------|---------------------------|
//! | `GET`       | `/api/v1/pokemons`        | Lists all pokemons in the DB                             | [`list`]                  |
//! | `GET`       | `/api/v1/pokemons/{term}` | Returns one pokemon, looked up by no, id or name         | [`get`](struct@get)       |
//! | `POST`      | `/api/v1/pokemons`        | Adds a new pokemon in the DB                             | [`create`]                |
//! | `PATCH`     | `/api/v1/pokemons/{term}` | Updates some fields of the pokemon matching the term     | [`update`]                |
//! | `DELETE`    | `/api/v1/pokemons/{id}`   | Deletes the pokemon with the given ID from the DB        | [`delete`](struct@delete) |

pub mod doc;

use std::ops::Deref;

use actix_web::web::{Data, ServiceConfig};
use actix_web::{delete, get, patch, post, HttpResponse};
use actix_web_validator::{Json, Path};
use log::trace;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

use crate::api::v1::pokemons::doc::{
    DuplicatePokemonResponse, InvalidIdParamResponse, InvalidPokemonBodyResponse,
    ServerErrorResponse, TermNotFoundResponse,
};
use crate::db::Db;
use crate::models::pokemon::validations::validate_object_id;
use crate::models::pokemon::{CreatePokemon, Pokemon, UpdatePokemon};
use crate::services::pokemon;

/// Allows registration of all pokemon REST API endpoints.
///
/// See [module documentation](self) for the entire list of supported endpoints.
/// Called automatically from [`api::v1::configure`](crate::api::v1::configure).
pub fn configure(db: &Db) -> impl FnOnce(&mut ServiceConfig) + '_ {
    |config| {
        trace!("Registering Pokemon service app data");
        config.app_data(Data::new(pokemon::Service::new(db)));

        trace!("Adding API CRUD endpoints for /api/v1/pokemons");
        config
            .service(list)
            .service(get)
            .service(create)
            .service(update)
            .service(delete);
    }
}

/// [`Result`](crate::Result) definition used to return [`HttpResponse`]s from API endpoints.
///
/// If an [`Error`](crate::Error) is returned, it is converted to an appropriate [`HttpResponse`]
/// by the error handling code (see [`ErrorResponse::from`](crate::api::errors::ErrorResponse::from) for details).
pub type HttpResult = crate::Result<HttpResponse>;

/// Path parameter used for endpoints that address a pokemon strictly by its id ([`delete`](struct@delete)).
///
/// The value is validated against the identifier format before the handler runs; a malformed
/// id is rejected without any database access.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, IntoParams)]
pub struct Id {
    /// id of Pokemon in database (24-character hex string)
    #[validate(custom = "validate_object_id")]
    #[param(example = "507f1f77bcf86cd799439011")]
    pub id: String,
}

impl Deref for Id {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.id
    }
}

/// Path parameter used for endpoints that accept a lookup term ([`get`](struct@get) and [`update`]).
///
/// A term can be a pokemon number, a database id or a pokemon name; see
/// [`Service::get_pokemon`](crate::services::pokemon::Service::get_pokemon) for the resolution order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, IntoParams)]
pub struct Term {
    /// Pokemon no, id or name
    #[validate(length(min = 1))]
    #[param(example = "pikachu")]
    pub term: String,
}

impl Deref for Term {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.term
    }
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to list all pokemons.

        Registered as `GET /api/v1/pokemons`.

        # Output

        All [`Pokemon`]s in the database, sorted by pokemon number and serialized as a JSON
        array. There is no pagination.
    "
)]
#[cfg_attr(not(doc), doc = "Lists all Pokemons in the Pokedex")]
#[utoipa::path(
    context_path = "/api/v1/pokemons",
    responses(
        (status = OK, body = Vec<Pokemon>),
        ServerErrorResponse,
    ),
)]
#[get("", name = "/")]
pub async fn list(service: Data<pokemon::Service>) -> HttpResult {
    let pokemons = service.get_ref().get_pokemons().await?;

    Ok(HttpResponse::Ok().json(pokemons))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to fetch one pokemon from the DB.

        Registered as `GET /api/v1/pokemons/{term}`.

        # Input

        - `{term}`: pokemon number, database id or pokemon name (case-insensitive).

        # Output

        A [`Pokemon`], serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Returns information about a Pokemon, looked up by no, id or name")]
#[utoipa::path(
    context_path = "/api/v1/pokemons",
    params(Term),
    responses(
        (status = OK, response = Pokemon),
        TermNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[get("/{term}", name = "/{term}")]
pub async fn get(term: Path<Term>, service: Data<pokemon::Service>) -> HttpResult {
    let pokemon = service.get_ref().get_pokemon(&term.into_inner()).await?;

    Ok(HttpResponse::Ok().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to add a new pokemon to the DB.

        Registered as `POST /api/v1/pokemons`.

        # Input

        - Request body: the pokemon data, as a JSON-serialized [`CreatePokemon`]. The name is
          normalized to lowercase before being stored.

        # Output

        The newly-inserted [`Pokemon`], serialized as JSON.
    "
)]
#[cfg_attr(not(doc), doc = "Creates a new Pokemon")]
#[utoipa::path(
    context_path = "/api/v1/pokemons",
    request_body(
        content = inline(CreatePokemon),
        description = "New Pokemon information",
    ),
    responses(
        (status = CREATED, response = Pokemon),
        InvalidPokemonBodyResponse,
        DuplicatePokemonResponse,
        ServerErrorResponse,
    ),
)]
#[post("", name = "/")]
pub async fn create(
    new_pokemon: Json<CreatePokemon>,
    service: Data<pokemon::Service>,
) -> HttpResult {
    let pokemon = service.get_ref().create_pokemon(&new_pokemon).await?;

    Ok(HttpResponse::Created().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to update some fields of a pokemon in the DB.

        Any field not specified will not be updated. Registered as `PATCH /api/v1/pokemons/{term}`.

        # Input

        - `{term}`: pokemon number, database id or pokemon name of the pokemon to update.
        - Request body: the fields to update, as a JSON-serialized [`UpdatePokemon`]. A supplied
          name is normalized to lowercase before being stored.

        # Output

        The updated [`Pokemon`], serialized as JSON. Note that this is the pre-update document
        with the patch overlaid on top, not a fresh read of the persisted state.
    "
)]
#[cfg_attr(not(doc), doc = "Updates specific fields of a Pokemon, looked up by no, id or name")]
#[utoipa::path(
    context_path = "/api/v1/pokemons",
    params(Term),
    request_body(
        content = inline(UpdatePokemon),
        description = "Specific Pokemon fields to update",
    ),
    responses(
        (status = OK, response = Pokemon),
        InvalidPokemonBodyResponse,
        DuplicatePokemonResponse,
        TermNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[patch("/{term}", name = "/{term}")]
pub async fn update(
    term: Path<Term>,
    pokemon_patch: Json<UpdatePokemon>,
    service: Data<pokemon::Service>,
) -> HttpResult {
    let pokemon = service
        .get_ref()
        .update_pokemon(&term.into_inner(), &pokemon_patch)
        .await?;

    Ok(HttpResponse::Ok().json(pokemon))
}

#[cfg_attr(
    doc,
    doc = r"
        API endpoint to delete a pokemon from the DB.

        Registered as `DELETE /api/v1/pokemons/{id}`.

        # Input

        - `{id}`: ID of pokemon to delete. Must be a valid identifier; malformed values are
          rejected before any database access.

        # Output

        This endpoint simply returns `HTTP 204 No Content` upon success.
    "
)]
#[cfg_attr(not(doc), doc = "Deletes a Pokemon")]
#[utoipa::path(
    context_path = "/api/v1/pokemons",
    params(Id),
    responses(
        (status = NO_CONTENT, description = "Pokemon deleted from Pokedex"),
        InvalidIdParamResponse,
        TermNotFoundResponse,
        ServerErrorResponse,
    ),
)]
#[delete("/{id}", name = "/{id}")]
pub async fn delete(id: Path<Id>, service: Data<pokemon::Service>) -> HttpResult {
    service.get_ref().delete_pokemon(&id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
