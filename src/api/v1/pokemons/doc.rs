//! [`IntoResponses`] wrappers for Mongodex REST API endpoints.
//!
//! These helper types are used to document the possible API responses using [`utoipa::path`].

use utoipa::IntoResponses;

use crate::api::errors::ErrorResponse;

/// [`IntoResponses`] wrapper for bad `id` path parameter errors.
///
/// Can be used to document 400 API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(status = BAD_REQUEST, description = "id path parameter is not a valid identifier")]
pub struct InvalidIdParamResponse;

/// [`IntoResponses`] wrapper for bad Pokemon request body error.
///
/// Can be used to document 400 API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(status = BAD_REQUEST, description = "Invalid Pokemon information in request body")]
pub struct InvalidPokemonBodyResponse;

/// [`IntoResponses`] wrapper for `Pokemon not found` errors.
///
/// Can be used to document 404 API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(
    status = NOT_FOUND,
    description = "No pokemon matches the given term by id, name or no",
)]
pub struct TermNotFoundResponse;

/// [`IntoResponses`] wrapper for duplicate unique key errors.
///
/// Can be used to document 400 API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(
    status = BAD_REQUEST,
    description = "A pokemon with the same no or name already exists in the Pokedex",
)]
pub struct DuplicatePokemonResponse;

/// [`IntoResponses`] wrapper for internal server errors.
///
/// Can be used to document 5XX API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(status = "5XX")]
pub struct ServerErrorResponse(#[to_response] ErrorResponse);
