//! Service used to load and save pokemons. Used by the Mongodex REST API.

use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::Collection;

use crate::db::Db;
use crate::error::DatabaseContext;
use crate::models::pokemon::{CreatePokemon, Pokemon, UpdatePokemon, COLLECTION_NAME};
use crate::Error;

/// Service implementation for [`Pokemon`] entities.
///
/// This type contains the actual business logic to fetch/save pokemons from the database.
/// It will be used by the [pokemons REST API endpoint implementations](crate::api::v1::pokemons)
/// to handle operations regarding [`Pokemon`] entities.
#[derive(Clone)]
pub struct Service {
    collection: Collection<Pokemon>,
}

impl Service {
    /// Creates a new pokemon service using the provided [`Db`] handle.
    pub fn new(db: &Db) -> Self {
        Self { collection: db.collection(COLLECTION_NAME) }
    }

    /// Fetches all [`Pokemon`]s from the database, sorted by pokemon number.
    ///
    /// There is no pagination; this is a full scan of the collection.
    pub async fn get_pokemons(&self) -> crate::Result<Vec<Pokemon>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "no": 1 })
            .await
            .with_db_context(|| "failed to list pokemons")?;

        cursor
            .try_collect()
            .await
            .with_db_context(|| "failed to read pokemons from cursor")
    }

    /// Returns the [`Pokemon`] matching the given lookup term.
    ///
    /// The term is resolved against three keys in a fixed precedence order, stopping at the
    /// first match:
    ///
    /// 1. if the term parses as a number, the `no` field;
    /// 2. if the term is a valid [`ObjectId`], the document id;
    /// 3. the `name` field, after lowercasing the term.
    ///
    /// A term that is both a valid number and a valid identifier string is resolved as a
    /// number first. If all three lookups miss, a [`NotFound`](Error::NotFound) error naming
    /// the term is returned.
    pub async fn get_pokemon(&self, term: &str) -> crate::Result<Pokemon> {
        let mut pokemon = None;

        if let Ok(pokemon_no) = term.parse::<i64>() {
            pokemon = self
                .collection
                .find_one(doc! { "no": pokemon_no })
                .await
                .with_db_context(|| format!("failed to fetch pokemon with no {}", pokemon_no))?;
        }

        if pokemon.is_none() {
            if let Ok(object_id) = ObjectId::parse_str(term) {
                pokemon = self
                    .collection
                    .find_one(doc! { "_id": object_id })
                    .await
                    .with_db_context(|| format!("failed to fetch pokemon with id {}", term))?;
            }
        }

        if pokemon.is_none() {
            pokemon = self
                .collection
                .find_one(doc! { "name": term.to_lowercase() })
                .await
                .with_db_context(|| format!("failed to fetch pokemon with name {}", term))?;
        }

        pokemon.ok_or_else(|| Error::NotFound { term: term.into() })
    }

    /// Creates a new [`Pokemon`] and adds it to the database.
    ///
    /// The name is lowercased before the insert and the returned document carries the
    /// generated id. A write that trips one of the unique indexes surfaces as a
    /// duplicate-key [`Database`](Error::Database) error, which the API layer reports as a
    /// client error naming the conflicting key.
    pub async fn create_pokemon(&self, new_pokemon: &CreatePokemon) -> crate::Result<Pokemon> {
        let pokemon = new_pokemon.clone().into_pokemon();

        self.collection
            .insert_one(&pokemon)
            .await
            .with_db_context(|| "failed to insert new pokemon")?;

        Ok(pokemon)
    }

    /// Updates the [`Pokemon`] matching the given lookup term.
    ///
    /// The target is resolved with [`get_pokemon`](Service::get_pokemon), so any term accepted
    /// there works here too (and its not-found error propagates unchanged). Only the fields
    /// present in the patch are written; the returned value is the previously fetched document
    /// with the patch overlaid on top, not a re-read of the persisted state.
    pub async fn update_pokemon(
        &self,
        term: &str,
        pokemon_patch: &UpdatePokemon,
    ) -> crate::Result<Pokemon> {
        let mut pokemon = self.get_pokemon(term).await?;

        let pokemon_patch = pokemon_patch.normalized();
        let set_document = pokemon_patch.as_set_document();
        if !set_document.is_empty() {
            // The id always comes from the store, so it parses back to an ObjectId unless the
            // collection holds corrupt data.
            let object_id = ObjectId::parse_str(&pokemon.id)
                .map_err(mongodb::error::Error::custom)
                .with_db_context(|| format!("invalid stored pokemon id {}", pokemon.id))?;

            self.collection
                .update_one(doc! { "_id": object_id }, doc! { "$set": set_document })
                .await
                .with_db_context(|| format!("failed to update pokemon {}", pokemon.id))?;
        }

        pokemon_patch.apply_to(&mut pokemon);
        Ok(pokemon)
    }

    /// Deletes the pokemon with the given id from the database.
    ///
    /// There is no existence pre-check; if the deletion affected zero documents, a
    /// [`NotFound`](Error::NotFound) error naming the id is returned.
    pub async fn delete_pokemon(&self, pokemon_id: &str) -> crate::Result<()> {
        let object_id = ObjectId::parse_str(pokemon_id)
            .map_err(mongodb::error::Error::custom)
            .with_db_context(|| format!("invalid pokemon id {}", pokemon_id))?;

        let delete_result = self
            .collection
            .delete_one(doc! { "_id": object_id })
            .await
            .with_db_context(|| format!("failed to delete pokemon {}", pokemon_id))?;

        if delete_result.deleted_count == 0 {
            return Err(Error::NotFound { term: pokemon_id.into() });
        }

        Ok(())
    }
}
