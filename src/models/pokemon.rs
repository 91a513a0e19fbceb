//! Models used to create/update/load pokemons from the database.

pub mod validations;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::hex_string_as_object_id;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::{ToResponse, ToSchema};
use validator::Validate;

/// Name of the MongoDB collection holding [`Pokemon`] documents.
pub const COLLECTION_NAME: &str = "pokemons";

#[cfg_attr(
    doc,
    doc = r"
        Base pokemon entity model.

        Maps one-to-one onto a document in the pokemons collection. The `id` field holds the
        document's `_id` as a 24-character hex string; in BSON it is stored as a real `ObjectId`
        (see [`hex_string_as_object_id`]).
    "
)]
#[cfg_attr(not(doc), doc = "Information about a Pokemon in the Pokedex")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, ToResponse)]
#[serde(deny_unknown_fields)]
#[response(
    description = "Pokemon information",
    example = json!({
        "_id": "507f1f77bcf86cd799439011",
        "no": 25,
        "name": "pikachu"
    }),
)]
pub struct Pokemon {
    /// Unique id of this Pokemon document, as a 24-character hex string
    #[serde(rename = "_id", with = "hex_string_as_object_id")]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,

    /// Pokemon number, as specified in Pokedex; different than the id
    ///
    /// Unique: enforced by a unique index on the collection
    pub no: i64,

    /// Pokemon name; always stored lowercase
    ///
    /// Unique: enforced by a unique index on the collection
    #[schema(example = "pikachu")]
    pub name: String,
}

#[cfg_attr(
    doc,
    doc = r"
        Model used to insert a new pokemon in the database.

        Does not carry an id; the id is generated when the model is turned into a full
        [`Pokemon`] document via [`into_pokemon`](CreatePokemon::into_pokemon).
    "
)]
#[cfg_attr(not(doc), doc = "Information to create a new Pokemon in the Pokedex")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
#[schema(example = json!({
    "no": 25,
    "name": "Pikachu"
}))]
pub struct CreatePokemon {
    /// Pokemon number, as specified in Pokedex
    #[validate(range(min = 1))]
    pub no: i64,

    /// Pokemon name; will be lowercased before being stored
    #[validate(length(min = 1))]
    pub name: String,
}

impl CreatePokemon {
    /// Turns this creation payload into a full [`Pokemon`] document, ready to insert.
    ///
    /// Generates a fresh [`ObjectId`] for the document and normalizes the name to lowercase,
    /// which is the invariant form under which all pokemon names are stored.
    pub fn into_pokemon(self) -> Pokemon {
        Pokemon { id: ObjectId::new().to_hex(), no: self.no, name: self.name.to_lowercase() }
    }
}

impl From<Pokemon> for CreatePokemon {
    /// Extracts the caller-supplied fields back out of a full [`Pokemon`] document.
    fn from(value: Pokemon) -> Self {
        Self { no: value.no, name: value.name }
    }
}

#[cfg_attr(
    doc,
    doc = r#"
        Model used to "patch" a pokemon in the database, e.g. update some fields only.

        All fields are optional; fields that are not specified will not be updated.
    "#
)]
#[cfg_attr(not(doc), doc = "Information to update specific fields of a Pokemon in the Pokedex")]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
#[schema(example = json!({
    "name": "Raichu"
}))]
pub struct UpdatePokemon {
    /// Pokemon number, as specified in Pokedex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub no: Option<i64>,

    /// Pokemon name; will be lowercased before being stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub name: Option<String>,
}

impl UpdatePokemon {
    /// Returns a copy of this patch with the name (if supplied) lowercased.
    ///
    /// Write paths must go through this before touching the store, so that the lowercase
    /// name invariant holds for updates just like for creations.
    pub fn normalized(&self) -> Self {
        Self { no: self.no, name: self.name.as_ref().map(|name| name.to_lowercase()) }
    }

    /// Builds the `$set` [`Document`] for this patch.
    ///
    /// Only fields that are actually supplied end up in the document; an empty patch yields
    /// an empty document, in which case callers should skip the store update entirely.
    pub fn as_set_document(&self) -> Document {
        let mut set_document = Document::new();
        if let Some(no) = self.no {
            set_document.insert("no", no);
        }
        if let Some(ref name) = self.name {
            set_document.insert("name", name.clone());
        }

        set_document
    }

    /// Overlays this patch onto an existing [`Pokemon`], in place.
    ///
    /// Used to produce the merged view returned by the update operation.
    pub fn apply_to(&self, pokemon: &mut Pokemon) {
        if let Some(no) = self.no {
            pokemon.no = no;
        }
        if let Some(ref name) = self.name {
            pokemon.name = name.clone();
        }
    }
}
