use mongodb::bson::oid::ObjectId;
use mongodex::models::pokemon::{CreatePokemon, Pokemon, UpdatePokemon};
use validator::Validate;

pub fn build_create_pokemon() -> CreatePokemon {
    build_create_pokemons(1).remove(0)
}

pub fn build_create_pokemons(count: usize) -> Vec<CreatePokemon> {
    (1..=count)
        .map(|no| CreatePokemon { no: no as i64, name: format!("pikafoo_{}", no) })
        .inspect(|pokemon| pokemon.validate().unwrap())
        .collect()
}

pub fn build_pokemon(no: i64, name: &str) -> Pokemon {
    Pokemon { id: ObjectId::new().to_hex(), no, name: name.into() }
}

pub fn build_update_pokemon(patched_name: Option<&str>, patched_no: Option<i64>) -> UpdatePokemon {
    let update_pokemon =
        UpdatePokemon { no: patched_no, name: patched_name.map(Into::into) };

    update_pokemon.validate().unwrap();
    update_pokemon
}
