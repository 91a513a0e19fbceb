//! Seeds the Pokedex database with initial pokemon data.
//!
//! See `README.md` for usage.

use std::env::current_exe;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use cargo_metadata::camino::Utf8PathBuf;
use cargo_metadata::MetadataCommand;
use log::{info, trace};
use mongodb::bson::doc;
use mongodb::Collection;
use mongodex::db::{ensure_indexes, get_database, Db};
use mongodex::helpers::env::load_optional_dotenv;
use mongodex::models::pokemon::{CreatePokemon, Pokemon, COLLECTION_NAME};
use simple_logger::SimpleLogger;
use validator::Validate;

/// Main program body.
///
/// Loads pokemon data from the CSV file located at `./seed/pokemon.csv` and inserts the pokemons
/// in the Pokedex database, overwriting any existing data.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .init()
        .with_context(|| "failed to initialize logging facility")?;

    info!("Loading environment variables");
    load_optional_dotenv()
        .with_context(|| "failed to load `.env` file containing environment variables")?;

    info!("Starting Pokemon seeding program");
    let start_time = Instant::now();
    let seed_file_path = get_seed_file_path()?;

    info!("Loading pokemon data from {}", seed_file_path);
    let new_pokemons = load_pokemons_from_seed_file(seed_file_path)?;

    info!("Connecting to MongoDB database");
    let db = get_database()
        .await
        .with_context(|| "failed to connect to MongoDB database")?;

    info!("Synchronizing unique indexes");
    ensure_indexes(&db)
        .await
        .with_context(|| "failed to create unique indexes")?;

    info!("Dropping existing pokemons from database, if any");
    drop_existing_pokemons(&db).await?;

    info!("Inserting pokemons into database");
    insert_pokemons(&db, new_pokemons).await?;

    let elapsed = start_time.elapsed();
    info!("Pokemon database seed done in {:.4?}s.", elapsed.as_secs_f64());

    Ok(())
}

/// Returns the pokemons [`Collection`] in the given database.
fn pokemons(db: &Db) -> Collection<Pokemon> {
    db.collection(COLLECTION_NAME)
}

/// Returns the path to the seed pokemon CSV file.
fn get_seed_file_path() -> anyhow::Result<Utf8PathBuf> {
    // First try looking in the directory of the current executable.
    let mut seed_file_path = current_exe()?;
    seed_file_path.pop();
    seed_file_path.push("seed");
    seed_file_path.push("pokemon.csv");
    if seed_file_path.is_file() {
        return seed_file_path
            .try_into()
            .with_context(|| "seed file path contains invalid UTF-8 characters");
    }

    // If we didn't find seed file yet, we must be in dev environment, so use cargo.
    let metadata = MetadataCommand::new()
        .exec()
        .with_context(|| "failed to get metadata to fetch workspace root")?;

    let mut seed_file_path = metadata.workspace_root;
    seed_file_path.push("seed");
    seed_file_path.push("pokemon.csv");

    Ok(seed_file_path)
}

/// Loads the pokemon data from the seed CSV file.
///
/// The data is returned as a list of [`CreatePokemon`] models, every row validated.
fn load_pokemons_from_seed_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<CreatePokemon>> {
    let csv_reader = csv::Reader::from_path(path)
        .with_context(|| "failed to load CSV file containing pokemon data")?;

    let new_pokemons = csv_reader
        .into_deserialize()
        .collect::<Result<Vec<CreatePokemon>, _>>()
        .with_context(|| "failed to load pokemon data from CSV file")?
        .into_iter()
        .map(|new_pokemon| match new_pokemon.validate() {
            Ok(_) => Ok(new_pokemon),
            Err(errs) => Err(errs),
        })
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| "CSV file contained some invalid pokemon data")?;
    trace!("Found {} pokemons in the seed CSV file", new_pokemons.len());

    Ok(new_pokemons)
}

/// Clears the Pokedex database of any existing pokemons.
async fn drop_existing_pokemons(db: &Db) -> anyhow::Result<()> {
    let delete_result = pokemons(db)
        .delete_many(doc! {})
        .await
        .with_context(|| "failed to delete existing pokemons from database")?;
    trace!("{} existing pokemons have been deleted", delete_result.deleted_count);

    Ok(())
}

/// Inserts the given pokemons in the Pokedex database.
async fn insert_pokemons(db: &Db, new_pokemons: Vec<CreatePokemon>) -> anyhow::Result<()> {
    let documents = new_pokemons
        .into_iter()
        .map(CreatePokemon::into_pokemon)
        .collect::<Vec<_>>();

    let insert_result = pokemons(db)
        .insert_many(documents)
        .await
        .with_context(|| "failed to insert pokemons into database")?;
    trace!("{} pokemons have been inserted into database", insert_result.inserted_ids.len());

    Ok(())
}
