use std::env;
use std::sync::Once;

use log::{debug, trace};
use mongodb::bson::doc;
use mongodb::Collection;
use mongodex::db::{ensure_indexes, get_database, Db};
use mongodex::helpers::env::load_optional_dotenv;
use mongodex::models::pokemon::{Pokemon, COLLECTION_NAME};

#[macro_export]
macro_rules! init_test_service {
    ($app_var:ident, $service_var:ident) => {
        let $app_var = $crate::integration_helpers::app::TestApp::new().await;
        let $service_var =
            actix_web::test::init_service(mongodex::mongodex_app!($app_var.get_db())).await;
    };
}

pub struct TestApp {
    db: Db,
}

impl TestApp {
    pub async fn new() -> Self {
        static INIT_TEST_DB_ENV_VAR: Once = Once::new();
        INIT_TEST_DB_ENV_VAR.call_once(|| {
            debug!("Loading environment variables");
            load_optional_dotenv().unwrap();

            debug!("Setting environment variable required to connect to test DB");
            env::set_var("MONGODB_DATABASE", "pokedex-test");
        });

        debug!("Connecting to test database");
        let db = get_database().await.unwrap();
        ensure_indexes(&db).await.unwrap();

        // Cleanup happens before each test rather than after it, because Drop has no
        // async context to run the delete in.
        let delete_result = Self::pokemons_in(&db).delete_many(doc! {}).await.unwrap();
        trace!("Cleaned up {} pokemons from test DB", delete_result.deleted_count);

        Self { db }
    }

    pub fn get_db(&self) -> Db {
        self.db.clone()
    }

    pub fn pokemons(&self) -> Collection<Pokemon> {
        Self::pokemons_in(&self.db)
    }

    fn pokemons_in(db: &Db) -> Collection<Pokemon> {
        db.collection(COLLECTION_NAME)
    }
}
