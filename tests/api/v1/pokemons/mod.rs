mod list {
    use actix_web::test;
    use mongodex::models::pokemon::Pokemon;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::build_pokemon;

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_empty_list() {
        init_test_service!(app, service);

        let req = test::TestRequest::with_uri("/api/v1/pokemons").to_request();
        let pokemons: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;

        assert!(pokemons.is_empty());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_full_list_sorted_by_no() {
        init_test_service!(app, service);

        let new_pokemons = [
            build_pokemon(25, "pikachu"),
            build_pokemon(1, "bulbasaur"),
            build_pokemon(151, "mew"),
            build_pokemon(4, "charmander"),
        ];
        app.pokemons().insert_many(&new_pokemons).await.unwrap();

        let req = test::TestRequest::with_uri("/api/v1/pokemons").to_request();
        let pokemons: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;

        assert_eq!(4, pokemons.len());
        let actual_nos = pokemons.iter().map(|pokemon| pokemon.no).collect::<Vec<_>>();
        assert_eq!(vec![1, 4, 25, 151], actual_nos);
    }
}

mod get {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use mongodex::models::pokemon::Pokemon;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::build_pokemon;

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_get_by_no() {
        init_test_service!(app, service);

        let new_pokemon = build_pokemon(25, "pikachu");
        app.pokemons().insert_one(&new_pokemon).await.unwrap();

        let req = test::TestRequest::with_uri("/api/v1/pokemons/25").to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!(new_pokemon, api_pokemon);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_get_by_id() {
        init_test_service!(app, service);

        let new_pokemon = build_pokemon(25, "pikachu");
        app.pokemons().insert_one(&new_pokemon).await.unwrap();

        let req = test::TestRequest::with_uri(&format!("/api/v1/pokemons/{}", new_pokemon.id))
            .to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!(new_pokemon, api_pokemon);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_get_by_name_is_case_insensitive() {
        init_test_service!(app, service);

        let new_pokemon = build_pokemon(25, "pikachu");
        app.pokemons().insert_one(&new_pokemon).await.unwrap();

        for term in ["pikachu", "PIKACHU", "PiKaChU"] {
            let req =
                test::TestRequest::with_uri(&format!("/api/v1/pokemons/{}", term)).to_request();
            let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

            assert_eq!(new_pokemon, api_pokemon);
        }
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_numeric_term_resolves_by_no_first() {
        init_test_service!(app, service);

        // A pokemon whose *name* is the numeric string "7", and another whose *no* is 7.
        // A numeric term must match the latter.
        let decoy = build_pokemon(99, "7");
        let expected = build_pokemon(7, "squirtle");
        app.pokemons().insert_many([&decoy, &expected]).await.unwrap();

        let req = test::TestRequest::with_uri("/api/v1/pokemons/7").to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!(expected, api_pokemon);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_numeric_term_falls_back_to_name() {
        init_test_service!(app, service);

        // No pokemon has no == 7, so the numeric term should still find the one named "7".
        let new_pokemon = build_pokemon(99, "7");
        app.pokemons().insert_one(&new_pokemon).await.unwrap();

        let req = test::TestRequest::with_uri("/api/v1/pokemons/7").to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!(new_pokemon, api_pokemon);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_does_not_exist() {
        init_test_service!(app, service);

        let req = test::TestRequest::with_uri("/api/v1/pokemons/missingno").to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::NOT_FOUND, result.status());

        let body: serde_json::Value = test::read_body_json(result).await;
        assert!(body["details"].as_str().unwrap().contains("missingno"));
    }
}

mod create {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use mongodb::bson::doc;
    use mongodb::bson::oid::ObjectId;
    use assert_matches::assert_matches;
    use mongodex::models::pokemon::{CreatePokemon, Pokemon};
    use serde_json::json;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::build_create_pokemon;

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_create_pokemon() {
        init_test_service!(app, service);

        let new_pokemon = build_create_pokemon();

        let req = test::TestRequest::post()
            .uri("/api/v1/pokemons")
            .set_json(&new_pokemon)
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::CREATED, result.status());

        let api_pokemon: Pokemon = test::read_body_json(result).await;
        assert_eq!(new_pokemon.no, api_pokemon.no);
        assert_eq!(new_pokemon.name, api_pokemon.name);
        assert!(ObjectId::parse_str(&api_pokemon.id).is_ok());

        let stored_pokemon = app
            .pokemons()
            .find_one(doc! { "no": new_pokemon.no })
            .await
            .unwrap();
        assert_matches!(stored_pokemon, Some(pokemon) if pokemon == api_pokemon);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_create_lowercases_name() {
        init_test_service!(app, service);

        let new_pokemon = CreatePokemon { no: 25, name: "PIKACHU".into() };

        let req = test::TestRequest::post()
            .uri("/api/v1/pokemons")
            .set_json(&new_pokemon)
            .to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!("pikachu", api_pokemon.name);

        let stored_pokemon = app
            .pokemons()
            .find_one(doc! { "name": "pikachu" })
            .await
            .unwrap();
        assert_matches!(stored_pokemon, Some(pokemon) if pokemon.name == "pikachu");
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_create_duplicate_no() {
        init_test_service!(app, service);

        let new_pokemon = CreatePokemon { no: 25, name: "pikachu".into() };
        let req = test::TestRequest::post()
            .uri("/api/v1/pokemons")
            .set_json(&new_pokemon)
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::CREATED, result.status());

        let conflicting_pokemon = CreatePokemon { no: 25, name: "raichu".into() };
        let req = test::TestRequest::post()
            .uri("/api/v1/pokemons")
            .set_json(&conflicting_pokemon)
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, result.status());

        let body: serde_json::Value = test::read_body_json(result).await;
        assert!(body["details"]
            .as_str()
            .unwrap()
            .contains("already exists in database"));
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_create_duplicate_name() {
        init_test_service!(app, service);

        let new_pokemon = CreatePokemon { no: 25, name: "pikachu".into() };
        let req = test::TestRequest::post()
            .uri("/api/v1/pokemons")
            .set_json(&new_pokemon)
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::CREATED, result.status());

        // Same name in a different casing still trips the unique index, since names are
        // lowercased before the insert.
        let conflicting_pokemon = CreatePokemon { no: 26, name: "PIKACHU".into() };
        let req = test::TestRequest::post()
            .uri("/api/v1/pokemons")
            .set_json(&conflicting_pokemon)
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, result.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_create_invalid_body() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/api/v1/pokemons")
            .set_json(json!({ "no": 0, "name": "" }))
            .to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, result.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_create_unknown_field() {
        init_test_service!(app, service);

        let req = test::TestRequest::post()
            .uri("/api/v1/pokemons")
            .set_json(json!({ "no": 25, "name": "pikachu", "legendary": true }))
            .to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, result.status());
    }
}

mod update {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use assert_matches::assert_matches;
    use mongodb::bson::doc;
    use mongodex::models::pokemon::Pokemon;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::{build_pokemon, build_update_pokemon};

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_update_by_name_lowercases_patch() {
        init_test_service!(app, service);

        let new_pokemon = build_pokemon(172, "pichu");
        app.pokemons().insert_one(&new_pokemon).await.unwrap();

        let pokemon_patch = build_update_pokemon(Some("PIKACHU"), None);
        let req = test::TestRequest::patch()
            .uri("/api/v1/pokemons/pichu")
            .set_json(&pokemon_patch)
            .to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!(new_pokemon.id, api_pokemon.id);
        assert_eq!(172, api_pokemon.no);
        assert_eq!("pikachu", api_pokemon.name);

        let stored_pokemon = app
            .pokemons()
            .find_one(doc! { "_id": mongodb::bson::oid::ObjectId::parse_str(&new_pokemon.id).unwrap() })
            .await
            .unwrap();
        assert_matches!(stored_pokemon, Some(pokemon) if pokemon.name == "pikachu");
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_update_by_no_merges_patch() {
        init_test_service!(app, service);

        let new_pokemon = build_pokemon(172, "pichu");
        app.pokemons().insert_one(&new_pokemon).await.unwrap();

        let pokemon_patch = build_update_pokemon(None, Some(173));
        let req = test::TestRequest::patch()
            .uri("/api/v1/pokemons/172")
            .set_json(&pokemon_patch)
            .to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        // Returned view is the pre-update document overlaid with the patch.
        assert_eq!(new_pokemon.id, api_pokemon.id);
        assert_eq!(173, api_pokemon.no);
        assert_eq!("pichu", api_pokemon.name);
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_update_does_not_exist() {
        init_test_service!(app, service);

        let pokemon_patch = build_update_pokemon(Some("pikachu"), None);
        let req = test::TestRequest::patch()
            .uri("/api/v1/pokemons/missingno")
            .set_json(&pokemon_patch)
            .to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::NOT_FOUND, result.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_update_duplicate_name() {
        init_test_service!(app, service);

        let pokemons = [build_pokemon(25, "pikachu"), build_pokemon(172, "pichu")];
        app.pokemons().insert_many(&pokemons).await.unwrap();

        let pokemon_patch = build_update_pokemon(Some("pikachu"), None);
        let req = test::TestRequest::patch()
            .uri("/api/v1/pokemons/pichu")
            .set_json(&pokemon_patch)
            .to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, result.status());
    }
}

mod delete {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use mongodb::bson::doc;
    use serial_test::file_serial;

    use crate::init_test_service;
    use crate::integration_helpers::factories::pokemon::build_pokemon;

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_delete_twice() {
        init_test_service!(app, service);

        let new_pokemon = build_pokemon(25, "pikachu");
        app.pokemons().insert_one(&new_pokemon).await.unwrap();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/pokemons/{}", new_pokemon.id))
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NO_CONTENT, result.status());

        let remaining_count = app.pokemons().count_documents(doc! {}).await.unwrap();
        assert_eq!(0, remaining_count);

        // Deleting the same id a second time must fail.
        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/pokemons/{}", new_pokemon.id))
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NOT_FOUND, result.status());
    }

    #[test_log::test(actix_web::test)]
    #[file_serial(api_v1_pokemons)]
    async fn test_delete_invalid_id_rejected_before_db() {
        init_test_service!(app, service);

        let new_pokemon = build_pokemon(25, "pikachu");
        app.pokemons().insert_one(&new_pokemon).await.unwrap();

        let req = test::TestRequest::delete()
            .uri("/api/v1/pokemons/not-an-object-id")
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, result.status());

        let body: serde_json::Value = test::read_body_json(result).await;
        assert!(body["details"]
            .as_str()
            .unwrap()
            .contains("not-an-object-id is not valid identifier"));

        // The guard rejects before any store access, so nothing was deleted.
        let remaining_count = app.pokemons().count_documents(doc! {}).await.unwrap();
        assert_eq!(1, remaining_count);
    }
}
