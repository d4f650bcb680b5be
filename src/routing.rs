//! Application router configuration.

use axum::{
    Router,
    extract::OriginalUri,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, category::Category, payment_method::PaymentMethod, resource, tag::Tag,
    transaction, vendor::Vendor,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(resource::routes::<Category>())
        .merge(resource::routes::<PaymentMethod>())
        .merge(resource::routes::<Tag>())
        .merge(resource::routes::<Vendor>())
        .merge(transaction::routes())
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found(OriginalUri(uri): OriginalUri) -> Response {
    Error::UnknownRoute(uri.path().to_owned())
        .at(uri.path())
        .into_response()
}

#[cfg(test)]
mod api_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, ErrorBody, PaginationConfig, build_router};

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection, PaginationConfig::default())
            .expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    /// A collection path and a valid create body for each named resource.
    fn named_resources() -> Vec<(&'static str, Value)> {
        vec![
            ("/api/categories", json!({"name": "Food", "color": "GREEN"})),
            (
                "/api/payment-methods",
                json!({"name": "Visa", "type": "CREDIT_CARD"}),
            ),
            ("/api/tags", json!({"name": "Holiday", "color": "BLUE"})),
            (
                "/api/vendors",
                json!({"type": "Online Store", "name": "Web shop", "url": "https://shop.example"}),
            ),
        ]
    }

    async fn create(server: &TestServer, path: &str, body: Value) -> Value {
        let response = server.post(path).json(&body).await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()
    }

    fn id_of(value: &Value) -> i64 {
        value["id"].as_i64().expect("Response should have an integer ID")
    }

    async fn create_transaction(server: &TestServer, body: Value) -> Value {
        create(server, "/api/transactions", body).await
    }

    #[tokio::test]
    async fn creating_a_duplicate_name_conflicts() {
        let server = get_test_server();

        for (path, body) in named_resources() {
            let existing = create(&server, path, body.clone()).await;

            let response = server.post(path).json(&body).await;

            response.assert_status(StatusCode::CONFLICT);
            let error = response.json::<ErrorBody>();
            assert_eq!(error.status, 409);
            assert_eq!(error.path, path);
            let existing_path = existing["path"].as_str().unwrap();
            assert!(
                error.message.unwrap().contains(existing_path),
                "conflict for {path} should name {existing_path}"
            );
        }
    }

    #[tokio::test]
    async fn get_after_create_returns_the_created_record() {
        let server = get_test_server();

        for (path, body) in named_resources() {
            let created = create(&server, path, body).await;
            let member_path = format!("{path}/{}", id_of(&created));
            assert_eq!(created["path"], member_path.as_str());

            let response = server.get(&member_path).await;

            response.assert_status_ok();
            assert_eq!(response.json::<Value>(), created);
        }
    }

    #[tokio::test]
    async fn get_by_name_finds_exact_match_only() {
        let server = get_test_server();
        let created = create(
            &server,
            "/api/categories",
            json!({"name": "Food", "color": "GREEN"}),
        )
        .await;

        let found = server.get("/api/categories/name/Food").await;
        let missing = server.get("/api/categories/name/food").await;

        found.assert_status_ok();
        assert_eq!(found.json::<Value>(), created);
        missing.assert_status_not_found();
        assert_eq!(
            missing.json::<ErrorBody>().message.as_deref(),
            Some("Category with name \"food\" not found")
        );
    }

    #[tokio::test]
    async fn list_wraps_items_with_count() {
        let server = get_test_server();
        create(&server, "/api/tags", json!({"name": "Work", "color": "GRAY"})).await;
        create(&server, "/api/tags", json!({"name": "Travel", "color": "GRAY"})).await;

        let response = server.get("/api/tags").await;

        response.assert_status_ok();
        let list = response.json::<Value>();
        assert_eq!(list["numberOfItems"], 2);
        assert_eq!(list["items"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn patch_with_null_name_only_changes_color() {
        let server = get_test_server();

        for path in ["/api/categories", "/api/tags"] {
            let created = create(&server, path, json!({"name": "Fun", "color": "RED"})).await;
            let member_path = created["path"].as_str().unwrap().to_owned();

            let response = server
                .patch(&member_path)
                .json(&json!({"name": null, "color": "PURPLE"}))
                .await;

            response.assert_status_ok();
            let patched = response.json::<Value>();
            assert_eq!(patched["name"], "Fun");
            assert_eq!(patched["color"], "PURPLE");
            assert_eq!(server.get(&member_path).await.json::<Value>(), patched);
        }
    }

    #[tokio::test]
    async fn patch_to_a_used_name_conflicts() {
        let server = get_test_server();
        create(
            &server,
            "/api/payment-methods",
            json!({"name": "Visa", "type": "CREDIT_CARD"}),
        )
        .await;
        let cash = create(
            &server,
            "/api/payment-methods",
            json!({"name": "Cash", "type": "CASH"}),
        )
        .await;

        let response = server
            .patch(cash["path"].as_str().unwrap())
            .json(&json!({"name": "Visa"}))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn put_replaces_every_field_and_keeps_id() {
        let server = get_test_server();
        let created = create(
            &server,
            "/api/payment-methods",
            json!({"name": "Visa", "type": "CREDIT_CARD"}),
        )
        .await;
        let member_path = created["path"].as_str().unwrap();

        let response = server
            .put(member_path)
            .json(&json!({"name": "Mastercard", "type": "DEBIT_CARD"}))
            .await;

        response.assert_status_ok();
        let replaced = response.json::<Value>();
        assert_eq!(replaced["id"], created["id"]);
        assert_eq!(replaced["name"], "Mastercard");
        assert_eq!(replaced["type"], "DEBIT_CARD");
    }

    #[tokio::test]
    async fn put_requires_every_field() {
        let server = get_test_server();
        let created = create(
            &server,
            "/api/categories",
            json!({"name": "Food", "color": "GREEN"}),
        )
        .await;

        let response = server
            .put(created["path"].as_str().unwrap())
            .json(&json!({"name": "Groceries"}))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<ErrorBody>().message.as_deref(),
            Some("color is required")
        );
    }

    #[tokio::test]
    async fn non_null_id_is_rejected_on_create_and_patch() {
        let server = get_test_server();

        for (path, body) in named_resources() {
            let existing = create(&server, path, body.clone()).await;
            let mut body_with_id = body;
            body_with_id["id"] = json!(99);

            let create_response = server.post(path).json(&body_with_id).await;
            let patch_response = server
                .patch(existing["path"].as_str().unwrap())
                .json(&json!({"id": 99}))
                .await;

            for response in [create_response, patch_response] {
                response.assert_status_bad_request();
                let error = response.json::<ErrorBody>();
                assert_eq!(error.message.as_deref(), Some("id must be null"));
            }
        }

        let response = server
            .post("/api/transactions")
            .json(&json!({
                "id": 1,
                "amount": "1.00",
                "date": "2025-01-01T00:00:00Z",
                "description": "Gum"
            }))
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn missing_fields_are_all_reported() {
        let server = get_test_server();

        let response = server.post("/api/tags").json(&json!({"id": 1})).await;

        response.assert_status_bad_request();
        let error = response.json::<ErrorBody>();
        assert_eq!(error.message, None);
        assert_eq!(
            error.messages,
            Some(vec![
                "id must be null".to_owned(),
                "name is required".to_owned(),
                "color is required".to_owned()
            ])
        );
    }

    #[tokio::test]
    async fn malformed_enum_lists_legal_values() {
        let server = get_test_server();

        let response = server
            .post("/api/categories")
            .json(&json!({"name": "Food", "color": "TEAL"}))
            .await;

        response.assert_status_bad_request();
        let error = response.json::<ErrorBody>();
        assert_eq!(
            error.message.as_deref(),
            Some(
                "invalid value \"TEAL\" for field \"color\", expected one of: \
                 RED, ORANGE, YELLOW, GREEN, BLUE, PURPLE, PINK, BROWN, GRAY, BLACK, WHITE"
            )
        );
    }

    #[tokio::test]
    async fn malformed_vendor_type_is_rejected() {
        let server = get_test_server();

        let response = server
            .post("/api/vendors")
            .json(&json!({"type": "Market Stall", "name": "Stall"}))
            .await;

        response.assert_status_bad_request();
        assert!(
            response
                .json::<ErrorBody>()
                .message
                .unwrap()
                .ends_with("expected one of: Online Store, Physical Store")
        );
    }

    #[tokio::test]
    async fn invalid_json_is_a_bad_request() {
        let server = get_test_server();

        let response = server
            .post("/api/categories")
            .content_type("application/json")
            .bytes("{\"name\": ".into())
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<ErrorBody>().path, "/api/categories");
    }

    #[tokio::test]
    async fn vendors_keep_their_variant() {
        let server = get_test_server();
        let online = create(
            &server,
            "/api/vendors",
            json!({"type": "Online Store", "name": "Web shop", "url": "https://shop.example"}),
        )
        .await;
        let physical = create(
            &server,
            "/api/vendors",
            json!({"type": "Physical Store", "name": "Corner shop", "address": "12 High St"}),
        )
        .await;

        let online = server
            .get(online["path"].as_str().unwrap())
            .await
            .json::<Value>();
        let physical = server
            .get(physical["path"].as_str().unwrap())
            .await
            .json::<Value>();

        assert_eq!(online["type"], "Online Store");
        assert_eq!(online["url"], "https://shop.example");
        assert!(online.get("address").is_none());
        assert_eq!(physical["type"], "Physical Store");
        assert_eq!(physical["address"], "12 High St");
        assert!(physical.get("url").is_none());
    }

    #[tokio::test]
    async fn vendor_names_are_shared_across_variants() {
        let server = get_test_server();
        create(
            &server,
            "/api/vendors",
            json!({"type": "Online Store", "name": "Acme", "url": "https://acme.example"}),
        )
        .await;

        let response = server
            .post("/api/vendors")
            .json(&json!({"type": "Physical Store", "name": "Acme", "address": "1 Main Rd"}))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn vendor_patch_with_other_variant_is_rejected() {
        let server = get_test_server();
        let online = create(
            &server,
            "/api/vendors",
            json!({"type": "Online Store", "name": "Web shop", "url": "https://shop.example"}),
        )
        .await;
        let member_path = online["path"].as_str().unwrap();

        let response = server
            .patch(member_path)
            .json(&json!({"type": "Physical Store", "address": "12 High St"}))
            .await;

        response.assert_status_bad_request();
        assert_eq!(server.get(member_path).await.json::<Value>(), online);
    }

    #[tokio::test]
    async fn vendor_put_can_change_variant() {
        let server = get_test_server();
        let online = create(
            &server,
            "/api/vendors",
            json!({"type": "Online Store", "name": "Web shop", "url": "https://shop.example"}),
        )
        .await;

        let response = server
            .put(online["path"].as_str().unwrap())
            .json(&json!({"type": "Physical Store", "name": "Web shop", "address": "12 High St"}))
            .await;

        response.assert_status_ok();
        let replaced = response.json::<Value>();
        assert_eq!(replaced["type"], "Physical Store");
        assert_eq!(replaced["address"], "12 High St");
        assert!(replaced.get("url").is_none());
    }

    #[tokio::test]
    async fn delete_returns_no_content_then_not_found() {
        let server = get_test_server();

        for (path, body) in named_resources() {
            let created = create(&server, path, body).await;
            let member_path = created["path"].as_str().unwrap();

            server
                .delete(member_path)
                .await
                .assert_status(StatusCode::NO_CONTENT);
            server.get(member_path).await.assert_status_not_found();
            server.delete(member_path).await.assert_status_not_found();
        }
    }

    #[tokio::test]
    async fn transaction_embeds_its_references() {
        let server = get_test_server();
        let category = create(
            &server,
            "/api/categories",
            json!({"name": "Food", "color": "GREEN"}),
        )
        .await;
        let vendor = create(
            &server,
            "/api/vendors",
            json!({"type": "Physical Store", "name": "Market", "address": "Town square"}),
        )
        .await;
        let tag = create(&server, "/api/tags", json!({"name": "Weekly", "color": "PINK"})).await;

        let transaction = create_transaction(
            &server,
            json!({
                "amount": "42.50",
                "date": "2025-06-01T10:00:00Z",
                "description": "Vegetables",
                "categoryId": id_of(&category),
                "vendorId": id_of(&vendor),
                "tagIds": [id_of(&tag)]
            }),
        )
        .await;

        assert_eq!(transaction["amount"], "42.50");
        assert_eq!(transaction["category"], category);
        assert_eq!(transaction["vendor"], vendor);
        assert_eq!(transaction["tags"], json!([tag]));
        assert_eq!(transaction["paymentMethod"], Value::Null);
        let member_path = transaction["path"].as_str().unwrap();
        assert_eq!(server.get(member_path).await.json::<Value>(), transaction);
    }

    #[tokio::test]
    async fn transaction_with_missing_reference_is_not_found() {
        let server = get_test_server();

        let response = server
            .post("/api/transactions")
            .json(&json!({
                "amount": "1.00",
                "date": "2025-01-01T00:00:00Z",
                "description": "Gum",
                "categoryId": 5
            }))
            .await;

        response.assert_status_not_found();
        assert_eq!(
            response.json::<ErrorBody>().message.as_deref(),
            Some("Category with id 5 not found")
        );
    }

    #[tokio::test]
    async fn transaction_tag_patch_distinguishes_absent_from_empty() {
        let server = get_test_server();
        let tag = create(&server, "/api/tags", json!({"name": "Weekly", "color": "PINK"})).await;
        let transaction = create_transaction(
            &server,
            json!({
                "amount": "3.00",
                "date": "2025-01-01T00:00:00Z",
                "description": "Coffee",
                "tagIds": [id_of(&tag)]
            }),
        )
        .await;
        let member_path = transaction["path"].as_str().unwrap();

        let untouched = server
            .patch(member_path)
            .json(&json!({"description": "Tea", "tagIds": null}))
            .await
            .json::<Value>();
        let cleared = server
            .patch(member_path)
            .json(&json!({"tagIds": []}))
            .await
            .json::<Value>();

        assert_eq!(untouched["description"], "Tea");
        assert_eq!(untouched["tags"], json!([tag]));
        assert_eq!(cleared["tags"], json!([]));
        assert_eq!(cleared["description"], "Tea");
    }

    #[tokio::test]
    async fn owner_transactions_are_paginated() {
        let server = get_test_server();
        let category = create(
            &server,
            "/api/categories",
            json!({"name": "Food", "color": "GREEN"}),
        )
        .await;
        let category_id = id_of(&category);
        let later = create_transaction(
            &server,
            json!({
                "amount": "2.00",
                "date": "2025-01-02T00:00:00Z",
                "description": "Second",
                "categoryId": category_id
            }),
        )
        .await;
        let earlier = create_transaction(
            &server,
            json!({
                "amount": "1.00",
                "date": "2025-01-01T00:00:00Z",
                "description": "First",
                "categoryId": category_id
            }),
        )
        .await;
        let base = format!("/api/categories/{category_id}/transactions");

        let first = server
            .get(&format!("{base}?page=0&size=1"))
            .await
            .json::<Value>();
        let second = server
            .get(&format!("{base}?page=1&size=1"))
            .await
            .json::<Value>();

        assert_eq!(first["items"], json!([earlier]));
        assert_eq!(first["totalElements"], 2);
        assert_eq!(first["totalPages"], 2);
        assert_eq!(first["nextPage"], format!("{base}?page=1&size=1"));
        assert!(first.get("previousPage").is_none());

        assert_eq!(second["items"], json!([later]));
        assert_eq!(second["previousPage"], format!("{base}?page=0&size=1"));
        assert!(second.get("nextPage").is_none());
    }

    #[tokio::test]
    async fn owner_transactions_use_default_page() {
        let server = get_test_server();
        let tag = create(&server, "/api/tags", json!({"name": "Weekly", "color": "PINK"})).await;
        create_transaction(
            &server,
            json!({
                "amount": "3.00",
                "date": "2025-01-01T00:00:00Z",
                "description": "Coffee",
                "tagIds": [id_of(&tag)]
            }),
        )
        .await;

        let response = server
            .get(&format!("/api/tags/{}/transactions", id_of(&tag)))
            .await;

        response.assert_status_ok();
        let page = response.json::<Value>();
        assert_eq!(page["page"], 0);
        assert_eq!(page["size"], 20);
        assert_eq!(page["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn largest_page_index_returns_an_empty_page() {
        let server = get_test_server();
        let category = create(
            &server,
            "/api/categories",
            json!({"name": "Food", "color": "GREEN"}),
        )
        .await;

        let response = server
            .get(&format!(
                "/api/categories/{}/transactions?page={}&size=1",
                id_of(&category),
                u64::MAX
            ))
            .await;

        response.assert_status_ok();
        let page = response.json::<Value>();
        assert_eq!(page["items"], json!([]));
        assert!(page.get("nextPage").is_none());
    }

    #[tokio::test]
    async fn zero_page_size_is_rejected() {
        let server = get_test_server();
        let category = create(
            &server,
            "/api/categories",
            json!({"name": "Food", "color": "GREEN"}),
        )
        .await;

        let response = server
            .get(&format!(
                "/api/categories/{}/transactions?size=0",
                id_of(&category)
            ))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn transactions_of_missing_owner_are_not_found() {
        let server = get_test_server();

        let response = server.get("/api/payment-methods/3/transactions").await;

        response.assert_status_not_found();
        assert_eq!(
            response.json::<ErrorBody>().message.as_deref(),
            Some("Payment method with id 3 not found")
        );
    }

    #[tokio::test]
    async fn deleting_a_category_deletes_its_transactions() {
        let server = get_test_server();
        let category = create(
            &server,
            "/api/categories",
            json!({"name": "Food", "color": "GREEN"}),
        )
        .await;
        let transaction = create_transaction(
            &server,
            json!({
                "amount": "1.00",
                "date": "2025-01-01T00:00:00Z",
                "description": "Bread",
                "categoryId": id_of(&category)
            }),
        )
        .await;

        server
            .delete(category["path"].as_str().unwrap())
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(transaction["path"].as_str().unwrap())
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn deleting_a_tag_keeps_its_transactions() {
        let server = get_test_server();
        let work = create(&server, "/api/tags", json!({"name": "Work", "color": "GRAY"})).await;
        let travel = create(&server, "/api/tags", json!({"name": "Travel", "color": "BLUE"})).await;
        let transaction = create_transaction(
            &server,
            json!({
                "amount": "120.00",
                "date": "2025-01-01T00:00:00Z",
                "description": "Train",
                "tagIds": [id_of(&work), id_of(&travel)]
            }),
        )
        .await;

        server
            .delete(work["path"].as_str().unwrap())
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let response = server.get(transaction["path"].as_str().unwrap()).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["tags"], json!([travel]));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/api/budgets").await;

        response.assert_status_not_found();
        let error = response.json::<ErrorBody>();
        assert_eq!(error.error, "Not Found");
        assert_eq!(error.path, "/api/budgets");
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_bad_request() {
        let server = get_test_server();

        let response = server.get("/api/categories/abc").await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<ErrorBody>().path, "/api/categories/abc");
    }
}
