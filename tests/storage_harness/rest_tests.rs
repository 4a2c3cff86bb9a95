//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that validate
//! a store through full round-trips:
//! JSON → HTTP request → handler → store → HTTP response → JSON.

/// Generate a REST integration test suite for a storage backend.
///
/// `$store_factory` must produce a fresh, empty store implementing
/// `CompanyService + InvoiceService + 'static`. It is re-evaluated for each
/// test.
///
/// # Generated Tests
///
/// ## Companies
/// - create, detail with invoice ids, list order, update, delete
/// - 404 on unknown code, 409 on duplicate code, 400 on missing/invalid body
///
/// ## Invoices
/// - create defaults, joined detail, list order, amount-only update, delete
/// - 400 on unknown company, negative amount, non-integer id
///
/// ## Cross-resource
/// - the end-to-end ibm scenario, cascading company delete
#[macro_export]
macro_rules! rest_integration_tests {
    ($store_factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                storage_harness::test_server($store_factory)
            }

            // ==============================================================
            // Companies: Create
            // ==============================================================

            #[tokio::test]
            async fn test_create_company() {
                let server = make_server().await;

                let response = server
                    .post("/companies")
                    .json(&company_json("ibm", "IBM", Some("Big blue.")))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({"company": {"code": "ibm", "name": "IBM", "description": "Big blue."}})
                );
            }

            #[tokio::test]
            async fn test_create_company_without_description() {
                let server = make_server().await;

                let response = server
                    .post("/companies")
                    .json(&json!({"code": "apple", "name": "Apple"}))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert!(body["company"]["description"].is_null());
            }

            #[tokio::test]
            async fn test_create_company_duplicate_code() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;

                let response = server
                    .post("/companies")
                    .json(&company_json("ibm", "Other", None))
                    .await;

                response.assert_status(StatusCode::CONFLICT);
                assert_error(&response.json(), 409, "ENTITY_ALREADY_EXISTS");
            }

            #[tokio::test]
            async fn test_create_company_without_body() {
                let server = make_server().await;

                let response = server.post("/companies").await;

                response.assert_status(StatusCode::BAD_REQUEST);
                assert_error(&response.json(), 400, "MISSING_BODY");
            }

            #[tokio::test]
            async fn test_create_company_missing_name() {
                let server = make_server().await;

                let response = server
                    .post("/companies")
                    .json(&json!({"code": "ibm"}))
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                assert_error(&response.json(), 400, "VALIDATION_ERROR");
            }

            #[tokio::test]
            async fn test_create_company_empty_code() {
                let server = make_server().await;

                let response = server
                    .post("/companies")
                    .json(&company_json("", "Nameless", None))
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let error = assert_error(&response.json(), 400, "VALIDATION_ERROR");
                assert_eq!(error["details"]["fields"][0]["field"], "code");
            }

            #[tokio::test]
            async fn test_create_company_unknown_field() {
                let server = make_server().await;

                let response = server
                    .post("/companies")
                    .json(&json!({"code": "ibm", "name": "IBM", "ceo": "nobody"}))
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                assert_error(&response.json(), 400, "VALIDATION_ERROR");
            }

            // ==============================================================
            // Companies: Read
            // ==============================================================

            #[tokio::test]
            async fn test_list_companies_ordered_by_name() {
                let server = make_server().await;
                seed_company(&server, "zzz", "Apple").await;
                seed_company(&server, "aaa", "Zenith").await;
                seed_company(&server, "mmm", "Microsoft").await;

                let response = server.get("/companies").await;
                response.assert_status_ok();

                let body: Value = response.json();
                let companies = body["companies"].as_array().unwrap();
                assert_eq!(companies.len(), 3);
                let names: Vec<&str> = companies
                    .iter()
                    .map(|c| c["name"].as_str().unwrap())
                    .collect();
                assert_eq!(names, vec!["Apple", "Microsoft", "Zenith"]);
                // Listing carries no invoice ids
                assert!(companies[0].get("invoices").is_none());
            }

            #[tokio::test]
            async fn test_list_companies_empty() {
                let server = make_server().await;

                let response = server.get("/companies").await;
                response.assert_status_ok();
                assert_eq!(response.json::<Value>(), json!({"companies": []}));
            }

            #[tokio::test]
            async fn test_get_company_with_invoice_ids() {
                let server = make_server().await;
                server
                    .post("/companies")
                    .json(&company_json("ibm", "IBM", Some("Big blue.")))
                    .await
                    .assert_status(StatusCode::CREATED);
                seed_company(&server, "apple", "Apple").await;

                let first = seed_invoice(&server, "ibm", 100.0).await;
                let _other = seed_invoice(&server, "apple", 50.0).await;
                let second = seed_invoice(&server, "ibm", 200.0).await;

                let response = server.get("/companies/ibm").await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["company"]["code"], "ibm");
                assert_eq!(body["company"]["name"], "IBM");
                assert_eq!(body["company"]["description"], "Big blue.");
                assert_eq!(body["company"]["invoices"], json!([first, second]));
            }

            #[tokio::test]
            async fn test_get_company_without_invoices() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;

                let response = server.get("/companies/ibm").await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["company"]["invoices"], json!([]));
            }

            #[tokio::test]
            async fn test_get_company_not_found() {
                let server = make_server().await;

                let response = server.get("/companies/nonexistent").await;

                response.assert_status(StatusCode::NOT_FOUND);
                let error = assert_error(&response.json(), 404, "ENTITY_NOT_FOUND");
                assert!(error["message"].as_str().unwrap().contains("nonexistent"));
            }

            // ==============================================================
            // Companies: Update
            // ==============================================================

            #[tokio::test]
            async fn test_update_company() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;

                let response = server
                    .put("/companies/ibm")
                    .json(&json!({"name": "IBM Corp", "description": "Still blue."}))
                    .await;

                response.assert_status_ok();
                assert_eq!(
                    response.json::<Value>(),
                    json!({"company": {"code": "ibm", "name": "IBM Corp", "description": "Still blue."}})
                );

                let fetched: Value = server.get("/companies/ibm").await.json();
                assert_eq!(fetched["company"]["name"], "IBM Corp");
            }

            #[tokio::test]
            async fn test_update_company_not_found() {
                let server = make_server().await;

                let response = server
                    .put("/companies/ghost")
                    .json(&json!({"name": "Ghost", "description": null}))
                    .await;

                response.assert_status(StatusCode::NOT_FOUND);
                assert_error(&response.json(), 404, "ENTITY_NOT_FOUND");
            }

            #[tokio::test]
            async fn test_update_company_without_body() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;

                let response = server.put("/companies/ibm").await;

                response.assert_status(StatusCode::BAD_REQUEST);
                assert_error(&response.json(), 400, "MISSING_BODY");
            }

            #[tokio::test]
            async fn test_update_company_cannot_change_code() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;

                let response = server
                    .put("/companies/ibm")
                    .json(&json!({"code": "big", "name": "IBM", "description": null}))
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                server.get("/companies/ibm").await.assert_status_ok();
            }

            // ==============================================================
            // Companies: Delete
            // ==============================================================

            #[tokio::test]
            async fn test_delete_company() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;

                let response = server.delete("/companies/ibm").await;
                response.assert_status_ok();
                assert_eq!(response.json::<Value>(), json!({"message": "Deleted"}));

                server
                    .get("/companies/ibm")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .delete("/companies/ibm")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_delete_company_cascades_to_invoices() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;
                seed_company(&server, "apple", "Apple").await;
                let doomed = seed_invoice(&server, "ibm", 10.0).await;
                let kept = seed_invoice(&server, "apple", 20.0).await;

                server.delete("/companies/ibm").await.assert_status_ok();

                server
                    .get(&format!("/invoices/{}", doomed))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .get(&format!("/invoices/{}", kept))
                    .await
                    .assert_status_ok();

                let body: Value = server.get("/invoices").await.json();
                assert_eq!(body["invoices"], json!([{"id": kept, "comp_code": "apple"}]));
            }

            // ==============================================================
            // Invoices: Create & Read
            // ==============================================================

            #[tokio::test]
            async fn test_create_invoice_defaults() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;

                let response = server
                    .post("/invoices")
                    .json(&json!({"comp_code": "ibm", "amt": 200}))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                let invoice = &body["invoice"];
                assert!(invoice["id"].is_i64());
                assert_eq!(invoice["comp_code"], "ibm");
                assert_eq!(invoice["amt"].as_f64(), Some(200.0));
                assert_eq!(invoice["paid"], false);
                assert!(invoice["paid_date"].is_null());
                let add_date = invoice["add_date"].as_str().unwrap();
                assert!(chrono::NaiveDate::parse_from_str(add_date, "%Y-%m-%d").is_ok());
            }

            #[tokio::test]
            async fn test_get_invoice_with_company() {
                let server = make_server().await;
                server
                    .post("/companies")
                    .json(&company_json("ibm", "IBM", Some("Big blue.")))
                    .await
                    .assert_status(StatusCode::CREATED);
                let id = seed_invoice(&server, "ibm", 200.0).await;

                let response = server.get(&format!("/invoices/{}", id)).await;
                response.assert_status_ok();

                let body: Value = response.json();
                let invoice = &body["invoice"];
                assert_eq!(invoice["id"], id);
                assert_eq!(invoice["amt"].as_f64(), Some(200.0));
                assert_eq!(invoice["paid"], false);
                assert!(invoice["add_date"].is_string());
                assert!(invoice["paid_date"].is_null());
                assert_eq!(
                    invoice["company"],
                    json!({"code": "ibm", "name": "IBM", "description": "Big blue."})
                );
                // The joined shape replaces comp_code with the company object
                assert!(invoice.get("comp_code").is_none());
            }

            #[tokio::test]
            async fn test_list_invoices_ordered_by_id() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;
                seed_company(&server, "apple", "Apple").await;
                let a = seed_invoice(&server, "ibm", 1.0).await;
                let b = seed_invoice(&server, "apple", 2.0).await;
                let c = seed_invoice(&server, "ibm", 3.0).await;

                let response = server.get("/invoices").await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(
                    body["invoices"],
                    json!([
                        {"id": a, "comp_code": "ibm"},
                        {"id": b, "comp_code": "apple"},
                        {"id": c, "comp_code": "ibm"},
                    ])
                );
            }

            #[tokio::test]
            async fn test_create_invoice_unknown_company() {
                let server = make_server().await;

                let response = server
                    .post("/invoices")
                    .json(&invoice_json("ghost", 10.0))
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let error = assert_error(&response.json(), 400, "UNKNOWN_REFERENCE");
                assert_eq!(error["details"]["value"], "ghost");
            }

            #[tokio::test]
            async fn test_create_invoice_without_body() {
                let server = make_server().await;

                let response = server.post("/invoices").await;

                response.assert_status(StatusCode::BAD_REQUEST);
                assert_error(&response.json(), 400, "MISSING_BODY");
            }

            #[tokio::test]
            async fn test_create_invoice_rejects_bad_amounts() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;

                for body in [
                    json!({"comp_code": "ibm", "amt": -5}),
                    json!({"comp_code": "ibm", "amt": "lots"}),
                    json!({"comp_code": "ibm"}),
                ] {
                    let response = server.post("/invoices").json(&body).await;
                    response.assert_status(StatusCode::BAD_REQUEST);
                    assert_error(&response.json(), 400, "VALIDATION_ERROR");
                }

                let listed: Value = server.get("/invoices").await.json();
                assert_eq!(listed["invoices"], json!([]));
            }

            #[tokio::test]
            async fn test_get_invoice_not_found() {
                let server = make_server().await;

                let response = server.get("/invoices/999999").await;

                response.assert_status(StatusCode::NOT_FOUND);
                let error = assert_error(&response.json(), 404, "ENTITY_NOT_FOUND");
                assert!(error["message"].as_str().unwrap().contains("999999"));
            }

            #[tokio::test]
            async fn test_invoice_id_must_be_integer() {
                let server = make_server().await;

                for path in ["/invoices/abc", "/invoices/1.5", "/invoices/99999999999"] {
                    let response = server.get(path).await;
                    response.assert_status(StatusCode::BAD_REQUEST);
                    assert_error(&response.json(), 400, "INVALID_ENTITY_ID");
                }

                let response = server.delete("/invoices/abc").await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            // ==============================================================
            // Invoices: Update & Delete
            // ==============================================================

            #[tokio::test]
            async fn test_update_invoice_only_changes_amount() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;

                let created: Value = server
                    .post("/invoices")
                    .json(&invoice_json("ibm", 100.0))
                    .await
                    .json();
                let before = &created["invoice"];
                let id = before["id"].as_i64().unwrap();

                let response = server
                    .put(&format!("/invoices/{}", id))
                    .json(&json!({"amt": 350.5}))
                    .await;

                response.assert_status_ok();
                let body: Value = response.json();
                let after = &body["invoice"];
                assert_eq!(after["id"], before["id"]);
                assert_eq!(after["amt"].as_f64(), Some(350.5));
                assert_eq!(after["comp_code"], before["comp_code"]);
                assert_eq!(after["paid"], before["paid"]);
                assert_eq!(after["add_date"], before["add_date"]);
                assert_eq!(after["paid_date"], before["paid_date"]);
            }

            #[tokio::test]
            async fn test_update_invoice_rejects_other_fields() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;
                let id = seed_invoice(&server, "ibm", 100.0).await;

                let response = server
                    .put(&format!("/invoices/{}", id))
                    .json(&json!({"amt": 1, "paid": true}))
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let fetched: Value = server.get(&format!("/invoices/{}", id)).await.json();
                assert_eq!(fetched["invoice"]["paid"], false);
                assert_eq!(fetched["invoice"]["amt"].as_f64(), Some(100.0));
            }

            #[tokio::test]
            async fn test_update_invoice_not_found() {
                let server = make_server().await;

                let response = server
                    .put("/invoices/424242")
                    .json(&json!({"amt": 1}))
                    .await;

                response.assert_status(StatusCode::NOT_FOUND);
                assert_error(&response.json(), 404, "ENTITY_NOT_FOUND");
            }

            #[tokio::test]
            async fn test_update_invoice_without_body() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;
                let id = seed_invoice(&server, "ibm", 100.0).await;

                let response = server.put(&format!("/invoices/{}", id)).await;

                response.assert_status(StatusCode::BAD_REQUEST);
                assert_error(&response.json(), 400, "MISSING_BODY");
            }

            #[tokio::test]
            async fn test_delete_invoice() {
                let server = make_server().await;
                seed_company(&server, "ibm", "IBM").await;
                let id = seed_invoice(&server, "ibm", 100.0).await;

                let response = server.delete(&format!("/invoices/{}", id)).await;
                response.assert_status_ok();
                assert_eq!(response.json::<Value>(), json!({"message": "Deleted"}));

                server
                    .get(&format!("/invoices/{}", id))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);

                // The company itself is untouched
                let company: Value = server.get("/companies/ibm").await.json();
                assert_eq!(company["company"]["invoices"], json!([]));
            }

            #[tokio::test]
            async fn test_delete_invoice_not_found() {
                let server = make_server().await;

                let response = server.delete("/invoices/31337").await;

                response.assert_status(StatusCode::NOT_FOUND);
                assert_error(&response.json(), 404, "ENTITY_NOT_FOUND");
            }

            // ==============================================================
            // End to end
            // ==============================================================

            #[tokio::test]
            async fn test_ibm_scenario() {
                let server = make_server().await;

                let company = server
                    .post("/companies")
                    .json(&json!({"code": "ibm", "name": "IBM", "description": "Big blue."}))
                    .await;
                company.assert_status(StatusCode::CREATED);
                assert_eq!(
                    company.json::<Value>(),
                    json!({"company": {"code": "ibm", "name": "IBM", "description": "Big blue."}})
                );

                let invoice = server
                    .post("/invoices")
                    .json(&json!({"comp_code": "ibm", "amt": 200}))
                    .await;
                invoice.assert_status(StatusCode::CREATED);
                let id = invoice.json::<Value>()["invoice"]["id"].as_i64().unwrap();

                let detail: Value = server.get(&format!("/invoices/{}", id)).await.json();
                assert_eq!(detail["invoice"]["company"]["code"], "ibm");

                let company: Value = server.get("/companies/ibm").await.json();
                assert_eq!(company["company"]["invoices"], json!([id]));
            }

            #[tokio::test]
            async fn test_health_and_unknown_route() {
                let server = make_server().await;

                let health = server.get("/health").await;
                health.assert_status_ok();
                assert_eq!(
                    health.json::<Value>(),
                    json!({"status": "ok", "service": "biztime"})
                );

                let missing = server.get("/payments").await;
                missing.assert_status(StatusCode::NOT_FOUND);
                assert_error(&missing.json(), 404, "ROUTE_NOT_FOUND");
            }
        }
    };
}
