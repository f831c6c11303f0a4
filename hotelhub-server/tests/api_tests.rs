//! End-to-end API tests against a real Postgres
//!
//! Run with: DB_CONNECTION_STRING=postgres://... cargo test -p hotelhub-server -- --ignored

use std::sync::{Mutex, MutexGuard};

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use hotelhub_server::db::migrations;
use hotelhub_server::db::repos::menu_displays::delete_cascade;
use hotelhub_server::db::repos::{MenuDisplayRepo, OccasionRepo, ServiceRepo};
use hotelhub_server::models::{MenuDisplayRequest, NewOccasion, NewService, OccasionPricing};
use hotelhub_server::{build_router, create_pool, AppState, ServerConfig};

const BOUNDARY: &str = "hotelhub-it-boundary";

/// Tests share one database; row-count assertions need them to run one at a time.
static DB_LOCK: Mutex<()> = Mutex::new(());

struct TestApp {
    pool: PgPool,
    router: Router,
    _uploads: TempDir,
    _serial: MutexGuard<'static, ()>,
}

impl TestApp {
    async fn start() -> Self {
        let serial = DB_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = tracing_subscriber::fmt()
            .with_env_filter("hotelhub_server=debug")
            .with_test_writer()
            .try_init();

        let url = std::env::var("DB_CONNECTION_STRING").expect("DB_CONNECTION_STRING not set");
        let pool = create_pool(&url).await.expect("connect");
        migrations::run(&pool).await.expect("migrations");

        let uploads = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            upload_dir: uploads.path().to_path_buf(),
            ..ServerConfig::default()
        };
        let router = build_router(AppState::new(pool.clone(), &config), &config);

        Self {
            pool,
            router,
            _uploads: uploads,
            _serial: serial,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn count(&self, table: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .unwrap();
        count
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn multipart(
        &self,
        method: Method,
        uri: &str,
        parts: &[(&str, Option<&str>, &str)],
    ) -> (StatusCode, Value) {
        let mut body = String::new();
        for (name, filename, value) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: image/png\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }
}

fn unique_email() -> String {
    format!("guest-{}@example.com", Uuid::new_v4().simple())
}

async fn seed_occasion(pool: &PgPool) -> i32 {
    let occasion = NewOccasion::new(
        "Anniversary",
        "Celebrate together",
        "Dinner for two with a view",
        OccasionPricing::new(300.0, 250.0, 400.0).unwrap(),
        &["romantic".to_owned()],
    )
    .unwrap();
    OccasionRepo::new(pool).create(&occasion, &[]).await.unwrap()
}

async fn seed_display(pool: &PgPool, occasion_id: i32) -> i32 {
    let request: MenuDisplayRequest = serde_json::from_value(json!({
        "occasion_id": occasion_id,
        "title": "Anniversary menu",
        "packages": [
            {"name": "Silver", "subpackages": [{"name": "Veg", "price": 40.0}]},
            {"name": "Gold", "subpackages": [
                {"name": "Veg", "price": 60.0},
                {"name": "Non-veg", "price": 75.0}
            ]}
        ]
    }))
    .unwrap();
    MenuDisplayRepo::new(pool)
        .create(&request.validate().unwrap())
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn signup_then_login() {
    let app = TestApp::start().await;
    let email = unique_email();

    let (status, body) = app
        .json(
            Method::POST,
            "/users/signup/",
            json!({"email": email, "username": "ann", "password": "s3cret pass"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let user_id = body["user_id"].as_str().unwrap().to_owned();

    let (status, body) = app
        .json(
            Method::POST,
            "/users/login/",
            json!({"email": email, "password": "s3cret pass"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["user_id"], user_id.as_str());
    assert_eq!(body["user"]["username"], "ann");
    assert!(body["user"].get("password").is_none());

    let (status, body) = app
        .json(
            Method::POST,
            "/users/login/",
            json!({"email": email, "password": "s3cret pas"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_signup_is_rejected() {
    let app = TestApp::start().await;
    let email = unique_email();

    let (status, _) = app
        .json(
            Method::POST,
            "/users/signup/",
            json!({"email": email, "username": "ann", "password": "pw"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let users_before = app.count("users").await;

    let (status, body) = app
        .json(
            Method::POST,
            "/users/signup/",
            json!({"email": email, "username": "someone else", "password": "another pw"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["message"], "Email is already registered.");
    assert_eq!(app.count("users").await, users_before);
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_email_cannot_log_in() {
    let app = TestApp::start().await;
    let (status, body) = app
        .json(
            Method::POST,
            "/users/login/",
            json!({"email": unique_email(), "password": "pw"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password.");
}

#[tokio::test]
#[ignore = "requires database"]
async fn booking_is_stored_in_utc() {
    let app = TestApp::start().await;
    let user_id = Uuid::new_v4().to_string();

    let (status, body) = app
        .json(
            Method::POST,
            "/bookings/book-table/",
            json!({
                "user_id": user_id,
                "name": "Ann",
                "email": "ann@example.com",
                "phone_no": "555-0100",
                "datetime": "2025-06-01T21:00:00+02:00",
                "no_of_people": 4,
                "special_request": ""
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let booking_id = body["booking_id"].as_i64().unwrap();

    let (status, body) = app
        .get(&format!("/bookings/get-bookings/{user_id}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    let bookings = body["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["id"].as_i64(), Some(booking_id));
    assert_eq!(bookings[0]["datetime"], "2025-06-01T19:00:00+00:00");
    assert_eq!(bookings[0]["special_request"], Value::Null);

    let (status, _) = app
        .delete(&format!("/admin/delete-booking/{booking_id}/"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .get(&format!("/bookings/get-bookings/{user_id}"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No bookings found for this user.");
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleting_missing_rows_is_not_found() {
    let app = TestApp::start().await;
    let missing = i32::MAX;

    let service_id = ServiceRepo::new(&app.pool)
        .create(
            &NewService::new("Valet", "Parking at the door").unwrap(),
            "uploaded_images/valet.png",
        )
        .await
        .unwrap();

    let tables = [
        ("services", "delete-service"),
        ("team_members", "delete-team-member"),
        ("events", "delete-event"),
        ("bookings", "delete-booking"),
        ("contact_us", "delete-contact"),
        ("occasions", "delete-occasion"),
        ("dishes", "delete-dish"),
        ("menu_headings", "delete-menu"),
        ("menu_displays", "delete-menu-display"),
    ];

    for (table, action) in tables {
        let before = app.count(table).await;
        let uri = format!("/admin/{action}/{missing}/");

        let (status, body) = app.delete(&uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}: {body}");
        assert_eq!(app.count(table).await, before, "{table} changed");
    }

    assert!(app.count("services").await >= 1);
    ServiceRepo::new(&app.pool).delete(service_id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn partial_update_touches_only_supplied_fields() {
    let app = TestApp::start().await;
    let repo = ServiceRepo::new(&app.pool);
    let service = NewService::new("Catering", "Full-service catering").unwrap();
    let id = repo.create(&service, "uploaded_images/catering.png").await.unwrap();

    let find = |services: Vec<hotelhub_server::db::repos::Service>| {
        services.into_iter().find(|s| s.id == id).unwrap()
    };

    let (status, _) = app
        .multipart(
            Method::PATCH,
            &format!("/admin/update-service/{id}/"),
            &[("description", None, "   ")],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let unchanged = find(repo.list_all().await.unwrap());
    assert_eq!(unchanged.name, "Catering");
    assert_eq!(unchanged.description, "Full-service catering");

    let (status, _) = app
        .multipart(
            Method::PATCH,
            &format!("/admin/update-service/{id}/"),
            &[("name", None, "Banquets")],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let updated = find(repo.list_all().await.unwrap());
    assert_eq!(updated.name, "Banquets");
    assert_eq!(updated.description, "Full-service catering");
    assert_eq!(updated.image_path, "uploaded_images/catering.png");

    repo.delete(id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn uploads_are_stored_and_served() {
    let app = TestApp::start().await;
    let filename = format!("{}.png", Uuid::new_v4().simple());

    let (status, body) = app
        .multipart(
            Method::POST,
            "/admin/add-event/",
            &[
                ("name", None, "Jazz night"),
                ("description", None, "Live trio"),
                ("price", None, "25"),
                ("image", Some(filename.as_str()), "not really a png"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let id = body["id"].as_i64().unwrap();

    let (status, body) = app.get("/admin/get-all-events/").await;
    assert_eq!(status, StatusCode::OK);
    let event = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"].as_i64() == Some(id))
        .cloned()
        .unwrap();
    assert!(event["pic_path"].as_str().unwrap().ends_with(&filename));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/uploaded_images/{filename}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"not really a png");

    let (status, _) = app.delete(&format!("/admin/delete-event/{id}/")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn menu_headings_carry_their_dishes() {
    let app = TestApp::start().await;

    let (status, body) = app
        .multipart(
            Method::POST,
            "/admin/add-menu/",
            &[
                ("heading", None, "Starters"),
                ("heading_image", Some("starters.png"), "png"),
                ("dish_names", None, "Samosa"),
                ("dish_images", Some("samosa.png"), "png"),
                ("dish_names", None, "Pakora"),
                ("dish_images", Some("pakora.png"), "png"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let heading_id = body["id"].as_i64().unwrap();

    let (status, _) = app
        .multipart(
            Method::POST,
            &format!("/admin/add-dish/{heading_id}/"),
            &[("name", None, "Chaat"), ("image", Some("chaat.png"), "png")],
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/admin/get-all-menus/").await;
    assert_eq!(status, StatusCode::OK);
    let menu = body["menus"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["id"].as_i64() == Some(heading_id))
        .cloned()
        .unwrap();
    let dishes: Vec<&str> = menu["dishes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(dishes, ["Samosa", "Pakora", "Chaat"]);

    let (status, body) = app
        .delete(&format!("/admin/delete-menu/{heading_id}/"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dishes_deleted"], 3);
}

#[tokio::test]
#[ignore = "requires database"]
async fn menu_display_is_unique_per_occasion() {
    let app = TestApp::start().await;
    let occasion_id = seed_occasion(&app.pool).await;

    let (status, body) = app
        .json(
            Method::POST,
            "/admin/add-menu-display/",
            json!({
                "occasion_id": occasion_id,
                "title": "Anniversary menu",
                "packages": [
                    {"name": "Silver", "subpackages": [{"name": "Veg", "price": 40.0}]},
                    {"name": "Gold", "subpackages": [{"name": "Non-veg", "price": 75.0}]}
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["id"].as_i64().is_some());

    let (status, body) = app
        .json(
            Method::POST,
            "/admin/add-menu-display/",
            json!({
                "occasion_id": occasion_id,
                "title": "Second menu",
                "packages": [{"name": "Bronze", "subpackages": []}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");

    let (status, body) = app
        .get(&format!("/admin/get-menu-display/{occasion_id}/"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Anniversary menu");
    assert_eq!(body["packages"].as_array().unwrap().len(), 2);

    let (status, _) = app
        .json(
            Method::POST,
            "/admin/add-menu-display/",
            json!({
                "occasion_id": i32::MAX,
                "title": "Orphan",
                "packages": [{"name": "Bronze"}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    OccasionRepo::new(&app.pool).delete(occasion_id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn cascade_delete_rolls_back_on_failure() {
    let app = TestApp::start().await;
    let occasion_id = seed_occasion(&app.pool).await;
    seed_display(&app.pool, occasion_id).await;

    let mut tx = app.pool.begin().await.unwrap();
    let report = delete_cascade(&mut tx, occasion_id).await.unwrap();
    assert_eq!(report.subpackages, 3);
    let failure = sqlx::query("SELECT 1 / 0").execute(&mut *tx).await;
    assert!(failure.is_err());
    tx.rollback().await.unwrap();

    let display = MenuDisplayRepo::new(&app.pool).get(occasion_id).await.unwrap();
    let subpackages: usize = display.packages.iter().map(|p| p.subpackages.len()).sum();
    assert_eq!(display.packages.len(), 2);
    assert_eq!(subpackages, 3);

    let (status, body) = app
        .delete(&format!("/admin/delete-menu-display/{occasion_id}/"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"]["subpackages"], 3);
    assert_eq!(body["deleted"]["packages"], 2);
    assert_eq!(body["deleted"]["displays"], 1);

    let (status, _) = app
        .get(&format!("/admin/get-menu-display/{occasion_id}/"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .get(&format!("/admin/get-occasion/{occasion_id}/"))
        .await;
    assert_eq!(status, StatusCode::OK);

    OccasionRepo::new(&app.pool).delete(occasion_id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleting_occasion_removes_its_display() {
    let app = TestApp::start().await;
    let occasion_id = seed_occasion(&app.pool).await;
    seed_display(&app.pool, occasion_id).await;

    let (status, _) = app
        .delete(&format!("/admin/delete-occasion/{occasion_id}/"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .get(&format!("/admin/get-menu-display/{occasion_id}/"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn occasion_update_replaces_tags() {
    let app = TestApp::start().await;
    let occasion_id = seed_occasion(&app.pool).await;

    let (status, _) = app
        .multipart(
            Method::PATCH,
            &format!("/admin/update-occasion/{occasion_id}/"),
            &[
                ("tags", None, "family"),
                ("tags", None, "outdoor"),
                ("tags", None, "family"),
                ("price", None, "320"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .get(&format!("/admin/get-occasion/{occasion_id}/"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tags"], json!(["family", "outdoor"]));
    assert_eq!(body["price"], 320.0);
    assert_eq!(body["standard_price"], 250.0);
    assert_eq!(body["name"], "Anniversary");

    OccasionRepo::new(&app.pool).delete(occasion_id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn contact_message_reaches_admin_inbox() {
    let app = TestApp::start().await;
    let subject = format!("Private dining {}", Uuid::new_v4());

    let (status, body) = app
        .json(
            Method::POST,
            "/contact-us/",
            json!({
                "name": "Ann",
                "email": "ann@example.com",
                "subject": subject,
                "message": "Do you host parties of 30?"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Thank you for reaching out to us. We will get back to you soon!"
    );

    let (status, body) = app.get("/admin/get-all-contacts/").await;
    assert_eq!(status, StatusCode::OK);
    let stored = body["contacts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["subject"] == subject.as_str())
        .cloned()
        .unwrap();

    let id = stored["id"].as_i64().unwrap();
    let (status, _) = app.delete(&format!("/admin/delete-contact/{id}/")).await;
    assert_eq!(status, StatusCode::OK);
}
