use rocket::http::{Header, Status};
use rocket::local::asynchronous::Client;
use rocket::routes;
use serde_json::json;
use storefront_api::auth::passwords::PasswordService;
use storefront_api::auth::responses::{DashboardStats, LoginData, Role};
use storefront_api::models::{ApiResponse, MessageResponse};
use storefront_api::test_support::{
    TestDatabase, TestFixtures, TestRocketBuilder, test_auth_state,
};

const ADMIN_EMAIL: &str = "root@shop.test";
const ADMIN_PASSWORD: &str = "admin-password";

async fn admin_client(db: &TestDatabase) -> Client {
    TestRocketBuilder::new()
        .manage_auth_state(test_auth_state(db.pool_clone()))
        .mount(
            "/api",
            routes![
                storefront_api::auth::routes::register,
                storefront_api::auth::routes::login,
                storefront_api::routes::users::user_details,
            ],
        )
        .mount(
            "/admin",
            routes![
                storefront_api::auth::routes::admin_login,
                storefront_api::auth::routes::admin_forgot_password,
                storefront_api::routes::admin::dashboard,
                storefront_api::routes::admin::update_user,
                storefront_api::routes::admin::delete_user,
            ],
        )
        .async_client()
        .await
}

async fn seed_admin(db: &TestDatabase) -> i32 {
    let digest = PasswordService::new().digest(ADMIN_PASSWORD);
    TestFixtures::new(db.pool())
        .insert_account(ADMIN_EMAIL, &digest, "admin")
        .await
        .expect("seed admin account")
}

fn bearer(token: &str) -> Header<'static> {
    Header::new("Authorization", format!("Bearer {token}"))
}

async fn login_at(client: &Client, path: &str, email: &str, password: &str) -> LoginData {
    let body: ApiResponse<LoginData> = client
        .post(path.to_string())
        .json(&json!({"email": email, "password": password}))
        .dispatch()
        .await
        .into_json()
        .await
        .expect("login payload");
    body.data.expect("login data")
}

async fn register_user(client: &Client, email: &str, password: &str) {
    let response = client
        .post("/api/auth/register")
        .json(&json!({"email": email, "password": password, "termsAccepted": true}))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);
}

#[tokio::test]
async fn admin_login_rejects_non_admin_accounts() {
    let test_db = TestDatabase::new().await.expect("test database");
    seed_admin(&test_db).await;
    let client = admin_client(&test_db).await;

    register_user(&client, "bob@y.com", "pw123456").await;

    let rejected = client
        .post("/admin/login")
        .json(&json!({"email": "bob@y.com", "password": "pw123456"}))
        .dispatch()
        .await;
    assert_eq!(rejected.status(), Status::BadRequest);
    let body: ApiResponse<LoginData> = rejected.into_json().await.expect("error payload");
    assert_eq!(body.message, "Invalid Credentials");

    let admin = login_at(&client, "/admin/login", ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(admin.role, Role::Admin);
    assert!(!admin.token.is_empty());

    drop(client);
    test_db.close().await.expect("drop test database");
}

#[tokio::test]
async fn dashboard_distinguishes_unauthenticated_from_forbidden() {
    let test_db = TestDatabase::new().await.expect("test database");
    seed_admin(&test_db).await;
    let client = admin_client(&test_db).await;

    register_user(&client, "bob@y.com", "pw123456").await;
    let user = login_at(&client, "/api/auth/login", "bob@y.com", "pw123456").await;
    assert_eq!(user.role, Role::User);

    // No token at all: not authenticated.
    let missing = client.get("/admin/dashboard").dispatch().await;
    assert_eq!(missing.status(), Status::Unauthorized);
    let body: MessageResponse = missing.into_json().await.expect("message payload");
    assert_eq!(body.message, "No token, authorization denied");

    // Valid token, wrong role: authenticated but forbidden.
    let forbidden = client
        .get("/admin/dashboard")
        .header(bearer(&user.token))
        .dispatch()
        .await;
    assert_eq!(forbidden.status(), Status::Forbidden);
    let body: MessageResponse = forbidden.into_json().await.expect("message payload");
    assert_eq!(body.message, "Access denied. Admins only.");

    let admin = login_at(&client, "/admin/login", ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let allowed = client
        .get("/admin/dashboard")
        .header(bearer(&admin.token))
        .dispatch()
        .await;
    assert_eq!(allowed.status(), Status::Ok);
    let body: ApiResponse<DashboardStats> = allowed.into_json().await.expect("stats payload");
    assert_eq!(body.message, "Dashboard stats fetched successfully");
    assert_eq!(body.data.expect("stats").total_users, 1);

    drop(client);
    test_db.close().await.expect("drop test database");
}

#[tokio::test]
async fn updating_a_password_recomputes_the_stored_digest() {
    let test_db = TestDatabase::new().await.expect("test database");
    let pool = test_db.pool_clone();
    seed_admin(&test_db).await;
    let client = admin_client(&test_db).await;

    register_user(&client, "bob@y.com", "pw123456").await;
    let user = login_at(&client, "/api/auth/login", "bob@y.com", "pw123456").await;
    let admin = login_at(&client, "/admin/login", ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = client
        .put(format!("/admin/users/{}", user.id))
        .header(bearer(&admin.token))
        .json(&json!({"password": "new-password"}))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: ApiResponse<()> = response.into_json().await.expect("update payload");
    assert_eq!(body.message, "User updated successfully");

    let stored = TestFixtures::new(&pool)
        .password_digest(user.id)
        .await
        .expect("stored digest");
    assert_eq!(stored, PasswordService::new().digest("new-password"));

    let stale = client
        .post("/api/auth/login")
        .json(&json!({"email": "bob@y.com", "password": "pw123456"}))
        .dispatch()
        .await;
    assert_eq!(stale.status(), Status::BadRequest);

    let fresh = login_at(&client, "/api/auth/login", "bob@y.com", "new-password").await;
    assert_eq!(fresh.id, user.id);

    drop(stale);
    drop(client);
    test_db.close().await.expect("drop test database");
}

#[tokio::test]
async fn deleting_a_user_leaves_their_token_orphaned() {
    let test_db = TestDatabase::new().await.expect("test database");
    seed_admin(&test_db).await;
    let client = admin_client(&test_db).await;

    register_user(&client, "bob@y.com", "pw123456").await;
    let user = login_at(&client, "/api/auth/login", "bob@y.com", "pw123456").await;
    let admin = login_at(&client, "/admin/login", ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = client
        .delete(format!("/admin/users/{}", user.id))
        .header(bearer(&admin.token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: ApiResponse<()> = response.into_json().await.expect("delete payload");
    assert_eq!(body.message, "User deleted successfully");

    let again = client
        .delete(format!("/admin/users/{}", user.id))
        .header(bearer(&admin.token))
        .dispatch()
        .await;
    assert_eq!(again.status(), Status::NotFound);
    let body: ApiResponse<()> = again.into_json().await.expect("error payload");
    assert_eq!(body.message, "User not found");

    // The token still verifies (nothing revokes it), but the row is gone.
    let details = client
        .get("/api/user/details")
        .header(bearer(&user.token))
        .dispatch()
        .await;
    assert_eq!(details.status(), Status::NotFound);

    drop(details);
    drop(client);
    test_db.close().await.expect("drop test database");
}

#[tokio::test]
async fn forgot_password_only_acknowledges_admin_accounts() {
    let test_db = TestDatabase::new().await.expect("test database");
    seed_admin(&test_db).await;
    let client = admin_client(&test_db).await;

    register_user(&client, "bob@y.com", "pw123456").await;

    let acknowledged = client
        .post("/admin/forgot-password")
        .json(&json!({"email": ADMIN_EMAIL}))
        .dispatch()
        .await;
    assert_eq!(acknowledged.status(), Status::Ok);
    let body: ApiResponse<()> = acknowledged.into_json().await.expect("payload");
    assert_eq!(body.message, "Password reset link sent successfully");

    let unknown = client
        .post("/admin/forgot-password")
        .json(&json!({"email": "bob@y.com"}))
        .dispatch()
        .await;
    assert_eq!(unknown.status(), Status::BadRequest);
    let body: ApiResponse<()> = unknown.into_json().await.expect("payload");
    assert_eq!(body.message, "Admin not found");

    drop(client);
    test_db.close().await.expect("drop test database");
}
