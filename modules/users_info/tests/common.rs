#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use db::{ConnectOpts, Database};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use users_info::api::rest::register_routes;
use users_info::domain::service::Service;
use users_info::infra::storage::{ensure_users_table, SqliteUsersRepository};

/// A database file in its own temp dir; the dir is removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pub db: Database,
}

pub async fn test_db() -> TestDb {
    let dir = TempDir::new().expect("temp dir");
    let dsn = format!("sqlite://{}", dir.path().join("users.db").display());
    let db = Database::open(&dsn, ConnectOpts::default()).expect("open database");
    ensure_users_table(&db).await.expect("create users table");
    TestDb { _dir: dir, db }
}

pub fn service_for(db: &Database) -> Arc<Service> {
    Arc::new(Service::new(Arc::new(SqliteUsersRepository::new(db.clone()))))
}

pub fn router_for(service: Arc<Service>) -> Router {
    register_routes(Router::new(), service)
}

pub async fn count_rows(db: &Database) -> i64 {
    let mut conn = db.acquire().await.expect("acquire");
    let n = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&mut *conn)
        .await
        .expect("count");
    conn.release().await.expect("release");
    n
}

/// Send one request through the router and decode the JSON reply.
pub async fn send(router: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
