use crate::db::connection::{init_db, Database};
use crate::db::DbCatalog;
use crate::router::{handle, App};
use astra::{Body, Response};
use http::{Method, Request};
use rusqlite::{params, Connection};
use std::io::Read;
use tempfile::TempDir;

const SCHEMA_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql");

/// In-memory connection with the production schema and seed hostels.
pub fn memory_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(include_str!("../../sql/schema.sql"))
        .unwrap();
    conn
}

/// Insert a user directly, bypassing signup. Name is always "Test User".
pub fn seed_user(conn: &Connection, email: &str, role: &str) -> i64 {
    conn.execute(
        r#"
        insert into users (email, password_hash, first_name, last_name, role, created_at)
        values (?, '$argon2id$unusable', 'Test', 'User', ?, 0)
        "#,
        params![email, role],
    )
    .unwrap();
    conn.last_insert_rowid()
}

/// Initialize a fresh on-disk test DB using the production schema.
/// Keep the `TempDir` alive for as long as the database is used.
pub fn init_test_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.sqlite3");
    let db = Database::new(path.to_string_lossy().into_owned());

    init_db(&db, SCHEMA_PATH).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    (dir, db)
}

/// App backed by a fresh test DB and the local hostel catalog.
pub fn test_app() -> (TempDir, App) {
    let (dir, db) = init_test_db();
    let app = App {
        catalog: Box::new(DbCatalog::new(db.clone())),
        db,
    };
    (dir, app)
}

pub fn get(app: &App, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(key) = cookie {
        builder = builder.header("Cookie", format!("session={key}"));
    }
    handle(builder.body(Body::empty()).unwrap(), app).expect("Failed to handle request")
}

pub fn post_form(app: &App, uri: &str, form: &str, cookie: Option<&str>) -> Response {
    try_post_form(app, uri, form, cookie).expect("Failed to handle request")
}

pub fn try_post_form(
    app: &App,
    uri: &str,
    form: &str,
    cookie: Option<&str>,
) -> crate::errors::ResultResp {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(key) = cookie {
        builder = builder.header("Cookie", format!("session={key}"));
    }
    handle(builder.body(Body::from(form.as_bytes().to_vec())).unwrap(), app)
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get("Location")
        .map(|v| v.to_str().unwrap())
        .unwrap_or("")
}

/// Session key from a `Set-Cookie: session=...` header.
pub fn session_key(resp: &Response) -> String {
    let header = resp
        .headers()
        .get("Set-Cookie")
        .expect("no Set-Cookie header")
        .to_str()
        .unwrap();
    header
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("session="))
        .expect("not a session cookie")
        .to_string()
}

/// Sign up through the router and return the new session key.
pub fn sign_up(app: &App, email: &str, role: &str) -> String {
    let form = format!(
        "email={email}&password=hunter2hunter2&first_name=Ayesha&last_name=Khan&role={role}"
    );
    let resp = post_form(app, "/auth/signup", &form, None);
    assert_eq!(resp.status(), 302, "signup should redirect");
    session_key(&resp)
}
