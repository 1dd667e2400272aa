use crate::db::notifications;
use crate::tests::utils::{body_string, get, post_form, sign_up, test_app, try_post_form};

fn student_id(app: &crate::router::App, email: &str) -> i64 {
    app.db
        .with_conn(|conn| {
            conn.query_row("select id from users where email = ?", [email], |r| r.get(0))
                .map_err(|e| crate::errors::ServerError::DbError(e.to_string()))
        })
        .unwrap()
}

#[test]
fn signup_creates_welcome_notification() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "s@example.com", "student");

    let body = body_string(get(&app, "/student/notifications", Some(&key)));
    assert!(body.contains("Welcome aboard"));
    assert!(body.contains("Unread (1)"));
    assert!(body.contains("welcome (1)"));
}

#[test]
fn filter_search_and_read_state() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "s@example.com", "student");
    let id = student_id(&app, "s@example.com");

    let booking = app
        .db
        .with_conn(|conn| notifications::insert(conn, id, "booking", "Booking confirmed", "Room 12 is yours", 10))
        .unwrap();

    let body = body_string(get(&app, "/student/notifications?kind=booking", Some(&key)));
    assert!(body.contains("Booking confirmed"));
    assert!(!body.contains("Welcome aboard"));

    let body = body_string(get(&app, "/student/notifications?q=room+12", Some(&key)));
    assert!(body.contains("Booking confirmed"));
    assert!(!body.contains("Welcome aboard"));

    post_form(&app, &format!("/student/notifications/{booking}/read"), "", Some(&key));
    let body = body_string(get(&app, "/student/notifications?kind=unread", Some(&key)));
    assert!(!body.contains("Booking confirmed"));
    assert!(body.contains("Welcome aboard"));

    post_form(&app, "/student/notifications/read-all", "", Some(&key));
    let body = body_string(get(&app, "/student/notifications", Some(&key)));
    assert!(body.contains("Unread (0)"));
}

#[test]
fn delete_and_clear() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "s@example.com", "student");
    let other = sign_up(&app, "other@example.com", "student");
    let id = student_id(&app, "s@example.com");

    let n = app
        .db
        .with_conn(|conn| notifications::insert(conn, id, "system", "Maintenance", "Water off at 9", 10))
        .unwrap();

    assert!(matches!(
        try_post_form(&app, &format!("/student/notifications/{n}/delete"), "", Some(&other)),
        Err(crate::errors::ServerError::NotFound)
    ));

    post_form(&app, &format!("/student/notifications/{n}/delete"), "", Some(&key));
    let body = body_string(get(&app, "/student/notifications", Some(&key)));
    assert!(!body.contains("Maintenance"));
    assert!(body.contains("Welcome aboard"));

    post_form(&app, "/student/notifications/clear", "", Some(&key));
    let body = body_string(get(&app, "/student/notifications", Some(&key)));
    assert!(body.contains("No notifications found."));
}
