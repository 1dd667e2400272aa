use crate::tests::utils::{body_string, get, location, post_form, session_key, sign_up, test_app};

#[test]
fn login_page_loads_successfully() {
    let (_dir, app) = test_app();

    let resp = get(&app, "/login", None);
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Sign in"));
    assert!(body.contains("form"));
}

#[test]
fn signup_lands_on_role_dashboard_with_cookie() {
    let (_dir, app) = test_app();

    let resp = post_form(
        &app,
        "/auth/signup",
        "email=Owner%40Example.com&password=longenough&first_name=Bilal&last_name=Ahmed&role=owner",
        None,
    );
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/owner/dashboard");
    let key = session_key(&resp);

    let dashboard = get(&app, "/owner/dashboard", Some(&key));
    assert_eq!(dashboard.status(), 200);
    let body = body_string(dashboard);
    assert!(body.contains("owner@example.com"));
    assert!(body.contains("BA"), "initials in the header");
}

#[test]
fn signup_rejects_short_password_and_duplicate_email() {
    let (_dir, app) = test_app();

    let resp = post_form(
        &app,
        "/auth/signup",
        "email=a%40example.com&password=short&first_name=A&role=student",
        None,
    );
    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("at least 8 characters"));

    sign_up(&app, "dup@example.com", "student");
    let resp = post_form(
        &app,
        "/auth/signup",
        "email=dup%40example.com&password=longenough&first_name=B&role=student",
        None,
    );
    assert_eq!(resp.status(), 409);
}

#[test]
fn signup_with_unknown_role_is_rejected() {
    let (_dir, app) = test_app();
    let resp = post_form(
        &app,
        "/auth/signup",
        "email=a%40example.com&password=longenough&first_name=A&role=admin",
        None,
    );
    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("unknown role"));
}

#[test]
fn login_then_logout() {
    let (_dir, app) = test_app();
    sign_up(&app, "student@example.com", "student");

    let bad = post_form(&app, "/auth/login", "email=student%40example.com&password=wrongwrong", None);
    assert_eq!(bad.status(), 401);
    assert!(body_string(bad).contains("invalid email or password"));

    let ok = post_form(
        &app,
        "/auth/login",
        "email=student%40example.com&password=hunter2hunter2",
        None,
    );
    assert_eq!(ok.status(), 302);
    assert_eq!(location(&ok), "/student/dashboard");
    let key = session_key(&ok);
    assert_eq!(get(&app, "/student/dashboard", Some(&key)).status(), 200);

    let out = post_form(&app, "/auth/logout", "", Some(&key));
    assert_eq!(out.status(), 302);
    assert_eq!(location(&out), "/login");
    assert!(out.headers()["Set-Cookie"].to_str().unwrap().contains("Max-Age=0"));

    // The old key no longer opens protected pages.
    let after = get(&app, "/student/dashboard", Some(&key));
    assert_eq!(after.status(), 302);
    assert_eq!(location(&after), "/login");
}

#[test]
fn login_rotates_the_previous_session_key() {
    let (_dir, app) = test_app();
    let first = sign_up(&app, "s@example.com", "student");

    let resp = post_form(
        &app,
        "/auth/login",
        "email=s%40example.com&password=hunter2hunter2",
        Some(&first),
    );
    let second = session_key(&resp);
    assert_ne!(first, second);

    assert_eq!(get(&app, "/student/wishlist", Some(&first)).status(), 302);
    assert_eq!(get(&app, "/student/wishlist", Some(&second)).status(), 200);
}

#[test]
fn signed_in_users_skip_login_and_signup_pages() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "s@example.com", "student");

    for path in ["/login", "/signup"] {
        let resp = get(&app, path, Some(&key));
        assert_eq!(resp.status(), 302, "{path}");
        assert_eq!(location(&resp), "/student/dashboard");
    }
}
