use crate::tests::utils::{body_string, get, location, post_form, sign_up, test_app};

#[test]
fn protected_pages_redirect_anonymous_visitors_to_login() {
    let (_dir, app) = test_app();

    for path in ["/student/dashboard", "/student/wishlist", "/owner/dashboard"] {
        let resp = get(&app, path, None);
        assert_eq!(resp.status(), 302, "{path}");
        assert_eq!(location(&resp), "/login");
    }
}

#[test]
fn unknown_session_cookie_counts_as_anonymous() {
    let (_dir, app) = test_app();
    let resp = get(&app, "/student/dashboard", Some("never-issued"));
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");

    assert_eq!(get(&app, "/login", Some("never-issued")).status(), 200);
}

#[test]
fn wrong_role_is_sent_to_neutral_page() {
    let (_dir, app) = test_app();
    let student = sign_up(&app, "s@example.com", "student");
    let owner = sign_up(&app, "o@example.com", "owner");

    let resp = get(&app, "/owner/dashboard", Some(&student));
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");

    let resp = get(&app, "/student/notifications", Some(&owner));
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");
}

#[test]
fn public_pages_render_for_everyone() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "s@example.com", "student");

    let anon = get(&app, "/", None);
    assert_eq!(anon.status(), 200);
    assert!(body_string(anon).contains("Sign up"));

    let signed_in = body_string(get(&app, "/", Some(&key)));
    assert!(signed_in.contains("Log out"));
    assert!(signed_in.contains("/student/wishlist"));
}

#[test]
fn unknown_route_is_not_found() {
    let (_dir, app) = test_app();
    let req = http::Request::builder()
        .uri("/nope")
        .body(astra::Body::empty())
        .unwrap();
    assert!(matches!(
        crate::router::handle(req, &app),
        Err(crate::errors::ServerError::NotFound)
    ));
}

#[test]
fn extra_slashes_get_the_same_role_check() {
    let (_dir, app) = test_app();
    let student = sign_up(&app, "s@example.com", "student");
    let owner = sign_up(&app, "o@example.com", "owner");

    let resp = post_form(&app, "/hostels/1/reviews/", "rating=1&comment=Sneaky", Some(&owner));
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");
    assert!(!body_string(get(&app, "/hostels/1", None)).contains("Sneaky"));

    let form = "name=Fake&location=Lahore&price=1000";
    let resp = post_form(&app, "//owner/hostels", form, Some(&student));
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");
    assert!(!body_string(get(&app, "/hostels", None)).contains("Fake"));

    let resp = get(&app, "//owner/dashboard", Some(&student));
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");

    let resp = get(&app, "/student//dashboard/", None);
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");
}
