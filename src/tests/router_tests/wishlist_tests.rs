use crate::tests::utils::{body_string, get, location, post_form, sign_up, test_app, try_post_form};

#[test]
fn save_and_remove_wishlist_entries() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "s@example.com", "student");

    let empty = body_string(get(&app, "/student/wishlist", Some(&key)));
    assert!(empty.contains("No saved hostels yet."));

    let resp = post_form(&app, "/student/wishlist/3", "", Some(&key));
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/student/wishlist");
    post_form(&app, "/student/wishlist/1", "", Some(&key));

    let body = body_string(get(&app, "/student/wishlist", Some(&key)));
    assert!(body.contains("2 saved hostels"));
    assert!(body.contains("Mountain Retreat Hostel"));
    assert!(body.contains("City Backpackers Hostel"));

    post_form(&app, "/student/wishlist/3/remove", "", Some(&key));
    let body = body_string(get(&app, "/student/wishlist", Some(&key)));
    assert!(body.contains("1 saved hostels"));
    assert!(!body.contains("Mountain Retreat Hostel"));
}

#[test]
fn saving_returns_to_referring_page() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "s@example.com", "student");

    let req = http::Request::builder()
        .method(http::Method::POST)
        .uri("/student/wishlist/2")
        .header("Cookie", format!("session={key}"))
        .header("Referer", "http://127.0.0.1:3000/hostels?location=Karachi")
        .body(astra::Body::empty())
        .unwrap();
    let resp = crate::router::handle(req, &app).unwrap();
    assert_eq!(location(&resp), "/hostels?location=Karachi");

    let search = body_string(get(&app, "/hostels?location=Karachi", Some(&key)));
    assert!(search.contains("Remove from wishlist"));
}

#[test]
fn saving_unknown_hostel_is_not_found() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "s@example.com", "student");
    assert!(matches!(
        try_post_form(&app, "/student/wishlist/999", "", Some(&key)),
        Err(crate::errors::ServerError::NotFound)
    ));
}

#[test]
fn student_review_updates_hostel_page() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "s@example.com", "student");

    let before = body_string(get(&app, "/hostels/1", Some(&key)));
    assert!(before.contains("Write a review"));

    let resp = post_form(&app, "/hostels/1/reviews", "rating=5&comment=Great+staff", Some(&key));
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/hostels/1#reviews");

    let after = body_string(get(&app, "/hostels/1", Some(&key)));
    assert!(after.contains("Great staff"));
    assert!(after.contains("Ayesha Khan"));
    assert!(!after.contains("Write a review"));

    assert!(matches!(
        try_post_form(&app, "/hostels/1/reviews", "rating=4&comment=Again", Some(&key)),
        Err(crate::errors::ServerError::Conflict(_))
    ));
    assert!(matches!(
        try_post_form(&app, "/hostels/2/reviews", "rating=9&comment=Too+many", Some(&key)),
        Err(crate::errors::ServerError::BadRequest(_))
    ));
}

#[test]
fn anonymous_review_is_sent_to_login() {
    let (_dir, app) = test_app();
    let resp = post_form(&app, "/hostels/1/reviews", "rating=5&comment=Hi", None);
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");
}

#[test]
fn referer_with_doubled_slash_falls_back_to_wishlist() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "s@example.com", "student");

    let req = http::Request::builder()
        .method(http::Method::POST)
        .uri("/student/wishlist/1")
        .header("Cookie", format!("session={key}"))
        .header("Referer", "http://localhost//evil.example/phish")
        .body(astra::Body::empty())
        .unwrap();
    let resp = crate::router::handle(req, &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/student/wishlist");
}
