use crate::tests::utils::{body_string, get, location, post_form, sign_up, test_app, try_post_form};

#[test]
fn owner_lists_hostel_and_sees_stats() {
    let (_dir, app) = test_app();
    let owner = sign_up(&app, "o@example.com", "owner");
    let student = sign_up(&app, "s@example.com", "student");

    let empty = body_string(get(&app, "/owner/dashboard", Some(&owner)));
    assert!(empty.contains("You have not listed any hostels yet."));

    let resp = post_form(
        &app,
        "/owner/hostels",
        "name=Sunrise+Residency&location=Lahore%2C+Pakistan&price=12000&room_type=Private+Room&amenities=WiFi%2C+Kitchen&description=Near+campus",
        Some(&owner),
    );
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/owner/dashboard");

    // New hostel is id 5, after the four seeded ones.
    let search = body_string(get(&app, "/hostels?location=lahore&amenity=Kitchen", None));
    assert!(search.contains("Sunrise Residency"));

    post_form(&app, "/student/wishlist/5", "", Some(&student));
    post_form(&app, "/hostels/5/reviews", "rating=4&comment=Quiet", Some(&student));

    let dashboard = body_string(get(&app, "/owner/dashboard", Some(&owner)));
    assert!(dashboard.contains("Sunrise Residency"));
    assert!(dashboard.contains("PKR 12,000"));
    assert!(dashboard.contains("4.0"));
}

#[test]
fn owner_is_notified_of_reviews() {
    let (_dir, app) = test_app();
    let owner = sign_up(&app, "o@example.com", "owner");
    let student = sign_up(&app, "s@example.com", "student");

    post_form(&app, "/owner/hostels", "name=Sunrise&location=Lahore&price=9000", Some(&owner));
    post_form(&app, "/hostels/5/reviews", "rating=2&comment=Noisy", Some(&student));

    let count: i64 = app
        .db
        .with_conn(|conn| {
            conn.query_row(
                "select count(*) from notifications n join users u on u.id = n.user_id where u.email = 'o@example.com' and n.kind = 'new_review'",
                [],
                |r| r.get(0),
            )
            .map_err(|e| crate::errors::ServerError::DbError(e.to_string()))
        })
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn invalid_hostel_form_is_bad_request() {
    let (_dir, app) = test_app();
    let owner = sign_up(&app, "o@example.com", "owner");
    assert!(matches!(
        try_post_form(&app, "/owner/hostels", "name=&location=Lahore&price=100", Some(&owner)),
        Err(crate::errors::ServerError::BadRequest(_))
    ));
}
