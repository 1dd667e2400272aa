use crate::tests::utils::{body_string, get, test_app};

fn names_in(body: &str) -> Vec<&'static str> {
    [
        "City Backpackers Hostel",
        "Beach View Hostel",
        "Mountain Retreat Hostel",
        "Downtown Business Hostel",
    ]
    .into_iter()
    .filter(|name| body.contains(name))
    .collect()
}

#[test]
fn unfiltered_search_lists_whole_catalog() {
    let (_dir, app) = test_app();
    let body = body_string(get(&app, "/hostels", None));
    assert_eq!(names_in(&body).len(), 4);
    assert!(body.contains("Showing <strong>4</strong> of 4 hostels"));
}

#[test]
fn location_and_price_range_narrow_results() {
    let (_dir, app) = test_app();

    let body = body_string(get(&app, "/hostels?location=lahore", None));
    assert_eq!(names_in(&body), vec!["City Backpackers Hostel", "Downtown Business Hostel"]);

    let body = body_string(get(&app, "/hostels?min_price=16000&max_price=18000", None));
    assert_eq!(names_in(&body), vec!["Mountain Retreat Hostel", "Downtown Business Hostel"]);
}

#[test]
fn amenity_rating_and_verified_filters_combine() {
    let (_dir, app) = test_app();

    let body = body_string(get(&app, "/hostels?amenity=Kitchen&amenity=Garden", None));
    assert_eq!(names_in(&body), vec!["Mountain Retreat Hostel"]);

    let body = body_string(get(&app, "/hostels?min_rating=4.6", None));
    assert_eq!(names_in(&body), vec!["Beach View Hostel", "Downtown Business Hostel"]);

    let body = body_string(get(&app, "/hostels?verified=1&room_type=Shared+Dormitory", None));
    assert_eq!(names_in(&body), vec!["City Backpackers Hostel", "Mountain Retreat Hostel"]);
}

#[test]
fn no_match_shows_empty_state() {
    let (_dir, app) = test_app();
    let body = body_string(get(&app, "/hostels?location=Quetta", None));
    assert!(names_in(&body).is_empty());
    assert!(body.contains("No hostels match your filters"));
}

#[test]
fn sort_by_price_orders_cards() {
    let (_dir, app) = test_app();
    let body = body_string(get(&app, "/hostels?sort=price-high", None));

    let beach = body.find("Beach View Hostel").unwrap();
    let mountain = body.find("Mountain Retreat Hostel").unwrap();
    let city = body.find("City Backpackers Hostel").unwrap();
    assert!(beach < mountain && mountain < city);
}

#[test]
fn hostel_detail_and_missing_hostel() {
    let (_dir, app) = test_app();

    let resp = get(&app, "/hostels/2", None);
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Beach View Hostel"));
    assert!(body.contains("Beach Access"));
    assert!(body.contains("No reviews yet."));

    let req = http::Request::builder()
        .uri("/hostels/999")
        .body(astra::Body::empty())
        .unwrap();
    assert!(matches!(
        crate::router::handle(req, &app),
        Err(crate::errors::ServerError::NotFound)
    ));
}

#[test]
fn radius_search_keeps_hostels_near_the_origin() {
    let (_dir, app) = test_app();

    let body = body_string(get(&app, "/hostels?lat=31.5204&lng=74.3587&radius=10", None));
    assert_eq!(names_in(&body), vec!["City Backpackers Hostel", "Downtown Business Hostel"]);

    // Islamabad is roughly 270 km from Lahore.
    let body = body_string(get(&app, "/hostels?lat=31.5204&lng=74.3587&radius=300", None));
    assert_eq!(
        names_in(&body),
        vec!["City Backpackers Hostel", "Mountain Retreat Hostel", "Downtown Business Hostel"]
    );
}
