use crate::tests::utils::{body_string, get, location, post_form, sign_up, test_app};

#[test]
fn profile_page_shows_current_details() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "s@example.com", "student");

    let resp = get(&app, "/student/profile", Some(&key));
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains(r#"value="Ayesha""#));
    assert!(body.contains(r#"action="/student/profile/password""#));
}

#[test]
fn renaming_updates_the_signed_in_profile() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "o@example.com", "owner");

    let resp = post_form(&app, "/owner/profile", "first_name=Sara&last_name=Iqbal", Some(&key));
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/owner/profile?updated=profile");

    let body = body_string(get(&app, "/owner/profile?updated=profile", Some(&key)));
    assert!(body.contains("Profile saved."));
    assert!(body.contains(r#"value="Sara""#));
    assert!(body.contains(r#"title="Sara Iqbal""#));

    let resp = post_form(&app, "/owner/profile", "first_name=+&last_name=Iqbal", Some(&key));
    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("first name is required"));
}

#[test]
fn password_change_requires_the_current_password() {
    let (_dir, app) = test_app();
    let key = sign_up(&app, "s@example.com", "student");

    let resp = post_form(
        &app,
        "/student/profile/password",
        "current_password=wrongwrong&new_password=freshpassword",
        Some(&key),
    );
    assert_eq!(resp.status(), 401);
    assert!(body_string(resp).contains("current password is incorrect"));

    let resp = post_form(
        &app,
        "/student/profile/password",
        "current_password=hunter2hunter2&new_password=freshpassword",
        Some(&key),
    );
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/student/profile?updated=password");

    let old = post_form(&app, "/auth/login", "email=s@example.com&password=hunter2hunter2", None);
    assert_eq!(old.status(), 401);
    let new = post_form(&app, "/auth/login", "email=s@example.com&password=freshpassword", None);
    assert_eq!(new.status(), 302);
    assert_eq!(location(&new), "/student/dashboard");
}

#[test]
fn profile_pages_follow_the_role_gate() {
    let (_dir, app) = test_app();
    let owner = sign_up(&app, "o@example.com", "owner");

    let resp = get(&app, "/student/profile", Some(&owner));
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");

    let resp = get(&app, "/owner/profile", None);
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");
}
