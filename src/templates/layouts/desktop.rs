use crate::auth::session::SessionUser;
use maud::{html, Markup, DOCTYPE};

fn nav_links(viewer: Option<&SessionUser>) -> Markup {
    html! {
        ul {
            li { a href="/" { "Home" } }
            li { a href="/hostels" { "Find Hostels" } }
            @match viewer.and_then(|u| u.role.as_deref()) {
                Some("student") => {
                    li { a href="/student/dashboard" { "Dashboard" } }
                    li { a href="/student/wishlist" { "Wishlist" } }
                    li { a href="/student/notifications" { "Notifications" } }
                    li { a href="/student/profile" { "Profile" } }
                }
                Some("owner") => {
                    li { a href="/owner/dashboard" { "My Hostels" } }
                    li { a href="/owner/profile" { "Profile" } }
                }
                _ => {}
            }
        }
    }
}

pub fn desktop_layout(title: &str, viewer: Option<&SessionUser>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Hostel Finder" }
            }
            body {
              header class="flex items-center justify-between px-6 py-3 shadow" {
                  a href="/" class="brand" { h3 { "Hostel Finder" } }
                  nav { (nav_links(viewer)) }

                  @if let Some(user) = viewer {
                      div class="account" {
                          span class="avatar" title=(user.full_name()) { (user.initials()) }
                          @if user.is_verified() {
                              span class="badge verified" { "Verified" }
                          }
                          form method="post" action="/auth/logout" class="inline" {
                              button type="submit" class="link" { "Log out" }
                          }
                      }
                  } @else {
                      div class="account" {
                          a href="/login" class="text-base font-medium" { "Login" }
                          a href="/signup" class="btn" { "Sign up" }
                      }
                  }
              }
                (content)
            }
        }
    }
}
