use crate::auth::session::SessionUser;
use crate::db::hostels::OwnerHostelStats;
use crate::domain::listing::Listing;
use crate::domain::notification::Notification;
use crate::templates::components::filter_form::{COMMON_AMENITIES, ROOM_TYPES};
use crate::templates::{card, desktop_layout, format_date, format_price, hostel_card};
use maud::{html, Markup};

pub struct StudentDashboardVm<'a> {
    pub user: &'a SessionUser,
    pub saved_count: usize,
    pub unread_count: i64,
    pub recent: Vec<Notification>,
    pub recommended: Vec<Listing>,
}

pub fn student_dashboard_page(vm: &StudentDashboardVm<'_>) -> Markup {
    desktop_layout(
        "Dashboard",
        Some(vm.user),
        html! {
            main class="container" {
                h1 { "Welcome back, " (vm.user.first_name) }
                p { "Signed in as " strong { (vm.user.email) } }

                div class="stats" {
                    (card("Saved hostels", html! {
                        p class="stat" { (vm.saved_count) }
                        a href="/student/wishlist" { "View wishlist" }
                    }))
                    (card("Unread notifications", html! {
                        p class="stat" { (vm.unread_count) }
                        a href="/student/notifications?kind=unread" { "Open inbox" }
                    }))
                }

                @if !vm.recent.is_empty() {
                    section class="card" {
                        h3 { "Recent activity" }
                        ul {
                            @for n in &vm.recent {
                                li { strong { (n.title) } " " span class="muted" { (format_date(n.created_at)) } }
                            }
                        }
                    }
                }

                section {
                    h2 { "Recommended for you" }
                    div class="grid" {
                        @for listing in &vm.recommended {
                            (hostel_card(listing, None))
                        }
                    }
                }
            }
        },
    )
}

pub struct OwnerDashboardVm<'a> {
    pub user: &'a SessionUser,
    pub listings: Vec<Listing>,
    pub stats: Vec<OwnerHostelStats>,
}

fn add_hostel_form() -> Markup {
    html! {
        form method="post" action="/owner/hostels" class="stacked" {
            label for="name" { "Hostel name" }
            input type="text" id="name" name="name" required;
            label for="location" { "Location" }
            input type="text" id="location" name="location" placeholder="Lahore, Pakistan" required;
            label for="price" { "Monthly price (PKR)" }
            input type="number" id="price" name="price" min="0" required;
            label for="room_type" { "Room type" }
            select id="room_type" name="room_type" {
                @for room_type in ROOM_TYPES { option value=(room_type) { (room_type) } }
            }
            label for="amenities" { "Amenities (comma separated)" }
            input type="text" id="amenities" name="amenities" placeholder=(COMMON_AMENITIES.join(", "));
            label for="description" { "Description" }
            textarea id="description" name="description" rows="3" {}
            button type="submit" class="primary" { "Add hostel" }
        }
    }
}

pub fn owner_dashboard_page(vm: &OwnerDashboardVm<'_>) -> Markup {
    let total_favorites: i64 = vm.stats.iter().map(|s| s.favorites).sum();
    let total_reviews: i64 = vm.stats.iter().map(|s| s.reviews).sum();

    desktop_layout(
        "Owner Dashboard",
        Some(vm.user),
        html! {
            main class="container" {
                h1 { "Owner Dashboard" }
                p { "Signed in as " strong { (vm.user.email) } }

                div class="stats" {
                    (card("Hostels", html! { p class="stat" { (vm.listings.len()) } }))
                    (card("Saved by students", html! { p class="stat" { (total_favorites) } }))
                    (card("Reviews", html! { p class="stat" { (total_reviews) } }))
                }

                section class="card" {
                    h3 { "Your hostels" }
                    @if vm.stats.is_empty() {
                        p class="muted" { "You have not listed any hostels yet." }
                    } @else {
                        table {
                            thead { tr { th { "Hostel" } th { "Price" } th { "Saved" } th { "Reviews" } th { "Avg." } } }
                            tbody {
                                @for s in &vm.stats {
                                    tr {
                                        td { a href=(format!("/hostels/{}", s.hostel_id)) { (s.name) } }
                                        td {
                                            @match vm.listings.iter().find(|l| l.id == s.hostel_id).and_then(|l| l.price) {
                                                Some(price) => (format_price(price)),
                                                None => "-",
                                            }
                                        }
                                        td { (s.favorites) }
                                        td { (s.reviews) }
                                        td {
                                            @match s.average_review {
                                                Some(avg) => (format!("{avg:.1}")),
                                                None => "-",
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                section class="card" {
                    h3 { "Add a hostel" }
                    (add_hostel_form())
                }
            }
        },
    )
}
