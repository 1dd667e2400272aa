use crate::auth::session::SessionUser;
use crate::domain::listing::Listing;
use crate::templates::{desktop_layout, format_date, hostel_card};
use maud::{html, Markup};

pub struct WishlistVm<'a> {
    pub viewer: &'a SessionUser,
    /// Listing with the time it was saved, newest first.
    pub entries: Vec<(Listing, i64)>,
    /// Saved ids no longer present in the catalog.
    pub unavailable: usize,
}

pub fn wishlist_page(vm: &WishlistVm<'_>) -> Markup {
    desktop_layout(
        "Wishlist",
        Some(vm.viewer),
        html! {
            main class="container" {
                h1 { "My Wishlist" }
                p { (vm.entries.len()) " saved hostels" }

                @if vm.unavailable > 0 {
                    p class="muted" { (vm.unavailable) " saved hostels are no longer listed." }
                }

                @if vm.entries.is_empty() {
                    div class="empty-state" {
                        p { "No saved hostels yet." }
                        a href="/hostels" class="btn" { "Browse hostels" }
                    }
                } @else {
                    div class="grid" {
                        @for (listing, saved_at) in &vm.entries {
                            div {
                                (hostel_card(listing, Some(true)))
                                p class="muted" { "Saved " (format_date(*saved_at)) }
                            }
                        }
                    }
                }
            }
        },
    )
}
