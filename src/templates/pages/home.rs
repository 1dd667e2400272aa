// templates/pages/home.rs

use crate::auth::session::SessionUser;
use crate::domain::listing::Listing;
use crate::templates::{desktop_layout, hostel_card};
use maud::{html, Markup};

pub fn home_page(viewer: Option<&SessionUser>, featured: &[Listing]) -> Markup {
    desktop_layout(
        "Home",
        viewer,
        html! {
            main class="container" {
                section class="hero" {
                    h1 { "Find your perfect student hostel" }
                    p class="lead" { "Verified hostels near your campus, with honest reviews from students." }
                    form method="get" action="/hostels" class="search-bar" {
                        input type="search" name="q" placeholder="Hostel name or area";
                        input type="text" name="location" placeholder="City";
                        button type="submit" class="primary" { "Search" }
                    }
                }

                @if !featured.is_empty() {
                    section {
                        h2 { "Top rated" }
                        div class="grid" {
                            @for listing in featured {
                                (hostel_card(listing, None))
                            }
                        }
                        a href="/hostels?sort=rating" { "See all hostels →" }
                    }
                }
            }
        },
    )
}
