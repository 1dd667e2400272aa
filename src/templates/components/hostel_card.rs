use crate::domain::listing::Listing;
use crate::templates::components::{post_button, stars};
use crate::templates::format_price;
use maud::{html, Markup};

/// `saved` is `None` when the viewer cannot keep a wishlist.
pub fn hostel_card(listing: &Listing, saved: Option<bool>) -> Markup {
    html! {
        article class="card hostel-card" id=(format!("hostel-{}", listing.id)) {
            header {
                h3 { a href=(format!("/hostels/{}", listing.id)) { (listing.name) } }
                @if listing.verified {
                    span class="badge verified" { "Verified" }
                }
            }
            @if let Some(location) = &listing.location {
                p class="location" { (location) }
            }
            p class="meta" {
                @match listing.price {
                    Some(price) => strong class="price" { (format_price(price)) " / month" },
                    None => span class="price muted" { "Price on request" },
                }
                @if let Some(room_type) = &listing.room_type {
                    " · " span class="room-type" { (room_type) }
                }
            }
            @if let Some(rating) = listing.rating {
                p class="rating" {
                    (stars(rating)) " " (format!("{rating:.1}"))
                    @if let Some(n) = listing.total_reviews {
                        span class="muted" { " (" (n) " reviews)" }
                    }
                }
            }
            @if let Some(amenities) = &listing.amenities {
                ul class="amenities" {
                    @for label in amenities.iter().take(4) {
                        li { (label) }
                    }
                    @if amenities.len() > 4 {
                        li class="muted" { "+" (amenities.len() - 4) " more" }
                    }
                }
            }
            @match saved {
                Some(true) => (post_button(&format!("/student/wishlist/{}/remove", listing.id), "Remove from wishlist", "secondary")),
                Some(false) => (post_button(&format!("/student/wishlist/{}", listing.id), "Save to wishlist", "primary")),
                None => {}
            }
        }
    }
}
