use crate::auth::session::SessionUser;
use crate::domain::listing::Listing;
use crate::domain::review::{average_rating, Review, MAX_STARS, MIN_STARS};
use crate::templates::components::{post_button, stars};
use crate::templates::{desktop_layout, format_date, format_price};
use maud::{html, Markup};

pub struct HostelVm<'a> {
    pub viewer: Option<&'a SessionUser>,
    pub listing: Listing,
    pub reviews: Vec<Review>,
    /// `None` when the viewer is not a student.
    pub saved: Option<bool>,
    /// A student who has not reviewed this hostel yet.
    pub can_review: bool,
}

pub fn hostel_page(vm: &HostelVm<'_>) -> Markup {
    let l = &vm.listing;
    desktop_layout(
        &l.name,
        vm.viewer,
        html! {
            main class="container" {
                a href="/hostels" { "← Back to search" }
                h1 {
                    (l.name)
                    @if l.verified { " " span class="badge verified" { "Verified" } }
                }
                @if let Some(location) = &l.location { p class="location" { (location) } }

                section class="card" {
                    @match l.price {
                        Some(price) => p class="price" { strong { (format_price(price)) } " / month" },
                        None => p class="price muted" { "Price on request" },
                    }
                    @if let Some(room_type) = &l.room_type { p { "Room type: " (room_type) } }
                    @if let Some(rating) = l.rating {
                        p { (stars(rating)) " " (format!("{rating:.1}")) }
                    }
                    @if let Some(description) = &l.description { p { (description) } }
                    @match vm.saved {
                        Some(true) => (post_button(&format!("/student/wishlist/{}/remove", l.id), "Remove from wishlist", "secondary")),
                        Some(false) => (post_button(&format!("/student/wishlist/{}", l.id), "Save to wishlist", "primary")),
                        None => {}
                    }
                }

                @if let Some(amenities) = &l.amenities {
                    section class="card" {
                        h3 { "Amenities" }
                        ul class="amenities" { @for a in amenities { li { (a) } } }
                    }
                }

                section class="card" id="reviews" {
                    h3 { "Reviews (" (vm.reviews.len()) ")" }
                    @if let Some(avg) = average_rating(&vm.reviews) {
                        p class="muted" { "Students rate this hostel " (format!("{avg:.1}")) " on average." }
                    }
                    @if vm.reviews.is_empty() {
                        p class="muted" { "No reviews yet." }
                    }
                    @for r in &vm.reviews {
                        article class="review" {
                            p {
                                strong { (r.author_name) } " "
                                (stars(f64::from(r.rating)))
                                span class="muted" { " " (format_date(r.created_at)) }
                            }
                            p { (r.comment) }
                        }
                    }

                    @if vm.can_review {
                        form method="post" action=(format!("/hostels/{}/reviews", l.id)) class="stacked" {
                            h4 { "Write a review" }
                            label for="rating" { "Rating" }
                            select id="rating" name="rating" required {
                                @for n in (MIN_STARS..=MAX_STARS).rev() {
                                    option value=(n) { (n) " stars" }
                                }
                            }
                            label for="comment" { "Comment" }
                            textarea id="comment" name="comment" rows="3" required {}
                            button type="submit" class="primary" { "Post review" }
                        }
                    }
                }
            }
        },
    )
}
