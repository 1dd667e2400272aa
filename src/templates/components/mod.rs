use maud::{html, Markup};

pub mod error;
pub mod filter_form;
pub mod hostel_card;

pub use error::error_page;
pub use filter_form::filter_form;
pub use hostel_card::hostel_card;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Filled and empty stars for a 0-5 rating, rounded to the nearest star.
pub fn stars(rating: f64) -> Markup {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    html! {
        span class="stars" aria-label=(format!("{rating:.1} out of 5")) {
            @for _ in 0..filled { "★" }
            @for _ in filled..5 { "☆" }
        }
    }
}

/// Inline POST form rendered as a single button.
pub fn post_button(action: &str, label: &str, class: &str) -> Markup {
    html! {
        form method="post" action=(action) class="inline" {
            button type="submit" class=(class) { (label) }
        }
    }
}
