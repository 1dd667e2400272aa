use crate::auth::session::SessionUser;
use crate::domain::filter::FilterCriteria;
use crate::domain::listing::Listing;
use crate::domain::sort::SortOrder;
use crate::templates::components::filter_form;
use crate::templates::{desktop_layout, hostel_card};
use maud::{html, Markup};
use std::collections::BTreeSet;

pub struct SearchVm<'a> {
    pub viewer: Option<&'a SessionUser>,
    pub criteria: FilterCriteria,
    pub sort: SortOrder,
    pub results: Vec<Listing>,
    pub catalog_size: usize,
    /// Wishlist ids; `None` hides the save buttons.
    pub saved: Option<BTreeSet<i64>>,
}

pub fn search_page(vm: &SearchVm<'_>) -> Markup {
    desktop_layout(
        "Find Hostels",
        vm.viewer,
        html! {
            main class="container" {
                h1 { "Find Hostels" }
                (filter_form(&vm.criteria, vm.sort))

                p class="result-count" {
                    "Showing " strong { (vm.results.len()) } " of " (vm.catalog_size) " hostels"
                }

                @if vm.results.is_empty() {
                    div class="empty-state" {
                        h3 { "No hostels match your filters" }
                        p { "Try widening the price range or removing an amenity." }
                    }
                } @else {
                    div class="grid" {
                        @for listing in &vm.results {
                            (hostel_card(listing, vm.saved.as_ref().map(|ids| ids.contains(&listing.id))))
                        }
                    }
                }
            }
        },
    )
}
