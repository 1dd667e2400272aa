use crate::domain::filter::FilterCriteria;
use crate::domain::sort::SortOrder;
use maud::{html, Markup};

pub const ROOM_TYPES: &[&str] = &["Shared Dormitory", "Private Room"];
pub const COMMON_AMENITIES: &[&str] = &[
    "WiFi",
    "Air Conditioning",
    "Laundry",
    "Kitchen",
    "24/7 Security",
];

/// GET form for `/hostels`, pre-filled from the active criteria.
pub fn filter_form(criteria: &FilterCriteria, sort: SortOrder) -> Markup {
    html! {
        form method="get" action="/hostels" class="filter-form" {
            input type="search" name="q" placeholder="Search hostels" value=(criteria.query);
            input type="text" name="location" placeholder="City" value=(criteria.location);
            input type="number" name="min_price" min="0" placeholder="Min price"
                value=[criteria.min_price];
            input type="number" name="max_price" min="0" placeholder="Max price"
                value=[criteria.max_price];

            select name="room_type" {
                option value="" { "Any room type" }
                @for room_type in ROOM_TYPES {
                    option value=(room_type) selected[criteria.room_type.as_deref() == Some(*room_type)] { (room_type) }
                }
            }

            select name="min_rating" {
                option value="" { "Any rating" }
                @for stars in [3, 4] {
                    option value=(stars) selected[criteria.min_rating == f64::from(stars)] { (stars) "+ stars" }
                }
            }

            fieldset class="amenities" {
                legend { "Amenities" }
                @for amenity in COMMON_AMENITIES {
                    label {
                        input type="checkbox" name="amenity" value=(amenity)
                            checked[criteria.amenities.contains(*amenity)];
                        " " (amenity)
                    }
                }
            }

            @if let Some(radius) = criteria.within {
                input type="hidden" name="lat" value=(radius.origin.lat);
                input type="hidden" name="lng" value=(radius.origin.lng);
                label {
                    "Within "
                    input type="number" name="radius" min="1" step="any" value=(radius.km);
                    " km"
                }
            }

            label {
                input type="checkbox" name="verified" value="1" checked[criteria.verified_only];
                " Verified only"
            }

            select name="sort" {
                option value="" selected[sort == SortOrder::Listed] { "Newest listed" }
                option value="price-low" selected[sort == SortOrder::PriceLowToHigh] { "Price: low to high" }
                option value="price-high" selected[sort == SortOrder::PriceHighToLow] { "Price: high to low" }
                option value="rating" selected[sort == SortOrder::Rating] { "Top rated" }
            }

            button type="submit" class="primary" { "Search" }
            a href="/hostels" class="link" { "Clear" }
        }
    }
}
