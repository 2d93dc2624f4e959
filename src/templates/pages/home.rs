// templates/pages/home.rs

use crate::templates::{
    components::{button, card, number_field},
    desktop_layout,
};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Search",
        html! {
            (card("Search by ZIP", html! {
                p class="muted" { "Pull listings in seconds, then refine with filters. Nearby ZIPs are included when results are thin." }
                form method="get" action="/listings" {
                    input type="text" name="zip" maxlength="10" pattern="[0-9]{5}(-[0-9]{4})?" placeholder="Enter ZIP Code" required;
                    div class="grid" {
                        (number_field("Min Beds", "beds", "e.g. 3"))
                        (number_field("Min Baths", "baths", "e.g. 2"))
                        (number_field("Min Price", "min_price", "e.g. 300000"))
                        (number_field("Max Price", "max_price", "e.g. 750000"))
                    }
                    (button("Search"))
                }
            }))

            (card("Find undervalued homes", html! {
                p class="muted" { "Trains a price model on the area, flags listings priced unlike their neighbours, and estimates the return on adding bedrooms or bathrooms." }
                form method="get" action="/report" {
                    input type="text" name="zip" maxlength="10" pattern="[0-9]{5}(-[0-9]{4})?" placeholder="Enter ZIP Code" required;
                    input type="number" name="limit" min="5" max="200" value="50" aria-label="Listings to fetch";
                    (button("Analyze"))
                }
            }))
        },
    )
}
