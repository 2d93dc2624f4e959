use crate::domain::ListingRecord;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn listings_page(region: &str, listings: &[ListingRecord]) -> Markup {
    desktop_layout(
        &format!("Listings near {region}"),
        html! {
            h1 { "Listings near " (region) }
            p class="muted" { (listings.len()) " homes" }

            @if listings.is_empty() {
                p { "No listings match these filters." }
            } @else {
                div class="grid" {
                    @for home in listings {
                        div class="card" {
                            h3 { (home.address) }
                            p class="muted" { (home.city) ", " (home.state) }
                            p { strong { (money(home.price)) } }
                            p {
                                (home.bedrooms) " Beds · " (home.bathrooms) " Baths · "
                                (home.area_sqft) " Sqft"
                            }
                        }
                    }
                }
            }
        },
    )
}

/// `$1,234,567` with no cents.
pub fn money(amount: f64) -> String {
    let rounded = amount.round().abs() as u64;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if amount < 0.0 && rounded > 0 {
        format!("-${out}")
    } else {
        format!("${out}")
    }
}
