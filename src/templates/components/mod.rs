use maud::{html, Markup};

pub mod card;
pub mod error;

pub use card::{card, stat};
pub use error::html_error_response;

pub fn button(label: &str) -> Markup {
    html! {
        button class="btn" type="submit" { (label) }
    }
}

/// Labelled numeric input; empty by default so blank fields mean "no filter".
pub fn number_field(label: &str, name: &str, placeholder: &str) -> Markup {
    html! {
        label {
            span class="muted" { (label) }
            br;
            input type="number" min="0" name=(name) placeholder=(placeholder) aria-label=(label);
        }
    }
}
