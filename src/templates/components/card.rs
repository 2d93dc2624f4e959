use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Single labelled figure for summary grids.
pub fn stat(label: &str, value: impl maud::Render) -> Markup {
    html! {
        div class="stat" {
            div class="muted" { (label) }
            strong { (value) }
        }
    }
}
