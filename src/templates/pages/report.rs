use crate::pipeline::{AnalysisReport, UpgradeSimulationResult};
use crate::templates::components::{card, stat};
use crate::templates::desktop_layout;
use crate::templates::pages::listings::money;
use maud::{html, Markup};

pub fn report_page(report: &AnalysisReport, limit: u32) -> Markup {
    let imp = &report.feature_importance;

    desktop_layout(
        &format!("Analysis for {}", report.region),
        html! {
            h1 { "Upgrade opportunities near " (report.region) }
            p class="muted" {
                "Generated " (report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string()) " · "
                a href={ "/anomalies/" (report.region) "/export?limit=" (limit) } { "Download .xlsx" }
            }

            (card("Summary", html! {
                div class="grid" {
                    (stat("Listings analyzed", report.listings_analyzed))
                    (stat("Anomalies", report.anomalies_detected))
                    (stat("Good investments", report.counts.good_investment))
                    (stat("Good renovations", report.counts.good_renovation))
                }
                h3 { "What drives price" }
                div class="grid" {
                    (stat("Bedrooms", percent(imp.bedrooms)))
                    (stat("Bathrooms", percent(imp.bathrooms)))
                    (stat("Area", percent(imp.area_sqft)))
                }
            }))

            (card("Good investments (ROI ≥ 15%)", results_table(&report.good_investments)))
            (card("Good renovations (ROI 5–15%)", results_table(&report.good_renovations)))
        },
    )
}

fn results_table(results: &[UpgradeSimulationResult]) -> Markup {
    html! {
        @if results.is_empty() {
            p class="muted" { "None found." }
        } @else {
            table {
                thead {
                    tr {
                        th { "Address" }
                        th { "Beds / Baths" }
                        th { "Price" }
                        th { "Upgrade" }
                        th { "Upgraded value" }
                        th { "ROI" }
                    }
                }
                tbody {
                    @for r in results {
                        tr {
                            td { (r.original.address) }
                            td { (r.original.bedrooms) " / " (r.original.bathrooms) }
                            td { (money(r.original.price)) }
                            td {
                                @for (feature, delta) in &r.added_features {
                                    "+" (delta) " " (feature.label()) " "
                                }
                            }
                            td { (money(r.adjusted.new_predicted_price)) }
                            td { (format!("{:.1}%", r.roi_percent)) }
                        }
                    }
                }
            }
        }
    }
}

fn percent(share: f64) -> String {
    format!("{:.0}%", share * 100.0)
}
