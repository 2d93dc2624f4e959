use crate::errors::ServerError;
use crate::pipeline::{AnalysisReport, UpgradeSimulationResult};
use crate::pipeline::upgrade::UpgradeFeature;
use crate::responses::{xlsx_response, ResultResp};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

const HEADERS: [&str; 13] = [
    "Category",
    "Address",
    "City",
    "State",
    "Beds",
    "Baths",
    "Sqft",
    "Price",
    "Predicted Price",
    "Added Beds",
    "Added Baths",
    "Upgraded Price",
    "ROI %",
];

pub fn export_report_xlsx(report: &AnalysisReport) -> ResultResp {
    let buffer = report_workbook(report)
        .map_err(|e| ServerError::XlsxError(format!("Failed to build workbook: {e}")))?;

    xlsx_response(buffer, &format!("upgrades_{}.xlsx", report.region))
}

/// One row per simulated upgrade, investments first, plus a summary sheet.
pub fn report_workbook(report: &AnalysisReport) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Upgrades")?;
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, result) in report.results().enumerate() {
        write_result_row(sheet, (i + 1) as u32, result)?;
    }

    let summary = workbook.add_worksheet();
    summary.set_name("Summary")?;
    let imp = &report.feature_importance;
    let rows: [(&str, f64); 7] = [
        ("Listings analyzed", report.listings_analyzed as f64),
        ("Anomalies detected", report.anomalies_detected as f64),
        ("Good investments", report.counts.good_investment as f64),
        ("Good renovations", report.counts.good_renovation as f64),
        ("Importance: bedrooms", imp.bedrooms),
        ("Importance: bathrooms", imp.bathrooms),
        ("Importance: area", imp.area_sqft),
    ];
    summary.write_string(0, 0, "Region")?;
    summary.write_string(0, 1, &report.region)?;
    for (i, (label, value)) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        summary.write_string(r, 0, *label)?;
        summary.write_number(r, 1, *value)?;
    }

    workbook.save_to_buffer()
}

fn write_result_row(
    sheet: &mut Worksheet,
    r: u32,
    result: &UpgradeSimulationResult,
) -> Result<(), XlsxError> {
    let o = &result.original;
    let added = |f: UpgradeFeature| result.added_features.get(&f).copied().unwrap_or(0) as f64;

    sheet.write_string(r, 0, result.category.label())?;
    sheet.write_string(r, 1, &o.address)?;
    sheet.write_string(r, 2, &o.city)?;
    sheet.write_string(r, 3, &o.state)?;
    sheet.write_number(r, 4, o.bedrooms)?;
    sheet.write_number(r, 5, o.bathrooms)?;
    sheet.write_number(r, 6, o.area_sqft)?;
    sheet.write_number(r, 7, o.price)?;
    sheet.write_number(r, 8, o.predicted_price)?;
    sheet.write_number(r, 9, added(UpgradeFeature::Bedrooms))?;
    sheet.write_number(r, 10, added(UpgradeFeature::Bathrooms))?;
    sheet.write_number(r, 11, result.adjusted.new_predicted_price)?;
    sheet.write_number(r, 12, (result.roi_percent * 100.0).round() / 100.0)?;
    Ok(())
}
