use axum::extract::{Form, State};
use hypertext::prelude::*;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::{
    predict::{MatchSelection, Prediction},
    state::AppState,
    util_resp::{StandardResponse, bad_request, download, server_error},
    widgets::alert::ErrorAlert,
};

pub const EXPORT_FILE_NAME: &str = "prediction_result.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SHEET_NAME: &str = "Prediction";

pub const EXPORT_COLUMNS: [&str; 7] = [
    "Team 1",
    "Team 2",
    "Toss Winner",
    "Toss Decision",
    "Venue",
    "Predicted Winner",
    "Confidence",
];

/// The header row followed by the single data row of the export.
pub fn export_rows(prediction: &Prediction) -> Vec<Vec<String>> {
    vec![
        EXPORT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        vec![
            prediction.team1.name.to_string(),
            prediction.team2.name.to_string(),
            prediction.toss_winner.name.to_string(),
            prediction.toss_decision.to_string(),
            prediction.venue.clone(),
            prediction.winner.clone(),
            format!("{}%", prediction.confidence),
        ],
    ]
}

pub fn write_workbook(rows: &[Vec<String>]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                if row_idx == 0 {
                    sheet.write_string_with_format(
                        0,
                        col_idx as u16,
                        value,
                        &bold,
                    )?;
                } else {
                    sheet.write_string(row_idx as u32, col_idx as u16, value)?;
                }
            }
        }
        sheet.autofit();
    }
    workbook.save_to_buffer()
}

#[tracing::instrument(skip(state))]
pub async fn do_export(
    State(state): State<AppState>,
    Form(selection): Form<MatchSelection>,
) -> StandardResponse {
    let prediction = match state.artifacts.predict_winner(&selection) {
        Ok(p) => p,
        Err(e) if e.is_client_error() => {
            return bad_request(ErrorAlert { msg: e }.render());
        }
        Err(e) => {
            tracing::error!(error = %e, "Prediction failed during export");
            return server_error(ErrorAlert { msg: e }.render());
        }
    };

    match write_workbook(&export_rows(&prediction)) {
        Ok(bytes) => {
            tracing::info!(bytes = bytes.len(), "Exported prediction");
            download(EXPORT_FILE_NAME, XLSX_CONTENT_TYPE, bytes)
        }
        Err(e) => {
            tracing::error!(error = %e, "Could not write workbook");
            server_error(
                ErrorAlert {
                    msg: "Could not write the spreadsheet.",
                }
                .render(),
            )
        }
    }
}
