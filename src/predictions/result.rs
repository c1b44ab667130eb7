use axum::{
    extract::{Form, State},
    http::HeaderMap,
};
use hypertext::prelude::*;

use crate::{
    predict::{MatchSelection, PredictError, Prediction},
    predictions::form::PredictorPage,
    state::AppState,
    template::Page,
    util_resp::{StandardResponse, bad_request, server_error, success},
    widgets::{
        alert::{AlertKind, ErrorAlert, ResultAlert},
        team_card::{HeadToHeadCard, TeamCard},
    },
};

pub enum PredictionOutcome {
    Predicted(Box<Prediction>),
    Rejected(PredictError),
}

impl Renderable for PredictionOutcome {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        match self {
            PredictionOutcome::Predicted(prediction) => {
                PredictionView { prediction }.render_to(buffer)
            }
            PredictionOutcome::Rejected(e) => {
                ErrorAlert { msg: e }.render_to(buffer)
            }
        }
    }
}

pub struct PredictionView<'r> {
    pub prediction: &'r Prediction,
}

impl<'r> Renderable for PredictionView<'r> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        let p = self.prediction;
        maud! {
            div class="row mb-3" {
                (TeamCard { team: p.team1 })
                (TeamCard { team: p.team2 })
            }
            @if let Some(record) = p.head_to_head {
                (HeadToHeadCard { team1: p.team1, team2: p.team2, record })
            }
            (ResultAlert {
                kind: AlertKind::Success,
                label: "🏆 Predicted Winner",
                value: &p.winner,
            })
            (ResultAlert {
                kind: AlertKind::Info,
                label: "🤖 Model Confidence",
                value: format!("{}%", p.confidence),
            })
            form method="post" action="/export" {
                input type="hidden" name="team1" value=(p.team1.code);
                input type="hidden" name="team2" value=(p.team2.code);
                input type="hidden" name="toss_winner" value=(p.toss_winner.code);
                input type="hidden" name="toss_decision" value=(p.toss_decision.as_str());
                input type="hidden" name="venue" value=(p.venue);
                button type="submit" class="btn btn-outline-secondary" {
                    "📥 Export Result (Excel)"
                }
            }
        }
        .render_to(buffer);
    }
}

/// Requests sent by htmx only want the result fragment, not the whole page.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|v| v.as_bytes() == b"true")
}

#[tracing::instrument(skip(state, headers))]
pub async fn do_predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(selection): Form<MatchSelection>,
) -> StandardResponse {
    let outcome = match state.artifacts.predict_winner(&selection) {
        Ok(prediction) => PredictionOutcome::Predicted(Box::new(prediction)),
        Err(e) => {
            if e.is_client_error() {
                tracing::warn!(error = %e, "Rejected prediction request");
            } else {
                tracing::error!(error = %e, "Prediction failed");
            }
            PredictionOutcome::Rejected(e)
        }
    };

    let html = if is_htmx(&headers) {
        outcome.render()
    } else {
        Page::new()
            .body(PredictorPage {
                venues: state.artifacts.venues(),
                selected: Some(&selection),
                outcome: Some(&outcome),
            })
            .render()
    };

    match &outcome {
        PredictionOutcome::Predicted(_) => success(html),
        PredictionOutcome::Rejected(e) if e.is_client_error() => bad_request(html),
        PredictionOutcome::Rejected(_) => server_error(html),
    }
}
