use axum::extract::State;
use hypertext::prelude::*;

use crate::{
    features::TossDecision,
    predict::MatchSelection,
    predictions::result::PredictionOutcome,
    state::AppState,
    teams::TEAMS,
    template::Page,
    util_resp::{StandardResponse, success},
};

/// The form, followed by the outcome of the last submission (if any).
pub struct PredictorPage<'r> {
    pub venues: &'r [String],
    pub selected: Option<&'r MatchSelection>,
    pub outcome: Option<&'r PredictionOutcome>,
}

impl<'r> Renderable for PredictorPage<'r> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        let selected = self.selected;
        let fields = [
            ("team1", "🔷 Select Team 1", selected.map(|s| s.team1.as_str())),
            ("team2", "🔶 Select Team 2", selected.map(|s| s.team2.as_str())),
            (
                "toss_winner",
                "🎲 Toss Winner",
                selected.map(|s| s.toss_winner.as_str()),
            ),
        ];
        let fielding =
            selected.is_some_and(|s| s.toss_decision == TossDecision::Field);
        let venue = self.selected.map(|s| s.venue.as_str());

        maud! {
            form method="post" action="/predict"
                 hx-post="/predict" hx-target="#prediction" hx-swap="innerHTML" {
                div class="row" {
                    @for (name, label, chosen) in fields {
                        div class="col-md-6 mb-3" {
                            label for=(name) class="form-label" { (label) }
                            select class="form-select" id=(name) name=(name) required {
                                @for team in TEAMS.iter() {
                                    option value=(team.code) selected[chosen == Some(team.code)] {
                                        (team.code)
                                    }
                                }
                            }
                        }
                    }
                    div class="col-md-6 mb-3" {
                        p class="form-label mb-1" { "🧠 Toss Decision" }
                        div class="form-check form-check-inline" {
                            input class="form-check-input" type="radio" name="toss_decision"
                                  id="tossBat" value="bat" checked[!fielding];
                            label class="form-check-label" for="tossBat" { "bat" }
                        }
                        div class="form-check form-check-inline" {
                            input class="form-check-input" type="radio" name="toss_decision"
                                  id="tossField" value="field" checked[fielding];
                            label class="form-check-label" for="tossField" { "field" }
                        }
                    }
                }
                div class="mb-3" {
                    label for="venue" class="form-label" { "📍 Venue" }
                    select class="form-select" id="venue" name="venue" required {
                        @for v in self.venues {
                            option value=(v) selected[venue == Some(v.as_str())] { (v) }
                        }
                    }
                }
                button type="submit" class="btn btn-primary" { "🎯 Predict Winner" }
            }
            div id="prediction" class="mt-4" {
                @if let Some(outcome) = self.outcome {
                    (outcome)
                }
            }
        }
        .render_to(buffer);
    }
}

#[tracing::instrument(skip_all)]
pub async fn prediction_form_page(
    State(state): State<AppState>,
) -> StandardResponse {
    success(
        Page::new()
            .body(PredictorPage {
                venues: state.artifacts.venues(),
                selected: None,
                outcome: None,
            })
            .render(),
    )
}
