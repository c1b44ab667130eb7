use crate::{
    features::{FeatureRow, HeadToHead, TossDecision},
    model::Classifier,
    predict::{MatchSelection, PredictError},
    test::fixture_artifacts,
};

fn selection(
    team1: &str,
    team2: &str,
    toss_winner: &str,
    toss_decision: TossDecision,
    venue: &str,
) -> MatchSelection {
    MatchSelection {
        team1: team1.to_string(),
        team2: team2.to_string(),
        toss_winner: toss_winner.to_string(),
        toss_decision,
        venue: venue.to_string(),
    }
}

#[test]
fn known_match_assembles_documented_row() {
    let artifacts = fixture_artifacts();
    let prediction = artifacts
        .predict_winner(&selection(
            "MI",
            "CSK",
            "CSK",
            TossDecision::Field,
            "Wankhede Stadium",
        ))
        .unwrap();

    assert_eq!(
        prediction.features,
        FeatureRow([
            5.0,
            0.0,
            0.0,
            1.0,
            5.0,
            58.3_f64 as f32,
            52.4_f64 as f32,
            168.5,
            162.0,
        ])
    );
    assert_eq!(prediction.winner, "Mumbai Indians");
    assert_eq!(prediction.confidence.value(), 40.81);
    assert_eq!(
        prediction.head_to_head,
        Some(HeadToHead {
            matches: 36,
            first_wins: 20,
            second_wins: 16
        })
    );
}

#[test]
fn teams_missing_from_tables_use_defaults() {
    let artifacts = fixture_artifacts();
    let prediction = artifacts
        .predict_winner(&selection(
            "GT",
            "SRH",
            "GT",
            TossDecision::Bat,
            "Eden Gardens",
        ))
        .unwrap();

    assert_eq!(
        prediction.features,
        FeatureRow([2.0, 9.0, 2.0, 0.0, 1.0, 50.0, 50.0, 130.0, 130.0])
    );
    assert_eq!(prediction.winner, "Gujarat Titans");
    assert_eq!(prediction.confidence.value(), 69.06);
    assert_eq!(prediction.head_to_head, None);
}

#[test]
fn rows_keyed_by_full_name_are_found() {
    let artifacts = fixture_artifacts();
    let prediction = artifacts
        .predict_winner(&selection(
            "KKR",
            "RCB",
            "RCB",
            TossDecision::Bat,
            "Eden Gardens",
        ))
        .unwrap();
    let cols: Vec<_> = prediction.features.columns().collect();

    // KKR only has a batting row, keyed by name
    assert_eq!(cols[5], ("team1_home_win_pct", 50.0));
    assert_eq!(cols[6], ("team2_away_win_pct", 44.5));
    assert_eq!(cols[7], ("team1_batting_strength", 155.0));
    assert_eq!(cols[8], ("team2_batting_strength", 171.25));
}

#[test]
fn head_to_head_is_symmetric() {
    let artifacts = fixture_artifacts();
    for (a, b) in [("MI", "CSK"), ("CSK", "RCB"), ("MI", "KKR"), ("GT", "DC")] {
        let ab = artifacts.head_to_head(a, b);
        let ba = artifacts.head_to_head(b, a);
        assert_eq!(ab, ba.map(HeadToHead::swapped), "{a} v {b}");
    }
    // the later duplicate row is ignored
    assert_eq!(artifacts.head_to_head("CSK", "MI").unwrap().matches, 36);
}

#[test]
fn confidence_is_within_bounds_for_every_pairing() {
    let artifacts = fixture_artifacts();
    let codes = ["MI", "RCB", "CSK", "DC", "KKR", "SRH", "GT", "LSG", "RR", "PBKS"];
    for team1 in codes {
        for team2 in codes {
            let sel = selection(team1, team2, team2, TossDecision::Bat, "Eden Gardens");
            match artifacts.predict_winner(&sel) {
                Ok(p) => {
                    let proba = artifacts
                        .model
                        .predict_proba(p.features.values());
                    let label = artifacts.team_encoder.transform(&p.winner).unwrap();
                    let expected =
                        ((100.0 * proba[label as usize]) * 100.0).round() / 100.0;
                    assert_eq!(p.confidence.value(), expected);
                    assert!((0.0..=100.0).contains(&p.confidence.value()));
                }
                Err(e) => {
                    assert_eq!(team1, team2);
                    assert_eq!(e, PredictError::SameTeams);
                }
            }
        }
    }
}
