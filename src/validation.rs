use crate::predict::PredictError;

/// A match needs two different sides.
pub fn check_distinct_teams(team1: &str, team2: &str) -> Result<(), PredictError> {
    match team1 == team2 {
        true => Err(PredictError::SameTeams),
        false => Ok(()),
    }
}

#[cfg(test)]
#[test]
fn test_distinct_teams() {
    assert!(check_distinct_teams("MI", "CSK").is_ok());
    assert_eq!(check_distinct_teams("RR", "RR"), Err(PredictError::SameTeams));
}
