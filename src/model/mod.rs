//! The pre-trained artifacts: the winner classifier and the label encoders
//! that map team and venue names to the codes it was trained on.

pub mod encoder;
pub mod xgboost;

pub use encoder::LabelEncoder;
pub use xgboost::TreeEnsemble;

/// A trained classifier scoring a single dense feature row.
pub trait Classifier: Send + Sync {
    /// Number of features the model expects in each row.
    fn n_features(&self) -> usize;

    /// Probability of each class label, indexed by label.
    fn predict_proba(&self, features: &[f32]) -> Vec<f64>;

    /// The most probable class label. Ties go to the lowest label.
    fn predict(&self, features: &[f32]) -> usize {
        argmax(&self.predict_proba(features))
    }
}

pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
#[test]
fn argmax_prefers_first_on_ties() {
    assert_eq!(argmax(&[0.25, 0.5, 0.5]), 1);
    assert_eq!(argmax(&[0.5, 0.5]), 0);
    assert_eq!(argmax(&[]), 0);
}
