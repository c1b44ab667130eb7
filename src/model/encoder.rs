use serde::Deserialize;

use crate::artifacts::ArtifactError;

/// A fitted label encoder: the code of a label is its position in the sorted
/// class list.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    #[serde(rename = "classes_")]
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ArtifactError> {
        let encoder = LabelEncoder { classes };
        encoder.check_sorted()?;
        Ok(encoder)
    }

    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let encoder: LabelEncoder = serde_json::from_str(json)?;
        encoder.check_sorted()?;
        Ok(encoder)
    }

    fn check_sorted(&self) -> Result<(), ArtifactError> {
        if let Some(pair) = self.classes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ArtifactError::UnsortedClasses {
                first: pair[0].clone(),
                second: pair[1].clone(),
            });
        }
        Ok(())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns `None` for labels the encoder was not fitted on.
    pub fn transform(&self, label: &str) -> Option<u32> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .ok()
            .map(|idx| idx as u32)
    }

    pub fn inverse_transform(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }
}
