//! Inference for gradient-boosted tree ensembles saved in XGBoost's JSON model
//! format (`Booster.save_model("model.json")`).
//!
//! Only the pieces needed to score a dense feature row are read: the trees,
//! which output group each tree contributes to, the base score and the
//! objective.

use serde::Deserialize;

use crate::{artifacts::ArtifactError, model::Classifier};

#[derive(Deserialize)]
struct ModelFile {
    learner: LearnerFile,
}

#[derive(Deserialize)]
struct LearnerFile {
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: BoosterFile,
    learner_model_param: LearnerParamFile,
    objective: ObjectiveFile,
}

#[derive(Deserialize)]
struct BoosterFile {
    name: String,
    model: Option<GbTreeFile>,
}

#[derive(Deserialize)]
struct GbTreeFile {
    tree_info: Vec<usize>,
    trees: Vec<TreeFile>,
}

#[derive(Deserialize)]
struct TreeFile {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<u32>,
    split_conditions: Vec<f32>,
    default_left: Vec<Flag>,
    #[serde(default)]
    split_type: Vec<u8>,
}

/// Older releases write `default_left` as 0/1, newer ones as booleans.
#[derive(Deserialize, Clone, Copy)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(u8),
}

impl Flag {
    fn is_set(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

#[derive(Deserialize)]
struct LearnerParamFile {
    base_score: String,
    num_class: String,
    num_feature: String,
}

#[derive(Deserialize)]
struct ObjectiveFile {
    name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// One output; the probability of class 1 is `sigmoid(margin)`.
    BinaryLogistic,
    /// One output per class, normalised with softmax.
    MultiSoftmax,
}

impl Objective {
    fn parse(name: &str) -> Result<Self, ArtifactError> {
        match name {
            "binary:logistic" => Ok(Objective::BinaryLogistic),
            "multi:softprob" | "multi:softmax" => Ok(Objective::MultiSoftmax),
            other => Err(ArtifactError::UnsupportedObjective(other.to_string())),
        }
    }
}

const LEAF: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
struct Node {
    left: u32,
    right: u32,
    feature: u32,
    /// Split threshold for internal nodes, output value for leaves.
    value: f32,
    default_left: bool,
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_file(
        idx: usize,
        file: TreeFile,
        num_feature: usize,
    ) -> Result<Self, ArtifactError> {
        let malformed = |reason: String| ArtifactError::MalformedTree {
            tree: idx,
            reason,
        };

        let n = file.left_children.len();
        if n == 0 {
            return Err(malformed("tree has no nodes".to_string()));
        }
        if file.right_children.len() != n
            || file.split_indices.len() != n
            || file.split_conditions.len() != n
            || file.default_left.len() != n
        {
            return Err(malformed("node arrays differ in length".to_string()));
        }
        if file.split_type.iter().any(|t| *t != 0) {
            return Err(malformed("categorical splits are not supported".to_string()));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (l, r) = (file.left_children[i], file.right_children[i]);
            let node = if l == -1 {
                Node {
                    left: LEAF,
                    right: LEAF,
                    feature: 0,
                    value: file.split_conditions[i],
                    default_left: false,
                }
            } else {
                // children always come after their parent, which also rules
                // out cycles
                let in_range =
                    |c: i32| c > i as i32 && (c as usize) < n;
                if !in_range(l) || !in_range(r) {
                    return Err(malformed(format!(
                        "node {i} has invalid children ({l}, {r})"
                    )));
                }
                let feature = file.split_indices[i];
                if feature as usize >= num_feature {
                    return Err(malformed(format!(
                        "node {i} splits on feature {feature}, but the model has {num_feature} features"
                    )));
                }
                Node {
                    left: l as u32,
                    right: r as u32,
                    feature,
                    value: file.split_conditions[i],
                    default_left: file.default_left[i].is_set(),
                }
            };
            nodes.push(node);
        }

        Ok(Tree { nodes })
    }

    fn leaf_value(&self, features: &[f32]) -> f32 {
        let mut node = &self.nodes[0];
        while node.left != LEAF {
            let x = features[node.feature as usize];
            let next = if x.is_nan() {
                if node.default_left { node.left } else { node.right }
            } else if x < node.value {
                node.left
            } else {
                node.right
            };
            node = &self.nodes[next as usize];
        }
        node.value
    }
}

/// A tree ensemble read from an XGBoost JSON model.
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    objective: Objective,
    num_feature: usize,
    num_groups: usize,
    base_margin: f32,
    feature_names: Vec<String>,
    trees: Vec<(Tree, usize)>,
}

impl TreeEnsemble {
    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let file: ModelFile = serde_json::from_str(json)?;
        let learner = file.learner;

        let objective = Objective::parse(&learner.objective.name)?;
        let param = learner.learner_model_param;
        let parse_param = |name: &'static str, raw: &str| {
            raw.trim().parse::<f32>().map_err(|_| ArtifactError::BadParam {
                name,
                value: raw.to_string(),
            })
        };
        let base_score = parse_param("base_score", &param.base_score)?;
        let num_class = parse_param("num_class", &param.num_class)? as usize;
        let num_feature = parse_param("num_feature", &param.num_feature)? as usize;

        let num_groups = match objective {
            Objective::BinaryLogistic => 1,
            Objective::MultiSoftmax if num_class >= 2 => num_class,
            Objective::MultiSoftmax => {
                return Err(ArtifactError::BadParam {
                    name: "num_class",
                    value: param.num_class,
                });
            }
        };

        // base_score is stored as a probability for logistic objectives
        let base_margin = match objective {
            Objective::BinaryLogistic => {
                if !(base_score > 0.0 && base_score < 1.0) {
                    return Err(ArtifactError::BadParam {
                        name: "base_score",
                        value: param.base_score,
                    });
                }
                -(1.0 / base_score - 1.0).ln()
            }
            Objective::MultiSoftmax => base_score,
        };

        let booster = learner.gradient_booster;
        let model = match (booster.name.as_str(), booster.model) {
            ("gbtree", Some(model)) => model,
            (name, _) => {
                return Err(ArtifactError::UnsupportedBooster(name.to_string()));
            }
        };
        if model.tree_info.len() != model.trees.len() {
            return Err(ArtifactError::MalformedTree {
                tree: model.trees.len(),
                reason: "tree_info and trees differ in length".to_string(),
            });
        }

        let trees = model
            .trees
            .into_iter()
            .zip(model.tree_info)
            .enumerate()
            .map(|(idx, (file, group))| {
                if group >= num_groups {
                    return Err(ArtifactError::MalformedTree {
                        tree: idx,
                        reason: format!(
                            "output group {group} is out of range for {num_groups} groups"
                        ),
                    });
                }
                Ok((Tree::from_file(idx, file, num_feature)?, group))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            trees = trees.len(),
            num_feature,
            num_groups,
            ?objective,
            "Loaded tree ensemble"
        );

        Ok(TreeEnsemble {
            objective,
            num_feature,
            num_groups,
            base_margin,
            feature_names: learner.feature_names,
            trees,
        })
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Column names recorded when the model was trained; empty when the model
    /// was trained on an unnamed matrix.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Raw (untransformed) score of each output group.
    pub fn margins(&self, features: &[f32]) -> Vec<f32> {
        let mut margins = vec![self.base_margin; self.num_groups];
        for (tree, group) in &self.trees {
            margins[*group] += tree.leaf_value(features);
        }
        margins
    }
}

impl Classifier for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.num_feature
    }

    fn predict_proba(&self, features: &[f32]) -> Vec<f64> {
        let margins = self.margins(features);
        match self.objective {
            Objective::BinaryLogistic => {
                let p = 1.0 / (1.0 + (-(margins[0] as f64)).exp());
                vec![1.0 - p, p]
            }
            Objective::MultiSoftmax => {
                let max = margins
                    .iter()
                    .copied()
                    .fold(f32::NEG_INFINITY, f32::max) as f64;
                let exps: Vec<f64> =
                    margins.iter().map(|m| (*m as f64 - max).exp()).collect();
                let sum: f64 = exps.iter().sum();
                exps.into_iter().map(|e| e / sum).collect()
            }
        }
    }
}
