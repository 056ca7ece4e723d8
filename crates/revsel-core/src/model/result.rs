use serde::{Deserialize, Serialize};

use super::rule::ReviewRequestRule;

/// Evaluation outcome of a policy rule or rule group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationStatus {
    Skipped,
    Pending,
    Approved,
    Disapproved,
}

/// One node of a policy evaluation result tree
///
/// Produced by the evaluation engine and only read here. Interior nodes are
/// rule groups (`and`/`or` conjunctions); leaves are individual approval
/// rules and may carry the reviewer specification to use while they are
/// still pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultNode {
    /// Rule or group name, used for diagnostics
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub status: EvaluationStatus,

    /// Evaluation error, if the engine could not evaluate this node
    #[serde(default)]
    pub error: Option<String>,

    /// Ordered children; empty for leaves
    #[serde(default)]
    pub children: Vec<ResultNode>,

    /// Reviewer specification; only meaningful on leaves
    #[serde(default)]
    pub review_request_rule: Option<ReviewRequestRule>,
}

impl ResultNode {
    /// Create a leaf node carrying a reviewer specification
    pub fn leaf(
        name: impl Into<String>,
        status: EvaluationStatus,
        rule: ReviewRequestRule,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status,
            error: None,
            children: Vec::new(),
            review_request_rule: Some(rule),
        }
    }

    /// Create an interior node over the given children
    pub fn group(
        name: impl Into<String>,
        status: EvaluationStatus,
        children: Vec<ResultNode>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status,
            error: None,
            children,
            review_request_rule: None,
        }
    }

    /// Attach an evaluation error
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.status == EvaluationStatus::Pending
    }
}
