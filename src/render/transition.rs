use serde::{Deserialize, Serialize};

use crate::helpers::Merge;

use super::NodeId;

/// Named transition shared by every element updated in one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionToken {
    pub name: String,
    pub duration_ms: f64,
    pub delay_ms: f64,
}

impl TransitionToken {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = sanitize_ms(duration_ms);
        self
    }

    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: f64) -> Self {
        self.delay_ms = sanitize_ms(delay_ms);
        self
    }
}

impl Default for TransitionToken {
    fn default() -> Self {
        Self {
            name: "update".to_owned(),
            duration_ms: 250.0,
            delay_ms: 0.0,
        }
    }
}

/// Partial update for a [`TransitionToken`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionPatch {
    pub name: Option<String>,
    pub duration_ms: Option<f64>,
    pub delay_ms: Option<f64>,
}

impl Merge for TransitionToken {
    type Patch = TransitionPatch;

    fn merge(&mut self, patch: TransitionPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(duration_ms) = patch.duration_ms {
            self.duration_ms = sanitize_ms(duration_ms);
        }
        if let Some(delay_ms) = patch.delay_ms {
            self.delay_ms = sanitize_ms(delay_ms);
        }
    }
}

/// One pending animation recorded by a scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledTransition {
    pub node: NodeId,
    pub name: String,
    pub duration_ms: f64,
    pub delay_ms: f64,
}

pub(crate) fn sanitize_ms(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
