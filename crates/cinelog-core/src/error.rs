use cinelog_models::ModelError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ViewError {
    /// The action is not available in the view's current phase.
    #[error("cannot {action} while {phase}")]
    Transition {
        action: &'static str,
        phase: &'static str,
    },

    #[error(transparent)]
    Field(#[from] ModelError),
}

impl ViewError {
    pub fn transition(action: &'static str, phase: &'static str) -> Self {
        ViewError::Transition { action, phase }
    }
}
