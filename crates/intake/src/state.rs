use cardio_protocol::{AssessmentForm, Field, PredictRequest, RiskClassification};
use serde::{Deserialize, Serialize};

pub(crate) const CONNECTION_ALERT: &str =
    "Error: Could not connect to the model. Ensure the backend is running.";

/// Everything the intake screen knows: raw form values, the in-flight flag,
/// the latest classification, and an unacknowledged alert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct IntakeState {
    pub(crate) form: AssessmentForm,
    pub(crate) loading: bool,
    pub(crate) result: Option<RiskClassification>,
    pub(crate) alert: Option<String>,
    /// Id of the most recent submission; completions for any other id are stale.
    pub(crate) submission: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubmitOutcome {
    Risk(RiskClassification),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Action {
    Edit { field: Field, value: String },
    CycleOption { field: Field, forward: bool },
    Submit,
    Completed { id: u64, outcome: SubmitOutcome },
    DismissAlert,
}

/// Work the caller must run after a transition.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Effect {
    Predict { id: u64, request: PredictRequest },
}

pub(crate) fn reduce(state: &IntakeState, action: Action) -> (IntakeState, Option<Effect>) {
    let mut next = state.clone();
    match action {
        Action::Edit { field, value } => {
            next.form.set(field, value);
            (next, None)
        }
        Action::CycleOption { field, forward } => {
            next.form.cycle_option(field, forward);
            (next, None)
        }
        Action::Submit => {
            if state.loading {
                return (next, None);
            }
            next.loading = true;
            next.submission = state.submission.wrapping_add(1);
            let effect = Effect::Predict {
                id: next.submission,
                request: next.form.to_request(),
            };
            (next, Some(effect))
        }
        Action::Completed { id, outcome } => {
            if !state.loading || id != state.submission {
                return (next, None);
            }
            next.loading = false;
            match outcome {
                SubmitOutcome::Risk(risk) => next.result = Some(risk),
                SubmitOutcome::Failed => next.alert = Some(CONNECTION_ALERT.to_string()),
            }
            (next, None)
        }
        Action::DismissAlert => {
            next.alert = None;
            (next, None)
        }
    }
}
