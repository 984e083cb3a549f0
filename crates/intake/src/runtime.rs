use std::sync::Arc;

use cardio_protocol::PredictRequest;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::client::RiskPredictor;
use crate::state::{Action, Effect, SubmitOutcome};

/// Runs one prediction and turns the result into the action that completes it.
pub(crate) async fn run_submission(
    predictor: &dyn RiskPredictor,
    id: u64,
    request: &PredictRequest,
) -> Action {
    if !request.bmi.value().is_finite() {
        warn!(submission = id, "bmi is not finite, sending null");
    }
    let outcome = match predictor.predict(request).await {
        Ok(risk) => {
            info!(submission = id, ?risk, "risk received");
            SubmitOutcome::Risk(risk)
        }
        Err(err) => {
            error!(submission = id, error = %err, "error connecting to prediction service");
            SubmitOutcome::Failed
        }
    };
    Action::Completed { id, outcome }
}

/// Drains effects one at a time, so at most one request is ever in flight.
pub(crate) fn spawn_effect_worker(
    predictor: Arc<dyn RiskPredictor>,
    mut effect_rx: mpsc::Receiver<Effect>,
    action_tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(effect) = effect_rx.recv().await {
            match effect {
                Effect::Predict { id, request } => {
                    let action = run_submission(predictor.as_ref(), id, &request).await;
                    if action_tx.send(action).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}
