use std::io::Write;

use crate::cli::PredictArgs;
use crate::client::RiskPredictor;
use crate::runtime::run_submission;
use crate::state::{reduce, Action, Effect, IntakeState};

/// Submits the assessment described by `args` and writes the result panel (or
/// the request body, for a dry run) to `out`. A failed submission is an error.
pub(crate) async fn run_predict(
    args: &PredictArgs,
    predictor: &dyn RiskPredictor,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let state = IntakeState {
        form: args.to_form(),
        ..IntakeState::default()
    };
    let (loading, effect) = reduce(&state, Action::Submit);
    let Some(Effect::Predict { id, request }) = effect else {
        anyhow::bail!("submission was not started");
    };

    if args.dry_run {
        writeln!(out, "{}", serde_json::to_string_pretty(&request)?)?;
        return Ok(());
    }

    let completion = run_submission(predictor, id, &request).await;
    let (done, _) = reduce(&loading, completion);
    if let Some(alert) = done.alert {
        anyhow::bail!(alert);
    }
    match done.result {
        Some(risk) => {
            writeln!(out, "{}", risk.title())?;
            writeln!(out, "{}", risk.message())?;
            Ok(())
        }
        None => anyhow::bail!("no result received"),
    }
}
