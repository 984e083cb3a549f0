use cardio_protocol::{flag_code, AssessmentForm, Field, Gender, Level};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cardio-intake",
    version,
    about = "Cardiovascular risk intake console"
)]
pub(crate) struct Args {
    #[arg(long, default_value = "config/intake.toml")]
    pub(crate) config: PathBuf,
    /// Prediction service base address; overrides CARDIO_API_URL and the config file.
    #[arg(long)]
    pub(crate) api_url: Option<String>,
    /// Request timeout in seconds, 0 to wait forever.
    #[arg(long)]
    pub(crate) timeout_secs: Option<u64>,
    #[arg(long, default_value = "logs")]
    pub(crate) log_dir: PathBuf,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Submit one assessment without the interactive screen.
    Predict(PredictArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum LevelArg {
    Normal,
    AboveNormal,
    WellAboveNormal,
}

impl From<LevelArg> for Level {
    fn from(value: LevelArg) -> Self {
        match value {
            LevelArg::Normal => Level::Normal,
            LevelArg::AboveNormal => Level::AboveNormal,
            LevelArg::WellAboveNormal => Level::WellAboveNormal,
        }
    }
}

/// Numeric values are taken as raw text, the same as the interactive form.
#[derive(clap::Args, Debug)]
pub(crate) struct PredictArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) age: Option<String>,
    #[arg(long, value_enum, default_value_t = GenderArg::Female)]
    pub(crate) gender: GenderArg,
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) height: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) weight: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) systolic: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) diastolic: Option<String>,
    #[arg(long, value_enum, default_value_t = LevelArg::Normal)]
    pub(crate) cholesterol: LevelArg,
    #[arg(long, value_enum, default_value_t = LevelArg::Normal)]
    pub(crate) glucose: LevelArg,
    #[arg(long, default_value_t = false)]
    pub(crate) smoker: bool,
    #[arg(long, default_value_t = false)]
    pub(crate) alcohol: bool,
    #[arg(long, default_value_t = false)]
    pub(crate) inactive: bool,
    /// Print the request body instead of sending it.
    #[arg(long, default_value_t = false)]
    pub(crate) dry_run: bool,
}

impl PredictArgs {
    pub(crate) fn to_form(&self) -> AssessmentForm {
        AssessmentForm::default()
            .with(Field::Age, self.age.clone().unwrap_or_default())
            .with(Field::Gender, Gender::from(self.gender).code())
            .with(Field::Height, self.height.clone().unwrap_or_default())
            .with(Field::Weight, self.weight.clone().unwrap_or_default())
            .with(Field::ApHi, self.systolic.clone().unwrap_or_default())
            .with(Field::ApLo, self.diastolic.clone().unwrap_or_default())
            .with(Field::Cholesterol, Level::from(self.cholesterol).code())
            .with(Field::Gluc, Level::from(self.glucose).code())
            .with(Field::Smoke, flag_code(self.smoker))
            .with(Field::Alco, flag_code(self.alcohol))
            .with(Field::Active, flag_code(!self.inactive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_defaults_match_the_form() {
        let args = Args::try_parse_from(["cardio-intake", "predict"]).expect("parse");
        let Some(Command::Predict(predict)) = args.command else {
            panic!("expected predict subcommand");
        };
        assert_eq!(predict.to_form(), AssessmentForm::default());
    }

    #[test]
    fn predict_flags_fill_the_form() {
        let args = Args::try_parse_from([
            "cardio-intake",
            "--api-url",
            "http://model:9000",
            "predict",
            "--age",
            "58",
            "--gender",
            "male",
            "--height",
            "168",
            "--weight",
            "90",
            "--systolic",
            "150",
            "--diastolic",
            "95",
            "--cholesterol",
            "well-above-normal",
            "--smoker",
            "--inactive",
        ])
        .expect("parse");
        assert_eq!(args.api_url.as_deref(), Some("http://model:9000"));
        let Some(Command::Predict(predict)) = args.command else {
            panic!("expected predict subcommand");
        };
        let form = predict.to_form();
        assert_eq!(form.age, "58");
        assert_eq!(form.gender, "2");
        assert_eq!(form.cholesterol, "3");
        assert_eq!(form.gluc, "1");
        assert_eq!(form.smoke, "1");
        assert_eq!(form.alco, "0");
        assert_eq!(form.active, "0");
    }
}
