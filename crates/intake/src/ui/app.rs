use cardio_protocol::Field;
use tokio::sync::mpsc;
use tracing::warn;

use super::content::{FAQ, FAQ_COUNT};
use crate::state::{reduce, Action, Effect, IntakeState, SubmitOutcome};

/// Focus slot of the analyze button, right after the last form field.
pub(crate) const ANALYZE_SLOT: usize = Field::ALL.len();

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Tab {
    #[default]
    Predictor,
    Process,
    Faq,
}

impl Tab {
    pub(crate) const ALL: [Tab; 3] = [Tab::Predictor, Tab::Process, Tab::Faq];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Tab::Predictor => "Predictor",
            Tab::Process => "How it Works",
            Tab::Faq => "FAQ",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    pub(crate) fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub(crate) fn prev(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Screen state: the intake record plus what only the view cares about.
pub(crate) struct AppState {
    pub(crate) intake: IntakeState,
    pub(crate) api_url: String,
    pub(crate) tab: Tab,
    pub(crate) focus: usize,
    pub(crate) faq_open: [bool; FAQ_COUNT],
    pub(crate) faq_selected: usize,
    pub(crate) confirm_quit: bool,
}

impl AppState {
    pub(crate) fn new(api_url: impl Into<String>) -> Self {
        Self {
            intake: IntakeState::default(),
            api_url: api_url.into(),
            tab: Tab::default(),
            focus: 0,
            faq_open: [false; FAQ_COUNT],
            faq_selected: 0,
            confirm_quit: false,
        }
    }

    pub(crate) fn dispatch(&mut self, action: Action) -> Option<Effect> {
        let (next, effect) = reduce(&self.intake, action);
        self.intake = next;
        effect
    }

    /// Dispatches and hands any effect to the worker. If the worker is gone
    /// the submission fails right away instead of loading forever.
    pub(crate) fn apply(&mut self, action: Action, effect_tx: &mpsc::Sender<Effect>) {
        let Some(effect) = self.dispatch(action) else {
            return;
        };
        let Effect::Predict { id, .. } = &effect;
        let id = *id;
        if let Err(err) = effect_tx.try_send(effect) {
            warn!(submission = id, error = %err, "prediction worker unavailable");
            self.dispatch(Action::Completed {
                id,
                outcome: SubmitOutcome::Failed,
            });
        }
    }

    pub(crate) fn focused_field(&self) -> Option<Field> {
        Field::ALL.get(self.focus).copied()
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % (ANALYZE_SLOT + 1);
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focus = (self.focus + ANALYZE_SLOT) % (ANALYZE_SLOT + 1);
    }

    pub(crate) fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.confirm_quit = false;
    }

    pub(crate) fn faq_next(&mut self) {
        self.faq_selected = (self.faq_selected + 1) % FAQ.len();
    }

    pub(crate) fn faq_prev(&mut self) {
        self.faq_selected = (self.faq_selected + FAQ.len() - 1) % FAQ.len();
    }

    /// Items open and close independently.
    pub(crate) fn toggle_faq(&mut self) {
        if let Some(open) = self.faq_open.get_mut(self.faq_selected) {
            *open = !*open;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CONNECTION_ALERT;

    #[test]
    fn focus_wraps_through_button() {
        let mut app = AppState::new("http://localhost:8000");
        app.focus_prev();
        assert_eq!(app.focus, ANALYZE_SLOT);
        assert_eq!(app.focused_field(), None);
        app.focus_next();
        assert_eq!(app.focused_field(), Some(Field::Age));
    }

    #[test]
    fn tabs_cycle() {
        assert_eq!(Tab::Predictor.next(), Tab::Process);
        assert_eq!(Tab::Faq.next(), Tab::Predictor);
        assert_eq!(Tab::Predictor.prev(), Tab::Faq);
    }

    #[test]
    fn faq_items_toggle_independently() {
        let mut app = AppState::new("http://localhost:8000");
        app.toggle_faq();
        app.faq_next();
        app.toggle_faq();
        app.toggle_faq();
        assert_eq!(app.faq_open, [true, false, false, false]);
        app.faq_prev();
        app.faq_prev();
        assert_eq!(app.faq_selected, FAQ.len() - 1);
    }

    #[test]
    fn submit_forwards_effect() {
        let mut app = AppState::new("http://localhost:8000");
        let (effect_tx, mut effect_rx) = mpsc::channel(1);
        app.apply(Action::Submit, &effect_tx);
        assert!(app.intake.loading);
        assert!(matches!(
            effect_rx.try_recv(),
            Ok(Effect::Predict { id: 1, .. })
        ));
    }

    #[test]
    fn missing_worker_fails_the_submission() {
        let mut app = AppState::new("http://localhost:8000");
        let (effect_tx, effect_rx) = mpsc::channel(1);
        drop(effect_rx);
        app.apply(Action::Submit, &effect_tx);
        assert!(!app.intake.loading);
        assert_eq!(app.intake.alert.as_deref(), Some(CONNECTION_ALERT));
    }
}
