use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use super::app::{AppState, Tab};
use crate::state::{Action, Effect};

/// Returns true when the app should exit.
pub(crate) fn handle_key_event(
    key: KeyEvent,
    app: &mut AppState,
    effect_tx: &mpsc::Sender<Effect>,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.intake.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.apply(Action::DismissAlert, effect_tx);
        }
        return false;
    }

    if app.confirm_quit {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Esc => {
                app.confirm_quit = false;
                return false;
            }
            _ => {
                app.confirm_quit = false;
            }
        }
    }

    match key.code {
        KeyCode::Tab => {
            app.set_tab(app.tab.next());
            return false;
        }
        KeyCode::BackTab => {
            app.set_tab(app.tab.prev());
            return false;
        }
        _ => {}
    }

    match app.tab {
        Tab::Predictor => handle_predictor_key(key, app, effect_tx),
        Tab::Process => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
                app.confirm_quit = true;
            }
        }
        Tab::Faq => handle_faq_key(key, app),
    }
    false
}

fn handle_predictor_key(key: KeyEvent, app: &mut AppState, effect_tx: &mpsc::Sender<Effect>) {
    let field = app.focused_field();
    match (key.code, field) {
        (KeyCode::Up, _) => app.focus_prev(),
        (KeyCode::Down, _) => app.focus_next(),
        (KeyCode::Enter, None) => app.apply(Action::Submit, effect_tx),
        (KeyCode::Enter, Some(_)) => app.focus_next(),
        (KeyCode::Left, Some(field)) if field.is_select() => app.apply(
            Action::CycleOption {
                field,
                forward: false,
            },
            effect_tx,
        ),
        (KeyCode::Right | KeyCode::Char(' '), Some(field)) if field.is_select() => app.apply(
            Action::CycleOption {
                field,
                forward: true,
            },
            effect_tx,
        ),
        (KeyCode::Backspace, Some(field)) if !field.is_select() => {
            let mut value = app.intake.form.get(field).to_string();
            if value.pop().is_some() {
                app.apply(Action::Edit { field, value }, effect_tx);
            }
        }
        (KeyCode::Char(ch), Some(field))
            if !field.is_select() && !key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            let mut value = app.intake.form.get(field).to_string();
            value.push(ch);
            app.apply(Action::Edit { field, value }, effect_tx);
        }
        (KeyCode::Char('q') | KeyCode::Char('Q'), _) => app.confirm_quit = true,
        _ => {}
    }
}

fn handle_faq_key(key: KeyEvent, app: &mut AppState) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.faq_next(),
        KeyCode::Up | KeyCode::Char('k') => app.faq_prev(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_faq(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.confirm_quit = true,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CONNECTION_ALERT;
    use cardio_protocol::Field;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut AppState, tx: &mpsc::Sender<Effect>, text: &str) {
        for ch in text.chars() {
            handle_key_event(press(KeyCode::Char(ch)), app, tx);
        }
    }

    #[test]
    fn typing_fills_only_the_focused_field() {
        let mut app = AppState::new("http://localhost:8000");
        let (tx, _rx) = mpsc::channel(1);
        type_text(&mut app, &tx, "52");
        handle_key_event(press(KeyCode::Backspace), &mut app, &tx);
        type_text(&mut app, &tx, "7");
        assert_eq!(app.intake.form.age, "57");
        assert_eq!(app.intake.form.gender, "1");
        assert!(app.intake.form.height.is_empty());
    }

    #[test]
    fn q_is_text_inside_a_numeric_field() {
        let mut app = AppState::new("http://localhost:8000");
        let (tx, _rx) = mpsc::channel(1);
        assert!(!handle_key_event(press(KeyCode::Char('q')), &mut app, &tx));
        assert_eq!(app.intake.form.age, "q");
        assert!(!app.confirm_quit);
    }

    #[test]
    fn arrows_cycle_selectors() {
        let mut app = AppState::new("http://localhost:8000");
        let (tx, _rx) = mpsc::channel(1);
        handle_key_event(press(KeyCode::Down), &mut app, &tx);
        assert_eq!(app.focused_field(), Some(Field::Gender));
        handle_key_event(press(KeyCode::Right), &mut app, &tx);
        assert_eq!(app.intake.form.gender, "2");
        handle_key_event(press(KeyCode::Char('x')), &mut app, &tx);
        assert_eq!(app.intake.form.gender, "2");
    }

    #[test]
    fn enter_on_button_submits_once() {
        let mut app = AppState::new("http://localhost:8000");
        let (tx, mut rx) = mpsc::channel(4);
        handle_key_event(press(KeyCode::Up), &mut app, &tx);
        handle_key_event(press(KeyCode::Enter), &mut app, &tx);
        handle_key_event(press(KeyCode::Enter), &mut app, &tx);
        assert!(app.intake.loading);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err(), "second press is ignored while loading");
    }

    #[test]
    fn alert_swallows_keys_until_dismissed() {
        let mut app = AppState::new("http://localhost:8000");
        let (tx, _rx) = mpsc::channel(1);
        app.intake.alert = Some(CONNECTION_ALERT.to_string());
        handle_key_event(press(KeyCode::Char('9')), &mut app, &tx);
        assert!(app.intake.form.age.is_empty());
        handle_key_event(press(KeyCode::Esc), &mut app, &tx);
        assert!(app.intake.alert.is_none());
    }

    #[test]
    fn quit_needs_confirmation() {
        let mut app = AppState::new("http://localhost:8000");
        let (tx, _rx) = mpsc::channel(1);
        app.set_tab(Tab::Faq);
        assert!(!handle_key_event(press(KeyCode::Char('q')), &mut app, &tx));
        assert!(app.confirm_quit);
        assert!(handle_key_event(press(KeyCode::Char('q')), &mut app, &tx));
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = AppState::new("http://localhost:8000");
        let (tx, _rx) = mpsc::channel(1);
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key_event(key, &mut app, &tx));
    }
}
