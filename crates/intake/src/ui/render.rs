use cardio_protocol::Field;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{BarChart, Clear, Paragraph, Tabs, Wrap};

use super::app::{AppState, Tab, ANALYZE_SLOT};
use super::content;
use super::text::{pad_right, tail_with_ellipsis};
use super::theme::{Theme, ValueStyle};

const LABEL_WIDTH: usize = 16;

pub(crate) fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let theme = Theme::dark();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.area());

    draw_header(frame, app, &theme, chunks[0]);
    match app.tab {
        Tab::Predictor => draw_predictor(frame, app, &theme, chunks[1]),
        Tab::Process => draw_process(frame, &theme, chunks[1]),
        Tab::Faq => draw_faq(frame, app, &theme, chunks[1]),
    }
    draw_footer(frame, app, &theme, chunks[2]);

    if let Some(alert) = app.intake.alert.as_deref() {
        draw_alert(frame, &theme, alert);
    }
}

fn draw_header(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let titles = Tab::ALL
        .iter()
        .map(|tab| Line::from(tab.title()))
        .collect::<Vec<_>>();
    let selected = Tab::ALL.iter().position(|tab| *tab == app.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(theme.block(content::BRAND))
        .select(selected)
        .style(theme.value_style(ValueStyle::Dim))
        .highlight_style(theme.accent_style());
    frame.render_widget(tabs, area);
}

fn draw_predictor(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(6)])
        .split(body[0]);

    let mut hero = vec![
        Line::styled(content::HERO_BADGE, theme.accent_style()),
        Line::from(""),
        Line::styled(content::HERO_TITLE, theme.value_style(ValueStyle::Important)),
        Line::styled(content::HERO_TITLE_ACCENT, theme.accent_style()),
        Line::from(""),
        Line::styled(content::HERO_BODY, theme.value_style(ValueStyle::Normal)),
        Line::from(""),
    ];
    hero.push(Line::from(
        content::HERO_BADGES
            .iter()
            .map(|badge| Span::styled(format!("[+] {badge}  "), theme.key_style()))
            .collect::<Vec<_>>(),
    ));
    let hero = Paragraph::new(hero)
        .block(theme.block("Cardiovascular Risk"))
        .wrap(Wrap { trim: true });
    frame.render_widget(hero, left[0]);

    draw_result(frame, app, theme, left[1]);
    draw_form(frame, app, theme, body[1]);
}

fn draw_result(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let widget = match app.intake.result {
        Some(risk) => Paragraph::new(vec![
            Line::styled(risk.title(), theme.risk_style(risk)),
            Line::styled(risk.message(), theme.value_style(ValueStyle::Normal)),
        ])
        .block(theme.risk_block("Result", risk)),
        None => Paragraph::new(Line::styled(
            "no assessment yet",
            theme.value_style(ValueStyle::Dim),
        ))
        .block(theme.block("Result")),
    };
    frame.render_widget(widget.wrap(Wrap { trim: true }), area);
}

fn draw_form(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let block = theme.block(content::FORM_TITLE);
    let inner = block.inner(area);
    let value_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 4).max(1);

    let mut lines = vec![
        Line::styled(content::FORM_SUBTITLE, theme.value_style(ValueStyle::Dim)),
        Line::from(""),
    ];
    for (slot, field) in Field::ALL.into_iter().enumerate() {
        let focused = app.focus == slot;
        let marker = if focused { ">> " } else { "   " };
        let label = Span::styled(
            format!("{marker}{}", pad_right(field.label(), LABEL_WIDTH)),
            if focused {
                theme.accent_style()
            } else {
                theme.key_style()
            },
        );
        let value = field_value_span(app, theme, field, focused, value_width);
        lines.push(Line::from(vec![label, value]));
    }
    lines.push(Line::from(""));

    let button_text = if app.intake.loading {
        content::PROCESSING_LABEL
    } else {
        content::ANALYZE_LABEL
    };
    let button_style = if app.intake.loading {
        theme.value_style(ValueStyle::Dim)
    } else if app.focus == ANALYZE_SLOT {
        theme.highlight_style()
    } else {
        theme.accent_style()
    };
    lines.push(
        Line::from(Span::styled(format!("[ {button_text} ]"), button_style))
            .alignment(Alignment::Center),
    );

    let form = Paragraph::new(Text::from(lines)).block(block);
    frame.render_widget(form, area);
}

fn field_value_span(
    app: &AppState,
    theme: &Theme,
    field: Field,
    focused: bool,
    width: usize,
) -> Span<'static> {
    let style = if focused {
        theme.highlight_style()
    } else {
        theme.value_style(ValueStyle::Normal)
    };
    if field.is_select() {
        let label = app.intake.form.selected_label(field).unwrap_or("Select");
        return Span::styled(format!("< {label} >"), style);
    }
    let raw = app.intake.form.get(field);
    if raw.is_empty() {
        let text = if focused {
            "_".to_string()
        } else {
            field.placeholder().unwrap_or("").to_string()
        };
        let style = if focused {
            style
        } else {
            theme.value_style(ValueStyle::Dim)
        };
        return Span::styled(text, style);
    }
    let shown = tail_with_ellipsis(raw, width.saturating_sub(1));
    if focused {
        Span::styled(format!("{shown}_"), style)
    } else {
        Span::styled(shown, style)
    }
}

fn draw_process(frame: &mut ratatui::Frame, theme: &Theme, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Min(8),
        ])
        .split(area);

    let stat_cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);
    for (stat, cell) in content::STATS.iter().zip(stat_cells.iter()) {
        let widget = Paragraph::new(vec![
            Line::styled(stat.value, theme.accent_style()),
            Line::styled(stat.label, theme.value_style(ValueStyle::Dim)),
        ])
        .alignment(Alignment::Center)
        .block(theme.block(""));
        frame.render_widget(widget, *cell);
    }

    let step_area = theme.block("How It Works");
    let step_inner = step_area.inner(rows[1]);
    frame.render_widget(step_area, rows[1]);
    let step_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(step_inner);
    frame.render_widget(
        Paragraph::new(Line::styled(
            content::PROCESS_INTRO,
            theme.value_style(ValueStyle::Dim),
        )),
        step_rows[0],
    );
    let step_cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(step_rows[1]);
    for (step, cell) in content::PROCESS_STEPS.iter().zip(step_cells.iter()) {
        let widget = Paragraph::new(vec![
            Line::styled(step.title, theme.value_style(ValueStyle::Important)),
            Line::styled(step.body, theme.value_style(ValueStyle::Normal)),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(widget, *cell);
    }

    let info = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[2]);
    let mut notes = Vec::new();
    for (index, note) in content::PRESSURE_NOTES.iter().enumerate() {
        notes.push(Line::from(vec![
            Span::styled(format!("{} ", index + 1), theme.accent_style()),
            Span::styled(note.title, theme.value_style(ValueStyle::Important)),
        ]));
        notes.push(Line::styled(note.body, theme.value_style(ValueStyle::Normal)));
        notes.push(Line::from(""));
    }
    let notes = Paragraph::new(notes)
        .block(theme.block(content::PRESSURE_TITLE))
        .wrap(Wrap { trim: true });
    frame.render_widget(notes, info[0]);

    let bars = content::CHART_BARS
        .iter()
        .map(|value| ("", *value))
        .collect::<Vec<_>>();
    let chart = BarChart::default()
        .block(theme.block(content::CHART_TITLE))
        .data(bars.as_slice())
        .bar_width(3)
        .bar_gap(1)
        .max(100)
        .bar_style(theme.accent_style())
        .value_style(theme.highlight_style());
    frame.render_widget(chart, info[1]);
}

fn draw_faq(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let mut lines = Vec::new();
    for (index, entry) in content::FAQ.iter().enumerate() {
        let open = app.faq_open.get(index).copied().unwrap_or(false);
        let selected = app.faq_selected == index;
        let marker = if open { "v " } else { "> " };
        let style = if selected {
            theme.highlight_style()
        } else {
            theme.value_style(ValueStyle::Important)
        };
        lines.push(Line::styled(format!("{marker}{}", entry.question), style));
        if open {
            lines.push(Line::styled(
                format!("  {}", entry.answer),
                theme.value_style(ValueStyle::Normal),
            ));
        }
        lines.push(Line::from(""));
    }
    let faq = Paragraph::new(lines)
        .block(theme.block("Frequently Asked Questions"))
        .wrap(Wrap { trim: false });
    frame.render_widget(faq, area);
}

fn draw_footer(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let help = match app.tab {
        Tab::Predictor => "↑/↓=field  ←/→=choose  Enter=analyze  Tab=section  Q=quit  ",
        Tab::Process => "Tab=section  Q=quit  ",
        Tab::Faq => "↑/↓=select  Enter=expand  Tab=section  Q=quit  ",
    };
    let mut controls = vec![Span::styled(help, theme.help_style())];
    if app.confirm_quit {
        controls.push(Span::styled("press Q again to quit / Esc to stay  ", theme.warn_style()));
    }
    let about = Line::from(vec![
        Span::styled(content::FOOTER_DISCLAIMER, theme.value_style(ValueStyle::Dim)),
        Span::styled("  api: ", theme.key_style()),
        Span::styled(app.api_url.as_str(), theme.value_style(ValueStyle::Dim)),
    ]);
    let footer = Paragraph::new(vec![Line::from(controls), about])
        .block(theme.block(content::FOOTER_ABOUT));
    frame.render_widget(footer, area);
}

fn draw_alert(frame: &mut ratatui::Frame, theme: &Theme, alert: &str) {
    let area = centered_rect(60, 7, frame.area());
    let widget = Paragraph::new(vec![
        Line::styled(alert.to_string(), theme.value_style(ValueStyle::Important)),
        Line::from(""),
        Line::styled("Enter/Esc to dismiss", theme.help_style()),
    ])
    .block(theme.alert_block("Alert"))
    .wrap(Wrap { trim: true });
    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * percent_x as u32 / 100) as u16;
    let width = width.max(20).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Action, SubmitOutcome, CONNECTION_ALERT};
    use cardio_protocol::RiskClassification;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &mut AppState) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|frame| draw_ui(frame, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn completed(app: &mut AppState, outcome: SubmitOutcome) {
        app.dispatch(Action::Submit);
        let id = app.intake.submission;
        app.dispatch(Action::Completed { id, outcome });
    }

    #[test]
    fn landing_shows_form_without_result() {
        let mut app = AppState::new("http://localhost:8000");
        let screen = render(&mut app);
        assert!(screen.contains("Health Analysis"));
        assert!(screen.contains("Analyze My Risk"));
        assert!(screen.contains("Female"));
        assert!(screen.contains("no assessment yet"));
        assert!(!screen.contains("Attention Needed"));
        assert!(!screen.contains("Optimal Health"));
    }

    #[test]
    fn high_risk_shows_attention_needed() {
        let mut app = AppState::new("http://localhost:8000");
        completed(&mut app, SubmitOutcome::Risk(RiskClassification::High));
        let screen = render(&mut app);
        assert!(screen.contains("Attention Needed"));
        assert!(!screen.contains("Optimal Health"));
    }

    #[test]
    fn low_risk_shows_optimal_health() {
        let mut app = AppState::new("http://localhost:8000");
        completed(&mut app, SubmitOutcome::Risk(RiskClassification::Low));
        let screen = render(&mut app);
        assert!(screen.contains("Optimal Health"));
    }

    #[test]
    fn loading_swaps_button_label() {
        let mut app = AppState::new("http://localhost:8000");
        app.dispatch(Action::Submit);
        let screen = render(&mut app);
        assert!(screen.contains("Processing..."));
        assert!(!screen.contains("Analyze My Risk"));
    }

    #[test]
    fn failure_draws_alert_over_screen() {
        let mut app = AppState::new("http://localhost:8000");
        completed(&mut app, SubmitOutcome::Failed);
        let screen = render(&mut app);
        assert!(screen.contains("Alert"));
        assert!(screen.contains("Could not connect"));
        assert!(app.intake.alert.as_deref() == Some(CONNECTION_ALERT));
    }

    #[test]
    fn faq_answer_only_when_open() {
        let mut app = AppState::new("http://localhost:8000");
        app.set_tab(Tab::Faq);
        let closed = render(&mut app);
        assert!(closed.contains("Is this a medical diagnosis?"));
        assert!(!closed.contains("informational purposes"));
        app.toggle_faq();
        let open = render(&mut app);
        assert!(open.contains("informational purposes"));
    }

    #[test]
    fn process_tab_shows_stats() {
        let mut app = AppState::new("http://localhost:8000");
        app.set_tab(Tab::Process);
        let screen = render(&mut app);
        assert!(screen.contains("70k+"));
        assert!(screen.contains("Model Accuracy"));
        assert!(screen.contains("Data Entry"));
    }

    #[test]
    fn centered_rect_stays_inside() {
        let outer = Rect::new(0, 0, 30, 5);
        let rect = centered_rect(60, 7, outer);
        assert!(rect.width <= outer.width);
        assert!(rect.height <= outer.height);
    }
}
