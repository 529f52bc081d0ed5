//! Control panel widget - base octave, velocity and channel of each manual

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use klaviatur::{Manual, PerformanceState, Snapshot};

/// Keys that control one manual, as (octave, velocity, modifier) hints
fn key_hints(manual: Manual) -> (&'static str, &'static str, &'static str) {
    match manual {
        Manual::Lower => ("F1 F2", "F3 F4", "Ctrl"),
        Manual::Upper => ("F5 F6", "F7 F8", "Alt"),
    }
}

fn voice_lines(manual: Manual, state: &PerformanceState) -> Vec<Line<'static>> {
    let (octave_keys, velocity_keys, modifier) = key_hints(manual);
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::LightGreen);
    let hint = Style::default().fg(Color::DarkGray);

    vec![
        Line::from(vec![
            Span::styled(" Base octave ", label),
            Span::styled(format!("{:>4}", state.base_octave()), value),
            Span::styled(format!("  [{}]", octave_keys), hint),
        ]),
        Line::from(vec![
            Span::styled(" Velocity    ", label),
            Span::styled(format!(" {:03}", state.velocity()), value),
            Span::styled(format!("  [{}]", velocity_keys), hint),
        ]),
        Line::from(vec![
            Span::styled(" Channel     ", label),
            Span::styled(format!("  {:02}", state.channel()), value),
            Span::styled(format!("  [{}+0-9 + -]", modifier), hint),
        ]),
    ]
}

/// Render both manuals' controls side by side, lower on the left
pub fn render_panel(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (manual, half) in Manual::ALL.into_iter().zip(halves.iter()) {
        let held = snapshot.keyboard.count(manual);
        let block = Block::default()
            .title(format!(" {} - {} held ", manual.name(), held))
            .borders(Borders::ALL);
        let paragraph = Paragraph::new(voice_lines(manual, snapshot.voice(manual))).block(block);
        frame.render_widget(paragraph, *half);
    }
}
