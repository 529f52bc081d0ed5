//! Keyboard widget - both manuals, sounding keys highlighted

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use klaviatur::{KeyLayout, LogicalKey, Manual, Snapshot};

/// Characters per white key, including the gap after it
const WHITE_WIDTH: usize = 4;

fn key_style(white: bool, sounding: bool) -> Style {
    if sounding {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else if white {
        Style::default().fg(Color::Black).bg(Color::White)
    } else {
        Style::default().fg(Color::Red).bg(Color::Black)
    }
}

fn key_cell(layout: &KeyLayout, snapshot: &Snapshot, key: LogicalKey) -> Span<'static> {
    let white = key.slot().is_white();
    let sounding = snapshot.keyboard.is_sounding(key);
    Span::styled(format!(" {} ", layout.label(key)), key_style(white, sounding))
}

/// Two rows for one manual: black keys offset half a key to the right of
/// the white keys they follow. Duplicate slots leave a hole.
fn manual_lines(manual: Manual, snapshot: &Snapshot, layout: &KeyLayout) -> [Line<'static>; 2] {
    let keys: Vec<LogicalKey> = manual.keys().collect();
    let blank = " ".repeat(WHITE_WIDTH);

    let mut black = vec![Span::raw("  ")];
    let mut white = Vec::new();

    for (position, &key) in keys.iter().enumerate() {
        if !key.slot().is_white() {
            continue;
        }
        white.push(key_cell(layout, snapshot, key));
        white.push(Span::raw(" "));

        match keys.get(position + 1) {
            Some(&next) if !next.slot().is_duplicate() => {
                black.push(key_cell(layout, snapshot, next));
                black.push(Span::raw(" "));
            }
            _ => black.push(Span::raw(blank.clone())),
        }
    }

    [Line::from(black), Line::from(white)]
}

/// Render the upper manual above the lower one, as on the physical keyboard
pub fn render_keyboard(frame: &mut Frame, area: Rect, snapshot: &Snapshot, layout: &KeyLayout) {
    let block = Block::default().title(" Keyboard ").borders(Borders::ALL);

    let [upper_black, upper_white] = manual_lines(Manual::Upper, snapshot, layout);
    let [lower_black, lower_white] = manual_lines(Manual::Lower, snapshot, layout);
    let lines = vec![
        upper_black,
        upper_white,
        Line::from(""),
        lower_black,
        lower_white,
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
