//! Terminal key events -> engine input events.
//!
//! The terminal reports characters, not key positions, so characters are
//! mapped back to evdev codes through a US-QWERTY table. Shifted symbols
//! resolve to the key they are printed on, which keeps press and release
//! on the same code when shift changes in between.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, ModifierKeyCode,
};

use klaviatur::engine::{InputEvent, KeyInput, KeySymbol, KeyVector, Modifiers};
use klaviatur::{HostKeyTable, PhysicalCode};

const ESCAPE: u8 = 9;
const BACKSPACE: u8 = 22;
const TAB: u8 = 23;
const RETURN: u8 = 36;
const RIGHT_SHIFT: u8 = 62;
const KP_SUBTRACT: u8 = 82;
const KP_ADD: u8 = 86;
/// evdev codes for keypad 0..9
const KP_DIGITS: [u8; 10] = [90, 87, 88, 89, 83, 84, 85, 79, 80, 81];

fn function_key_code(number: u8) -> Option<u8> {
    match number {
        1..=10 => Some(66 + number),
        11 => Some(95),
        12 => Some(96),
        _ => None,
    }
}

/// The character printed on the same US key without shift
fn unshifted(c: char) -> char {
    match c {
        '!' => '1',
        '@' => '2',
        '#' => '3',
        '$' => '4',
        '%' => '5',
        '^' => '6',
        '&' => '7',
        '*' => '8',
        '(' => '9',
        ')' => '0',
        '_' => '-',
        '+' => '=',
        '{' => '[',
        '}' => ']',
        '|' => '\\',
        ':' => ';',
        '"' => '\'',
        '<' => ',',
        '>' => '.',
        '?' => '/',
        '~' => '`',
        c => c.to_ascii_lowercase(),
    }
}

fn char_symbol(c: char) -> KeySymbol {
    match c {
        '0'..='9' => KeySymbol::Digit(c as u8 - b'0'),
        '+' | '=' => KeySymbol::Plus,
        '-' => KeySymbol::Minus,
        _ => KeySymbol::Other,
    }
}

fn modifiers(key: &KeyEvent) -> Modifiers {
    Modifiers {
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
        control: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
    }
}

pub struct HostKeymap {
    table: HostKeyTable,
}

impl HostKeymap {
    pub fn new(table: HostKeyTable) -> Self {
        Self { table }
    }

    fn resolve(&self, key: &KeyEvent) -> Option<(PhysicalCode, KeySymbol)> {
        let keypad = key.state.contains(KeyEventState::KEYPAD);
        let (code, symbol) = match key.code {
            KeyCode::Esc => (ESCAPE, KeySymbol::Escape),
            KeyCode::Tab | KeyCode::BackTab => (TAB, KeySymbol::Other),
            KeyCode::Backspace => (BACKSPACE, KeySymbol::Other),
            KeyCode::Enter if !keypad => (RETURN, KeySymbol::Other),
            KeyCode::F(number) => (function_key_code(number)?, KeySymbol::Function(number)),
            KeyCode::Modifier(ModifierKeyCode::RightShift) => (RIGHT_SHIFT, KeySymbol::Other),
            KeyCode::Char(c) if keypad => match c {
                '+' => (KP_ADD, KeySymbol::Plus),
                '-' => (KP_SUBTRACT, KeySymbol::Minus),
                '0'..='9' => {
                    let digit = c as u8 - b'0';
                    (KP_DIGITS[digit as usize], KeySymbol::Digit(digit))
                }
                _ => return None,
            },
            // '<' has its own key on ISO keyboards and is shift+',' on US ones
            KeyCode::Char('<') if !key.modifiers.contains(KeyModifiers::SHIFT) => {
                (self.table.code_for_label('<')?.0, KeySymbol::Other)
            }
            KeyCode::Char(c) => {
                let base = unshifted(c);
                (self.table.code_for_label(base)?.0, char_symbol(base))
            }
            _ => return None,
        };
        Some((PhysicalCode(code), symbol))
    }

    /// Translate one terminal event; `None` when it means nothing to the engine
    pub fn translate(&self, event: &Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Release
                    && key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
                {
                    return Some(InputEvent::CloseRequest);
                }

                let (code, symbol) = self.resolve(key)?;
                let input = KeyInput::new(code, symbol, modifiers(key));
                Some(match key.kind {
                    // repeats are deduplicated by the engine
                    KeyEventKind::Press | KeyEventKind::Repeat => InputEvent::KeyPress(input),
                    KeyEventKind::Release => InputEvent::KeyRelease(input),
                })
            }
            // keys released while unfocused are never reported
            Event::FocusLost => Some(InputEvent::KeymapSync(KeyVector::empty())),
            _ => None,
        }
    }
}
