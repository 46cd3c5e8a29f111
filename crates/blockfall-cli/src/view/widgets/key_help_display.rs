use blockfall_engine::GameMode;
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Keys that trigger one action.
#[derive(Debug, Clone, Copy)]
struct KeyHint {
    keys: &'static [&'static str],
    action: &'static str,
}

const fn hint(keys: &'static [&'static str], action: &'static str) -> KeyHint {
    KeyHint { keys, action }
}

const ACTIVE_HINTS: &[KeyHint] = &[
    hint(&["←", "h"], "Left"),
    hint(&["→", "l"], "Right"),
    hint(&["↓", "j"], "Soft Drop"),
    hint(&["↑", "k", "x"], "Rotate"),
    hint(&["Space"], "Hard Drop"),
    hint(&["p"], "Pause"),
    hint(&["n", "r"], "New"),
    hint(&["q", "Esc"], "Quit"),
];
const PAUSED_HINTS: &[KeyHint] = &[
    hint(&["p"], "Resume"),
    hint(&["n", "r"], "New"),
    hint(&["q", "Esc"], "Quit"),
];
const GAME_OVER_HINTS: &[KeyHint] = &[hint(&["n", "r"], "New"), hint(&["q", "Esc"], "Quit")];

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const ACTION_STYLE: Style = Style::new().fg(Color::White);

impl KeyHint {
    fn spans(self) -> impl Iterator<Item = Span<'static>> {
        let keys = self.keys.iter().enumerate().flat_map(|(i, &key)| {
            let separator = (i > 0).then(|| Span::styled("/", SEPARATOR_STYLE));
            separator.into_iter().chain([Span::styled(key, KEY_STYLE)])
        });
        keys.chain([Span::raw(" "), Span::styled(self.action, ACTION_STYLE)])
    }
}

/// Centered help bar listing the keys that do something in the current mode.
#[derive(Debug)]
pub struct KeyHelpDisplay {
    mode: GameMode,
}

impl KeyHelpDisplay {
    pub fn new(mode: GameMode) -> Self {
        Self { mode }
    }

    fn hints(&self) -> &'static [KeyHint] {
        match self.mode {
            GameMode::Active => ACTIVE_HINTS,
            GameMode::Paused => PAUSED_HINTS,
            GameMode::GameOver => GAME_OVER_HINTS,
        }
    }
}

impl Widget for KeyHelpDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<_> = self
            .hints()
            .iter()
            .enumerate()
            .flat_map(|(i, hint)| {
                let separator = (i > 0).then(|| Span::styled(" | ", SEPARATOR_STYLE));
                separator.into_iter().chain(hint.spans())
            })
            .collect();
        Line::from(spans).centered().render(area, buf);
    }
}
