use std::time::Instant;

use blockfall_engine::{Command, GameSession};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    tui::{App, Tui},
    view::widgets::{KeyHelpDisplay, SessionDisplay},
};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Game(Command),
    Quit,
}

fn input_for_key(key: &KeyEvent) -> Option<Input> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Input::Quit);
    }
    let command = match key.code {
        KeyCode::Left | KeyCode::Char('h') => Command::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') => Command::MoveRight,
        KeyCode::Down | KeyCode::Char('j') => Command::SoftDrop,
        KeyCode::Up | KeyCode::Char('k' | 'x') => Command::Rotate,
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('p') => Command::TogglePause,
        KeyCode::Char('n' | 'r') => Command::NewGame,
        KeyCode::Char('q') | KeyCode::Esc => return Some(Input::Quit),
        _ => return None,
    };
    Some(Input::Game(command))
}

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    show_ghost: bool,
    frame_rate: f64,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, show_ghost: bool, frame_rate: f64) -> Self {
        Self {
            session,
            show_ghost,
            frame_rate,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_frame_rate(self.frame_rate);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, event: &Event, now: Instant) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        match input_for_key(&key) {
            Some(Input::Game(command)) => {
                self.session.handle(command, now);
            }
            Some(Input::Quit) => self.is_exiting = true,
            None => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.session.snapshot();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(SessionDisplay::new(&snapshot, self.show_ghost), main_area);
        frame.render_widget(KeyHelpDisplay::new(snapshot.mode), help_area);
    }

    fn next_tick_at(&self) -> Option<Instant> {
        self.session.next_tick_at()
    }

    fn update(&mut self, now: Instant) {
        self.session.update(now);
    }
}
