use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deckview_common::ViewerConfig;
use deckview_core::{
    input::{Key, TapTarget, TouchInput},
    DeckController, DeckEvent, DeckStatus, Input,
};
use futures::StreamExt;
use ratatui::{
    layout::Position,
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::surface::TerminalSurface;
use crate::widgets::{slide_text, NEXT_LABEL, PREV_LABEL};

const NOTES_HEIGHT: u16 = 5;
const FOOTER_HEIGHT: u16 = 3;

/// Screen regions from the last draw, used for mouse hit testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub deck: Rect,
    pub notes: Option<Rect>,
    pub footer: Rect,
    pub prev_button: Rect,
    pub progress: Rect,
    pub next_button: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Deck,
    PreviousButton,
    NextButton,
}

impl AppLayout {
    pub fn compute(area: Rect, show_notes: bool) -> Self {
        let notes_height = if show_notes { NOTES_HEIGHT } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(notes_height),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        let footer = chunks[2];
        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(PREV_LABEL.len() as u16),
                Constraint::Min(0),
                Constraint::Length(NEXT_LABEL.len() as u16),
            ])
            .split(Block::default().borders(Borders::ALL).inner(footer));

        Self {
            deck: chunks[0],
            notes: show_notes.then_some(chunks[1]),
            footer,
            prev_button: buttons[0],
            progress: buttons[1],
            next_button: buttons[2],
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let position = Position::new(column, row);
        if self.prev_button.contains(position) {
            Some(Hit::PreviousButton)
        } else if self.next_button.contains(position) {
            Some(Hit::NextButton)
        } else if self.deck.contains(position) {
            Some(Hit::Deck)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PointerState {
    pressed: Option<Hit>,
    dragged: bool,
}

pub struct DeckApp {
    controller: DeckController,
    surface: TerminalSurface,
    layout: AppLayout,
    pointer: PointerState,
    units_per_column: f64,
    show_notes: bool,
    loaded: bool,
    should_quit: bool,
}

impl DeckApp {
    pub fn new(config: &ViewerConfig, label: &str, fragment: Option<String>) -> Self {
        let controller = DeckController::with_swipe_threshold(label, config.swipe_threshold);
        let mut surface = TerminalSurface::new(fragment, config.location_file.clone());
        controller.begin(&mut surface);

        Self {
            controller,
            surface,
            layout: AppLayout::default(),
            pointer: PointerState::default(),
            units_per_column: config.units_per_column,
            show_notes: config.show_notes,
            loaded: false,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &DeckController {
        &self.controller
    }

    pub fn surface(&self) -> &TerminalSurface {
        &self.surface
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Deliver the outcome of the one load of this session.
    pub fn on_load(&mut self, event: DeckEvent) {
        self.loaded = true;
        self.controller.handle(event, &mut self.surface);
    }

    pub fn on_terminal_event(&mut self, event: Event) {
        let inputs = match event {
            Event::Key(key) => self.on_key(key).into_iter().collect(),
            Event::Mouse(mouse) => self.on_mouse(mouse),
            _ => Vec::new(),
        };
        for input in inputs {
            self.controller.dispatch(input, &mut self.surface);
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Option<Input> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let key = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Char('n') => {
                self.show_notes = !self.show_notes;
                return None;
            }
            KeyCode::Right => Key::Right,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Left => Key::Left,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => return None,
        };
        Some(Input::Key(key))
    }

    /// Presses and drags on the slide act as a one-finger touch; a press and
    /// release without a drag is a tap on whatever was pressed.
    fn on_mouse(&mut self, mouse: MouseEvent) -> Vec<Input> {
        let x = f64::from(mouse.column) * self.units_per_column;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self.layout.hit(mouse.column, mouse.row);
                self.pointer = PointerState {
                    pressed: hit,
                    dragged: false,
                };
                match hit {
                    Some(Hit::Deck) => vec![Input::Touch(TouchInput::Start { x, fingers: 1 })],
                    _ => Vec::new(),
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.pointer.dragged = true;
                match self.pointer.pressed {
                    Some(Hit::Deck) => vec![Input::Touch(TouchInput::Move { x })],
                    _ => Vec::new(),
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let PointerState { pressed, dragged } = std::mem::take(&mut self.pointer);
                let mut inputs = Vec::new();
                if pressed == Some(Hit::Deck) {
                    inputs.push(Input::Touch(TouchInput::End));
                }
                if !dragged {
                    match pressed {
                        Some(Hit::Deck) => inputs.push(Input::Tap(TapTarget::content())),
                        Some(Hit::PreviousButton) => inputs.push(Input::PreviousButton),
                        Some(Hit::NextButton) => inputs.push(Input::NextButton),
                        None => {}
                    }
                }
                inputs
            }
            _ => Vec::new(),
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        self.layout = AppLayout::compute(f.area(), self.show_notes);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.controller.label()));
        if let Some(location) = self.surface.location() {
            block = block.title(Line::from(format!(" {location} ")).right_aligned());
        }
        let slide = Paragraph::new(slide_text(self.surface.content()))
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(slide, self.layout.deck);

        if let Some(area) = self.layout.notes {
            let notes = Paragraph::new(self.surface.speaker_notes().to_string())
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL).title("Speaker notes"))
                .wrap(Wrap { trim: true });
            f.render_widget(notes, area);
        }

        let footer = Block::default()
            .borders(Borders::ALL)
            .title_bottom(Line::from("←/→ PgUp/PgDn Home/End | n notes | q quit").centered());
        f.render_widget(footer, self.layout.footer);

        let (can_prev, can_next) = self.navigable();
        f.render_widget(button(PREV_LABEL, can_prev), self.layout.prev_button);
        f.render_widget(
            Paragraph::new(self.surface.progress().to_string()).alignment(Alignment::Center),
            self.layout.progress,
        );
        f.render_widget(button(NEXT_LABEL, can_next), self.layout.next_button);
    }

    fn navigable(&self) -> (bool, bool) {
        match (self.controller.status(), self.controller.index()) {
            (DeckStatus::Ready, Some(index)) => {
                let len = self.controller.deck().len();
                (index > 0, index + 1 < len)
            }
            _ => (false, false),
        }
    }

    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        loads: &mut UnboundedReceiver<DeckEvent>,
    ) -> Result<()> {
        let mut events = EventStream::new();

        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                Some(event) = loads.recv(), if !self.loaded => {
                    self.on_load(event);
                }
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.on_terminal_event(event),
                        Some(Err(e)) => return Err(e.into()),
                        None => break,
                    }
                }
            }
        }

        Ok(())
    }
}

fn button(label: &'static str, enabled: bool) -> Paragraph<'static> {
    let style = if enabled {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Paragraph::new(label).style(style)
}

/// Take over the terminal, run until the user quits, then restore it.
pub async fn run_app(mut app: DeckApp, mut loads: UnboundedReceiver<DeckEvent>) -> Result<()> {
    enable_raw_mode()?;
    let result = drive(&mut app, &mut loads).await;
    let restored = restore_terminal();
    result?;
    restored
}

async fn drive(app: &mut DeckApp, loads: &mut UnboundedReceiver<DeckEvent>) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    app.event_loop(&mut terminal, loads).await
}

/// Every step runs even if an earlier one fails.
fn restore_terminal() -> Result<()> {
    let mut stdout = io::stdout();
    first_error([
        disable_raw_mode(),
        execute!(stdout, LeaveAlternateScreen),
        execute!(stdout, DisableMouseCapture),
        execute!(stdout, cursor::Show),
    ])
    .map_err(|e| {
        tracing::warn!("terminal restore incomplete: {e}");
        e.into()
    })
}

fn first_error<const N: usize>(steps: [io::Result<()>; N]) -> io::Result<()> {
    steps.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use deckview_common::Slide;
    use deckview_core::Deck;
    use ratatui::backend::TestBackend;

    fn deck(count: usize) -> Deck {
        Deck::from_slides(
            (0..count)
                .map(|i| Slide {
                    title: Some(format!("Slide {i}")),
                    bullets: vec![format!("point {i}")],
                    speaker: Some(format!("say {i}")),
                    ..Slide::default()
                })
                .collect(),
        )
    }

    fn ready_app(count: usize) -> DeckApp {
        let mut app = DeckApp::new(&ViewerConfig::default(), "content.json", None);
        app.on_load(DeckEvent::LoadSucceeded(deck(count)));
        app
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn render(app: &mut DeckApp, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_layout_hit_testing() {
        let layout = AppLayout::compute(Rect::new(0, 0, 80, 24), true);
        assert_eq!(layout.footer.height, FOOTER_HEIGHT);
        assert_eq!(layout.notes.map(|r| r.height), Some(NOTES_HEIGHT));
        assert_eq!(layout.hit(5, 5), Some(Hit::Deck));
        assert_eq!(layout.hit(layout.prev_button.x, layout.prev_button.y), Some(Hit::PreviousButton));
        assert_eq!(layout.hit(layout.next_button.x, layout.next_button.y), Some(Hit::NextButton));
        assert_eq!(layout.hit(40, layout.footer.y), None);

        let without_notes = AppLayout::compute(Rect::new(0, 0, 80, 24), false);
        assert_eq!(without_notes.notes, None);
        assert_eq!(without_notes.deck.height, 24 - FOOTER_HEIGHT);
    }

    #[test]
    fn test_draw_shows_slide_progress_and_notes() {
        let mut app = ready_app(3);
        let screen = render(&mut app, 60, 20);
        assert!(screen.contains("Slide 0"));
        assert!(screen.contains("point 0"));
        assert!(screen.contains("1 / 3"));
        assert!(screen.contains("say 0"));
        assert!(screen.contains("#slide-1"));
        assert!(screen.contains(PREV_LABEL));
    }

    #[test]
    fn test_draw_loading_and_empty_messages() {
        let mut app = DeckApp::new(&ViewerConfig::default(), "content.json", None);
        assert!(render(&mut app, 60, 20).contains("Loading content.json"));

        app.on_load(DeckEvent::LoadSucceeded(Deck::default()));
        assert!(render(&mut app, 60, 20).contains("No slides found in content.json"));
    }

    #[test]
    fn test_keys_navigate_and_quit() {
        let mut app = ready_app(4);
        app.on_terminal_event(press(KeyCode::Right));
        app.on_terminal_event(press(KeyCode::PageDown));
        assert_eq!(app.controller().index(), Some(2));
        app.on_terminal_event(press(KeyCode::End));
        assert_eq!(app.controller().index(), Some(3));
        app.on_terminal_event(press(KeyCode::Home));
        assert_eq!(app.controller().index(), Some(0));
        assert!(!app.should_quit());
        app.on_terminal_event(press(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_notes_toggle() {
        let mut app = ready_app(2);
        app.on_terminal_event(press(KeyCode::Char('n')));
        let screen = render(&mut app, 60, 20);
        assert!(!screen.contains("Speaker notes"));
        assert_eq!(app.layout.notes, None);
    }

    #[test]
    fn test_click_on_slide_advances_and_buttons_navigate() {
        let mut app = ready_app(5);
        render(&mut app, 80, 24);

        app.on_terminal_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        app.on_terminal_event(mouse(MouseEventKind::Up(MouseButton::Left), 10, 5));
        assert_eq!(app.controller().index(), Some(1));

        let next = app.layout.next_button;
        app.on_terminal_event(mouse(MouseEventKind::Down(MouseButton::Left), next.x, next.y));
        app.on_terminal_event(mouse(MouseEventKind::Up(MouseButton::Left), next.x, next.y));
        assert_eq!(app.controller().index(), Some(2));

        let prev = app.layout.prev_button;
        app.on_terminal_event(mouse(MouseEventKind::Down(MouseButton::Left), prev.x, prev.y));
        app.on_terminal_event(mouse(MouseEventKind::Up(MouseButton::Left), prev.x, prev.y));
        assert_eq!(app.controller().index(), Some(1));
    }

    #[test]
    fn test_drag_swipes_once_without_tapping() {
        let mut app = ready_app(5);
        render(&mut app, 80, 24);

        // 8 units per column: 19 columns is 152 units
        app.on_terminal_event(mouse(MouseEventKind::Down(MouseButton::Left), 60, 5));
        for column in [55, 45, 41, 30, 10] {
            app.on_terminal_event(mouse(MouseEventKind::Drag(MouseButton::Left), column, 5));
        }
        app.on_terminal_event(mouse(MouseEventKind::Up(MouseButton::Left), 10, 5));
        assert_eq!(app.controller().index(), Some(1));

        app.on_terminal_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        app.on_terminal_event(mouse(MouseEventKind::Drag(MouseButton::Left), 40, 5));
        app.on_terminal_event(mouse(MouseEventKind::Up(MouseButton::Left), 40, 5));
        assert_eq!(app.controller().index(), Some(0));
    }

    #[test]
    fn test_restore_steps_report_first_failure() {
        assert!(first_error([Ok(()), Ok(()), Ok(())]).is_ok());

        let err = first_error([
            Ok(()),
            Err(io::Error::other("screen")),
            Err(io::Error::other("cursor")),
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "screen");
    }
}
