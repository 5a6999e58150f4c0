#![forbid(unsafe_code)]

//! The interactive demo: a crossterm event loop around a
//! [`TimelineStore`], redrawn through [`gantt_tui`] whenever the store
//! reports changes.

use std::io::{self, Write};
use std::mem;
use std::time::Duration;

use chrono::TimeDelta;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use gantt_core::{ChartLayout, Rgba};
use gantt_store::{DragKind, DragSession, Task, TaskId, TimelineError, TimelineStore};
use gantt_tui::ChartRenderer;

use crate::cli::Opts;

/// Bar colors for synthesized tasks, matching the builtin demo's
/// palette family.
const PALETTE: [Rgba; 6] = [
    Rgba::rgb(0x4E, 0x79, 0xA7),
    Rgba::rgb(0xF2, 0x8E, 0x2B),
    Rgba::rgb(0xE1, 0x57, 0x59),
    Rgba::rgb(0x76, 0xB7, 0xB2),
    Rgba::rgb(0x59, 0xA1, 0x4F),
    Rgba::rgb(0xED, 0xC9, 0x49),
];

/// Build the store the demo runs on.
pub fn build_store(opts: &Opts) -> Result<TimelineStore, TimelineError> {
    match opts.tasks {
        Some(n) => synthesize(n),
        None => Ok(TimelineStore::demo()),
    }
}

/// `n` staggered tasks inside the builtin demo's one-month window.
fn synthesize(n: usize) -> Result<TimelineStore, TimelineError> {
    let view = TimelineStore::demo().view();
    let base = view.start();
    let mut tasks = Vec::with_capacity(n);
    for i in 0..n {
        let id = TaskId::new(i as u64 + 1)?;
        // Offsets stay inside a few weeks, so the adds cannot overflow.
        let start = base + TimeDelta::days((i * 3 % 24) as i64);
        let end = start + TimeDelta::days(3 + (i % 9) as i64);
        tasks.push(Task::new(
            id,
            format!("Task {}", i + 1),
            start,
            end,
            PALETTE[i % PALETTE.len()],
        )?);
    }
    TimelineStore::new(tasks, view, ChartLayout::default())
}

/// Run the interactive loop until the user quits.
///
/// The terminal is put into raw mode on an alternate screen and
/// restored on the way out, whether the loop finished cleanly or not.
pub fn run(store: TimelineStore, opts: &Opts) -> io::Result<()> {
    let mut app = App::new(store, opts);
    let mut stdout = io::stdout();

    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let result = event_loop(&mut app, &mut stdout);
    execute!(stdout, Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn event_loop(app: &mut App, out: &mut impl Write) -> io::Result<()> {
    while !app.quit {
        if app.should_redraw() {
            app.draw(out)?;
        }
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Resize(..) => app.needs_redraw = true,
                _ => {}
            }
        }
    }
    Ok(())
}

struct App {
    store: TimelineStore,
    selected: usize,
    ascii: bool,
    width: Option<u16>,
    status: Option<String>,
    quit: bool,
    needs_redraw: bool,
}

impl App {
    fn new(store: TimelineStore, opts: &Opts) -> Self {
        Self {
            store,
            selected: 0,
            ascii: opts.ascii,
            width: opts.width,
            status: None,
            quit: false,
            // Paint once before the first event arrives.
            needs_redraw: true,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Left => self.pan(-1.0),
            KeyCode::Right => self.pan(1.0),
            KeyCode::Up => self.pan(-7.0),
            KeyCode::Down => self.pan(7.0),
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom(1.25),
            KeyCode::Char('-') => self.zoom(0.8),
            KeyCode::Tab => self.select_next(),
            KeyCode::Char('h') => self.nudge(DragKind::Move, -1.0),
            KeyCode::Char('l') => self.nudge(DragKind::Move, 1.0),
            KeyCode::Char('H') => self.nudge(DragKind::ResizeEnd, -1.0),
            KeyCode::Char('L') => self.nudge(DragKind::ResizeEnd, 1.0),
            _ => {}
        }
    }

    fn pan(&mut self, days: f64) {
        let result = self.store.pan(days);
        self.report(result);
    }

    fn zoom(&mut self, factor: f64) {
        let result = self.store.zoom(factor).map(|_| ());
        self.report(result);
    }

    fn select_next(&mut self) {
        let len = self.store.tasks().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
            self.needs_redraw = true;
        }
    }

    /// Move or resize the selected task by whole days through a
    /// one-shot drag session.
    fn nudge(&mut self, kind: DragKind, days: f64) {
        let Some(task) = self.store.tasks().get(self.selected) else {
            return;
        };
        let id = task.id;
        let pixels = days * self.store.time_scale().pixels_per_day();
        let result = DragSession::begin(&self.store, id, kind, 0.0)
            .and_then(|drag| drag.update(&mut self.store, pixels))
            .map(|_| ());
        self.report(result);
    }

    fn report(&mut self, result: Result<(), TimelineError>) {
        match result {
            Ok(()) => {
                if self.status.take().is_some() {
                    self.needs_redraw = true;
                }
            }
            Err(e) => {
                self.status = Some(e.to_string());
                self.needs_redraw = true;
            }
        }
    }

    /// True when the store changed or the app flagged a repaint.
    fn should_redraw(&mut self) -> bool {
        let dirty = !self.store.take_dirty().is_empty();
        let flagged = mem::take(&mut self.needs_redraw);
        dirty || flagged
    }

    fn render_width(&self) -> u16 {
        self.width
            .or_else(|| terminal::size().ok().map(|(cols, _)| cols))
            .unwrap_or(80)
    }

    fn status_line(&self) -> String {
        if let Some(status) = &self.status {
            return format!("! {status}");
        }
        let view = self.store.view();
        format!(
            "{} .. {}  zoom {:.2}x  arrows pan  +/- zoom  tab select  h/l move  H/L resize  q quit",
            view.start().format("%Y-%m-%d"),
            view.end().format("%Y-%m-%d"),
            self.store.zoom_level()
        )
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let surface = ChartRenderer::new()
            .ascii(self.ascii)
            .selected(Some(self.selected))
            .render(&self.store, self.render_width() as usize);

        queue!(out, Clear(ClearType::All))?;
        for (row, line) in surface.to_ansi_lines().iter().enumerate() {
            let Ok(row) = u16::try_from(row) else { break };
            queue!(out, MoveTo(0, row), Print(line))?;
        }
        let status_row = u16::try_from(surface.height()).unwrap_or(u16::MAX);
        queue!(out, MoveTo(0, status_row), Print(self.status_line()))?;
        out.flush()
    }
}
