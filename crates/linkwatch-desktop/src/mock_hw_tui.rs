use std::io;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use linkwatch_core::state::IndicatorColor;
use log::{Level, LevelFilter, Metadata, Record};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};

/// Simulated hardware shared between the engine thread and the TUI.
#[derive(Clone, Debug, Default)]
pub struct MockHardwareState {
    /// Latched from the TUI; the simulator window can also hold a line active.
    pub signal_a: bool,
    pub signal_b: bool,
    pub lamp: IndicatorColor,
    /// (frequency, duty level) while the buzzer sounds
    pub tone: Option<(u32, u16)>,
    pub quit_requested: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    A,
    B,
}

// One captured log record
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
}

// Extension trait for log::Level to provide UI rendering methods
trait LevelExt {
    fn color(&self) -> Color;
    fn prefix(&self) -> &str;
}

impl LevelExt for Level {
    fn color(&self) -> Color {
        match *self {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Cyan,
            Level::Debug => Color::Gray,
            Level::Trace => Color::DarkGray,
        }
    }

    fn prefix(&self) -> &str {
        match *self {
            Level::Error => "[ERROR]",
            Level::Warn => "[WARN] ",
            Level::Info => "[INFO] ",
            Level::Debug => "[DEBUG]",
            Level::Trace => "[TRACE]",
        }
    }
}

enum TuiMessage {
    Log(LogEntry),
    Shutdown,
}

fn lock(state: &Mutex<MockHardwareState>) -> MutexGuard<'_, MockHardwareState> {
    // the state stays consistent field by field even if a holder panicked
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// TUI state
struct TuiState {
    hardware: Arc<Mutex<MockHardwareState>>,
    logs: Vec<LogEntry>,
    rx: Receiver<TuiMessage>,
    max_logs: usize,
    should_quit: bool,
}

impl TuiState {
    fn new(hardware: Arc<Mutex<MockHardwareState>>, rx: Receiver<TuiMessage>) -> Self {
        Self {
            hardware,
            logs: Vec::new(),
            rx,
            max_logs: 100,
            should_quit: false,
        }
    }

    fn collect_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                TuiMessage::Log(log) => {
                    self.logs.push(log);
                    if self.logs.len() > self.max_logs {
                        self.logs.remove(0);
                    }
                }
                TuiMessage::Shutdown => {
                    self.should_quit = true;
                }
            }
        }
    }

    fn toggle_signal(&mut self, signal: Signal) {
        let mut hardware = lock(&self.hardware);
        let line = match signal {
            Signal::A => &mut hardware.signal_a,
            Signal::B => &mut hardware.signal_b,
        };
        *line = !*line;
        log::info!("Signal {:?} latch {}", signal, if *line { "set" } else { "released" });
    }

    fn request_quit(&mut self) {
        lock(&self.hardware).quit_requested = true;
    }
}

// Logger implementation that sends logs to the TUI
pub struct TuiLogger {
    tx: Sender<TuiMessage>,
}

impl TuiLogger {
    fn new(tx: Sender<TuiMessage>) -> Self {
        Self { tx }
    }
}

impl log::Log for TuiLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let entry = LogEntry {
                level: record.level(),
                message: format!("{}", record.args()),
            };
            // Ignore send errors (TUI might have shut down)
            let _ = self.tx.send(TuiMessage::Log(entry));
        }
    }

    fn flush(&self) {}
}

/// Cheap clonable access to the simulated hardware for the peripheral
/// adapters.
#[derive(Clone)]
pub struct PanelHandle {
    hardware: Arc<Mutex<MockHardwareState>>,
}

impl PanelHandle {
    pub fn signal_latched(&self, signal: Signal) -> bool {
        let hardware = lock(&self.hardware);
        match signal {
            Signal::A => hardware.signal_a,
            Signal::B => hardware.signal_b,
        }
    }

    pub fn set_lamp(&self, color: IndicatorColor) {
        lock(&self.hardware).lamp = color;
    }

    pub fn set_tone(&self, tone: Option<(u32, u16)>) {
        lock(&self.hardware).tone = tone;
    }

    pub fn quit_requested(&self) -> bool {
        lock(&self.hardware).quit_requested
    }

    pub fn request_quit(&self) {
        lock(&self.hardware).quit_requested = true;
    }
}

// Public handle for the TUI
pub struct MockHwTui {
    hardware: Arc<Mutex<MockHardwareState>>,
    tx: Sender<TuiMessage>,
}

impl MockHwTui {
    pub fn new(max_level: LevelFilter) -> Result<Self, anyhow::Error> {
        let hardware = Arc::new(Mutex::new(MockHardwareState::default()));
        let (tx, rx) = channel();

        let hardware_clone = Arc::clone(&hardware);

        thread::Builder::new()
            .name("mock_hw_tui".to_string())
            .spawn(move || {
                if let Err(e) = run_tui(hardware_clone, rx) {
                    eprintln!("TUI error: {}", e);
                }
            })?;

        let logger = TuiLogger::new(tx.clone());
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(max_level);
        }

        Ok(Self { hardware, tx })
    }

    pub fn handle(&self) -> PanelHandle {
        PanelHandle {
            hardware: Arc::clone(&self.hardware),
        }
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(TuiMessage::Shutdown);
        // Give the TUI thread time to restore the terminal
        thread::sleep(Duration::from_millis(100));
    }
}

impl Drop for MockHwTui {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_tui(hardware: Arc<Mutex<MockHardwareState>>, rx: Receiver<TuiMessage>) -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut tui_state = TuiState::new(hardware, rx);

    tui_state.logs.push(LogEntry {
        level: Level::Info,
        message: "Mock hardware panel started".to_string(),
    });

    loop {
        tui_state.collect_messages();

        if tui_state.should_quit {
            break;
        }

        terminal.draw(|f| ui(f, &tui_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => tui_state.request_quit(),
                    KeyCode::Char('c') if key.modifiers.contains(crossterm::event::KeyModifiers::CONTROL) => {
                        tui_state.request_quit();
                    }
                    KeyCode::Char('a') => tui_state.toggle_signal(Signal::A),
                    KeyCode::Char('b') => tui_state.toggle_signal(Signal::B),
                    _ => {}
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}

fn ui(f: &mut Frame, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(7), // Hardware
            Constraint::Min(8),    // Logs
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let title = Paragraph::new("linkwatch mock hardware")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_hardware(f, chunks[1], state);
    render_logs(f, chunks[2], state);

    let help = Paragraph::new("a/b: toggle signal latch | hold A/B in the display window | q/Esc/Ctrl+C: quit")
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, chunks[3]);
}

fn lamp_span(label: &'static str, on: bool, color: Color) -> Span<'static> {
    let style = if on {
        Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!(" {label} "), style)
}

fn signal_span(name: &'static str, latched: bool) -> Span<'static> {
    let (text, style) = if latched {
        ("ACTIVE (low)", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        ("idle (high)", Style::default().fg(Color::White))
    };
    Span::styled(format!("{name}: {text}  "), style)
}

fn render_hardware(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default().borders(Borders::ALL).title("Hardware");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let hardware = lock(&state.hardware).clone();

    let buzzer = match hardware.tone {
        Some((frequency_hz, level)) => Span::styled(
            format!("sounding {frequency_hz} Hz, duty {level}/4096"),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("silent", Style::default().fg(Color::DarkGray)),
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("Latched  "),
            signal_span("A", hardware.signal_a),
            signal_span("B", hardware.signal_b),
        ]),
        Line::from(vec![
            Span::raw("Lamp     "),
            lamp_span("R", hardware.lamp.red, Color::Red),
            Span::raw(" "),
            lamp_span("G", hardware.lamp.green, Color::Green),
            Span::raw(" "),
            lamp_span("B", hardware.lamp.blue, Color::Blue),
        ]),
        Line::from(vec![Span::raw("Buzzer   "), buzzer]),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_logs(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Logs (scrolls automatically)");

    let inner = block.inner(area);
    f.render_widget(block, area);

    // Show last N logs that fit in the area
    let max_logs = inner.height as usize;
    let start_idx = state.logs.len().saturating_sub(max_logs);

    let log_items: Vec<ListItem> = state.logs[start_idx..]
        .iter()
        .map(|log| {
            let content = Line::from(vec![
                Span::styled(log.level.prefix(), Style::default().fg(log.level.color())),
                Span::raw(" "),
                Span::raw(&log.message),
            ]);
            ListItem::new(content)
        })
        .collect();

    f.render_widget(List::new(log_items), inner);
}
