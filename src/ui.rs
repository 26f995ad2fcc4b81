use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io;

use bankist::{Command, MovementKind, Screen, SessionSynchronizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Login,
    Transfer,
    Loan,
    Close,
}

impl Form {
    /// Cycles through the forms available while logged in
    pub fn next(&self) -> Self {
        match self {
            Form::Login => Form::Transfer,
            Form::Transfer => Form::Loan,
            Form::Loan => Form::Close,
            Form::Close => Form::Login,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Form::Login => Form::Close,
            Form::Transfer => Form::Login,
            Form::Loan => Form::Transfer,
            Form::Close => Form::Loan,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Form::Login => "Log in",
            Form::Transfer => "Transfer money",
            Form::Loan => "Request loan",
            Form::Close => "Close account",
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Form::Login => &["User", "PIN"],
            Form::Transfer => &["Transfer to", "Amount"],
            Form::Loan => &["Amount"],
            Form::Close => &["Confirm user", "Confirm PIN"],
        }
    }

    fn is_secret(&self, field: usize) -> bool {
        matches!((self, field), (Form::Login, 1) | (Form::Close, 1))
    }
}

pub struct App {
    pub sync: SessionSynchronizer<Screen>,
    pub form: Form,
    pub inputs: Vec<String>,
    pub focus: usize,
}

impl App {
    pub fn new(sync: SessionSynchronizer<Screen>) -> Self {
        let form = if sync.is_logged_in() { Form::Transfer } else { Form::Login };

        Self {
            sync,
            form,
            inputs: vec![String::new(); form.fields().len()],
            focus: 0,
        }
    }

    fn switch_form(&mut self, form: Form) {
        self.form = form;
        self.inputs = vec![String::new(); form.fields().len()];
        self.focus = 0;
    }

    /// Logged out, only the login form exists
    pub fn next_form(&mut self) {
        if self.sync.is_logged_in() {
            self.switch_form(self.form.next());
        }
    }

    pub fn previous_form(&mut self) {
        if self.sync.is_logged_in() {
            self.switch_form(self.form.previous());
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.inputs.len();
    }

    pub fn previous_field(&mut self) {
        self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(input) = self.inputs.get_mut(self.focus) {
            input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(input) = self.inputs.get_mut(self.focus) {
            input.pop();
        }
    }

    fn take_input(&mut self, field: usize) -> String {
        self.inputs.get_mut(field).map(std::mem::take).unwrap_or_default()
    }

    /// Send the current form to the synchronizer
    ///
    /// Declines are silent, like the web demo: the view simply does not change.
    pub fn submit(&mut self) {
        let command = match self.form {
            Form::Login => Command::Login {
                username: self.inputs[0].clone(),
                pin: self.inputs[1].clone(),
            },
            Form::Transfer => Command::Transfer {
                to: self.take_input(0),
                amount: self.take_input(1),
            },
            Form::Loan => Command::Loan {
                amount: self.take_input(0),
            },
            Form::Close => Command::Close {
                username: self.take_input(0),
                pin: self.take_input(1),
            },
        };

        let accepted = self.sync.handle(command).is_ok();

        match (self.form, self.sync.is_logged_in()) {
            (Form::Login, true) if accepted => self.switch_form(Form::Transfer),
            (Form::Login, _) => {}
            (_, false) => self.switch_form(Form::Login),
            _ => self.focus = 0,
        }
    }

    pub fn toggle_sort(&mut self) {
        if self.sync.is_logged_in() {
            self.sync.toggle_sort();
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("UI loop failed: {:?}", err);
        return Err(err.into());
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if !handle_key(app, key) {
                return Ok(());
            }
        }
    }
}

/// Returns `false` when the user asked to quit
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => return false,
        KeyCode::Char('c') if ctrl => return false,
        KeyCode::Char('s') if ctrl => app.toggle_sort(),
        KeyCode::Enter => app.submit(),
        KeyCode::Tab | KeyCode::Down => app.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.previous_field(),
        KeyCode::Right => app.next_form(),
        KeyCode::Left => app.previous_form(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) if !ctrl => app.type_char(c),
        _ => {}
    }

    true
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Welcome header
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.sync.presenter().visible {
        render_session(f, chunks[1], app);
    } else {
        render_login(f, chunks[1], app);
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let screen = app.sync.presenter();

    let mut spans = vec![Span::styled(
        screen.welcome.clone(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )];

    if screen.visible {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("As of {}", chrono::Local::now().format("%d/%m/%Y")),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("Sort: {}", app.sync.sort_order().label()),
            Style::default().fg(Color::Cyan),
        ));
    }

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_session(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Movements
            Constraint::Percentage(40), // Balance + forms
        ])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(columns[0]);

    render_movements(f, left[0], app);
    render_summary(f, left[1], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[1]);

    render_balance(f, right[0], app);
    render_form(f, right[1], app);
}

fn render_movements(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Movement", "Date", "Amount"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    // Newest entry on top
    let rows = app.sync.presenter().rows.iter().rev().map(|row| {
        let color = match row.kind {
            MovementKind::Deposit => Color::Green,
            MovementKind::Withdrawal => Color::Red,
        };

        Row::new(vec![
            Cell::from(format!("{} {}", row.sequence, row.kind.as_str())).style(Style::default().fg(color)),
            Cell::from(row.date_text.clone()),
            Cell::from(row.amount_text.clone()),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Movements "),
    );

    f.render_widget(table, area);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let summary = &app.sync.presenter().summary;

    let line = Line::from(vec![
        Span::styled("IN ", Style::default().fg(Color::DarkGray)),
        Span::styled(summary.inflow.clone(), Style::default().fg(Color::Green)),
        Span::raw("   "),
        Span::styled("OUT ", Style::default().fg(Color::DarkGray)),
        Span::styled(summary.outflow.clone(), Style::default().fg(Color::Red)),
        Span::raw("   "),
        Span::styled("INTEREST ", Style::default().fg(Color::DarkGray)),
        Span::styled(summary.interest.clone(), Style::default().fg(Color::Green)),
    ]);

    let bar = Paragraph::new(vec![line]).block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, area);
}

fn render_balance(f: &mut Frame, area: Rect, app: &App) {
    let balance = Paragraph::new(Line::from(Span::styled(
        app.sync.presenter().balance.clone(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Right)
    .block(Block::default().borders(Borders::ALL).title(" Current balance "));

    f.render_widget(balance, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    if app.sync.is_logged_in() {
        let mut tabs = Vec::new();
        let forms = [Form::Login, Form::Transfer, Form::Loan, Form::Close];
        for (i, form) in forms.iter().enumerate() {
            if i > 0 {
                tabs.push(Span::raw(" │ "));
            }
            let style = if *form == app.form {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            tabs.push(Span::styled(form.title().to_string(), style));
        }
        lines.push(Line::from(tabs));
        lines.push(Line::from(""));
    }

    lines.extend(form_lines(app));

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", app.form.title())),
    );

    f.render_widget(form, area);
}

fn form_lines(app: &App) -> Vec<Line<'static>> {
    app.form
        .fields()
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let value = &app.inputs[i];
            let shown = if app.form.is_secret(i) {
                "*".repeat(value.chars().count())
            } else {
                value.clone()
            };

            let style = if i == app.focus {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(format!("{:<14}", label), Style::default().fg(Color::Cyan)),
                Span::styled(format!(" {:<16}", shown), style),
            ])
        })
        .collect()
}

fn render_login(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(rows[1]);

    render_form(f, cols[1], app);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let mut status_spans = vec![
        key("Enter"),
        Span::raw(" Submit | "),
        key("Tab/↑/↓"),
        Span::raw(" Field | "),
    ];

    if app.sync.is_logged_in() {
        status_spans.push(key("←/→"));
        status_spans.push(Span::raw(" Form | "));
        status_spans.push(key("Ctrl-S"));
        status_spans.push(Span::raw(" Sort | "));
    }

    status_spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
