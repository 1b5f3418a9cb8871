use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io::{self, Write};

use crate::data_loader::UsageSource;
use crate::format::{
    format_cost, format_day_label, format_timestamp, format_tokens, format_total_cost,
    tooltip_formatter, ModelFamily,
};
use crate::models::DailyUsage;
use crate::state::{LoadState, Snapshot};
use crate::tui::app::App;

const ACCENT: Color = Color::Rgb(16, 185, 129);

pub async fn run_dashboard<S: UsageSource>(app: App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    install_panic_hook();

    let result = event_loop(&mut terminal, app).await;

    // Restore terminal
    restore_terminal(terminal.backend_mut())?;
    terminal.show_cursor()?;

    result
}

fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, DisableMouseCapture)
}

/// Leave raw mode and the alternate screen before the panic message prints.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal(&mut io::stdout());
        previous(info);
    }));
}

async fn event_loop<B: Backend, S: UsageSource>(
    terminal: &mut Terminal<B>,
    mut app: App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw_ui(f, &app))?;

        // The fetch runs inline, so key presses during a load wait for it.
        if app.take_refresh_request() {
            app.refresh().await;
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                KeyCode::Char('r') => app.request_refresh(),
                KeyCode::Down | KeyCode::Char('j') => app.next_item(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_item(),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw_ui<S: UsageSource>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, chunks[0]);

    match app.dashboard.state() {
        LoadState::Loading => draw_loading(f, chunks[1]),
        LoadState::Failed(message) => draw_error(f, message, chunks[1]),
        LoadState::Ready(snapshot) => draw_snapshot(f, snapshot, app.selected_index, chunks[1]),
    }

    draw_footer(f, chunks[2]);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let today = Local::now().format("%A, %B %-d, %Y").to_string();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Token Usage Tracker",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(today, Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled(" Live ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::raw("Press "),
        Span::styled("r", Style::default().fg(Color::Cyan)),
        Span::raw(" to refresh, "),
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::raw(" to navigate, "),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" to quit"),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_loading(f: &mut Frame, area: Rect) {
    let loading = Paragraph::new("Loading usage data...")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(loading, area);
}

fn draw_error(f: &mut Frame, message: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::LightRed))),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("r", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" to retry"),
        ]),
    ];

    let error = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .alignment(Alignment::Center);

    f.render_widget(error, area);
}

fn draw_snapshot(f: &mut Frame, snapshot: &Snapshot, selected: usize, area: Rect) {
    let chart_height = if snapshot.daily.is_empty() { 0 } else { 12 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),            // Stats cards
            Constraint::Length(chart_height), // Chart
            Constraint::Min(0),               // Activity
        ])
        .split(area);

    draw_stats_cards(f, snapshot, chunks[0]);
    if !snapshot.daily.is_empty() {
        draw_usage_chart(f, &snapshot.daily, chunks[1]);
    }
    draw_activity(f, snapshot, selected, chunks[2]);
}

fn draw_stats_cards(f: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let card_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let stats = &snapshot.stats;
    let cards = [
        ("Total Tokens", format_tokens(stats.total_tokens as f64)),
        ("Total Cost", format_total_cost(stats.total_cost)),
        ("Daily Average", format_tokens(stats.daily_average)),
    ];

    for ((title, value), chunk) in cards.into_iter().zip(card_chunks.iter()) {
        let text = vec![
            Line::from(Span::styled(title, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(Span::styled(
                value,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
        ];
        let card = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(card, *chunk);
    }
}

fn draw_usage_chart(f: &mut Frame, daily: &[DailyUsage], area: Rect) {
    let bars: Vec<Bar> = daily
        .iter()
        .map(|d| {
            let (value, _) = tooltip_formatter(Some(d.tokens as f64));
            Bar::default()
                .value(d.tokens)
                .label(Line::from(format_day_label(&d.date)))
                .text_value(value)
                .style(Style::default().fg(ACCENT))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Token Usage (Last 7 Days) "),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(2)
        .value_style(Style::default().fg(Color::Black).bg(ACCENT));

    f.render_widget(chart, area);
}

fn model_color(model: &str) -> Color {
    match ModelFamily::classify(model) {
        ModelFamily::Claude => Color::Rgb(251, 146, 60),
        ModelFamily::Gpt => Color::Rgb(52, 211, 153),
        ModelFamily::Other => Color::Rgb(96, 165, 250),
    }
}

fn draw_activity(f: &mut Frame, snapshot: &Snapshot, selected: usize, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Recent Activity ");

    if snapshot.records.is_empty() {
        let empty = Paragraph::new("No activity yet. Start tracking your API usage!")
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Project"),
        Cell::from("Model"),
        Cell::from(Line::from("Tokens").alignment(Alignment::Right)),
        Cell::from(Line::from("Cost").alignment(Alignment::Right)),
    ])
    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = snapshot
        .records
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(format_timestamp(&r.created_at)),
                Cell::from(Span::styled(
                    r.project_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Cell::from(Span::styled(
                    r.model.clone(),
                    Style::default().fg(model_color(&r.model)),
                )),
                Cell::from(
                    Line::from(format_tokens(r.total_tokens as f64)).alignment(Alignment::Right),
                ),
                Cell::from(Line::from(format_cost(r.cost_usd)).alignment(Alignment::Right)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(18),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let mut state = TableState::default().with_selected(Some(selected));
    f.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_terminal_leaves_alternate_screen() {
        let mut out = Vec::new();
        restore_terminal(&mut out).expect("restore should succeed outside raw mode");

        let written = String::from_utf8(out).expect("escape codes are utf-8");
        assert!(written.contains("\u{1b}[?1049l"));
    }

    #[test]
    fn test_model_color_by_family() {
        assert_eq!(model_color("claude-3-opus"), Color::Rgb(251, 146, 60));
        assert_eq!(model_color("gpt-4"), Color::Rgb(52, 211, 153));
        assert_eq!(model_color("mistral-large"), Color::Rgb(96, 165, 250));
    }
}
