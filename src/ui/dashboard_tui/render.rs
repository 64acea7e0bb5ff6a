use chrono::Local;
use ratatui::{
    prelude::*,
    widgets::{BarChart, Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Wrap},
};

use crate::core::plant::{Period, SHUTDOWN_PROMPT};
use crate::ui::formatters::{clock_display, format_kwh, format_money, format_percent};

use super::app::DashboardApp;
use super::widgets::{colored_gauge, notification_color, temp_color};

/// Scale used by the live usage gauge (kWh at full deflection)
const GAUGE_FULL_SCALE_KWH: f64 = 10.0;

/// Main render function: a pure projection of the app state onto the frame
pub fn render_ui(frame: &mut Frame, app: &DashboardApp) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Status banner
            Constraint::Length(7),  // Live usage + metrics + health
            Constraint::Min(9),     // Machines + suggestions
            Constraint::Length(12), // Charts
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    render_status_banner(frame, chunks[0], app);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(chunks[1]);
    render_live_usage(frame, top[0], app);
    render_metrics(frame, top[1], app);
    render_system_health(frame, top[2], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);
    render_machine_table(frame, middle[0], app);
    render_suggestions(frame, middle[1], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(chunks[3]);
    render_realtime_chart(frame, charts[0], app);
    render_distribution_chart(frame, charts[1], app);
    render_historical_chart(frame, charts[2], app);

    render_footer(frame, chunks[4]);

    if let Some(toast) = &app.toast {
        render_toast(frame, area, toast);
    }

    if app.awaiting_shutdown_confirm {
        render_confirm_modal(frame, area);
    }

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

/// Render the system status banner with the live clock
fn render_status_banner(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let (message, color) = if app.state.is_online {
        ("● System Online - All Systems Operational", Color::Green)
    } else {
        ("▲ System Offline - Emergency Shutdown Active", Color::Red)
    };

    let title = format!(" EnergizeAI │ {} ", clock_display(Local::now()));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let banner = Paragraph::new(message)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(banner, inner);
}

/// Render the live usage readout and power gauge
fn render_live_usage(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default()
        .title(" Live Energy Usage ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let readout = Paragraph::new(format_kwh(app.state.live_usage))
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(readout, layout[0]);

    let color = if app.state.is_online {
        Color::Blue
    } else {
        Color::Red
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio((app.state.live_usage / GAUGE_FULL_SCALE_KWH).clamp(0.0, 1.0))
        .label(format!("{:.1} / {:.0} kWh", app.state.live_usage, GAUGE_FULL_SCALE_KWH));
    frame.render_widget(gauge, layout[1]);
}

/// Render the savings/efficiency/uptime readouts
fn render_metrics(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default().title(" Key Metrics ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Cost Savings:     ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_money(app.state.total_savings),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Efficiency Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_percent(app.state.average_efficiency()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Uptime:           ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_percent(app.state.uptime_percent()),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the three system health gauges
fn render_system_health(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default()
        .title(" System Health ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 {
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let health = &app.state.health;
    let rows = [
        ("CPU", health.cpu),
        ("Memory", health.memory),
        ("Network", health.network),
    ];

    for (i, (name, value)) in rows.iter().enumerate() {
        let gauge = colored_gauge(*value, format!("{} {:.1}%", name, value));
        frame.render_widget(gauge, layout[i]);
    }
}

/// Render the machine list table
fn render_machine_table(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default()
        .title(format!(" Machines ({}) ", app.state.machines.len()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    let header = Row::new(vec![
        Cell::from("Machine").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Status").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Usage").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Eff").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Temp").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .height(1);

    let rows: Vec<Row> = app
        .state
        .machines
        .iter()
        .map(|machine| {
            let status_color = if machine.status.is_online() {
                Color::Green
            } else {
                Color::Red
            };

            Row::new(vec![
                Cell::from(machine.name.clone()),
                Cell::from(format!("● {}", machine.status))
                    .style(Style::default().fg(status_color)),
                Cell::from(format_kwh(machine.usage_kwh)),
                Cell::from(format!("{:.0}%", machine.efficiency)),
                Cell::from(format!("{:.0}°C", machine.temperature))
                    .style(Style::default().fg(temp_color(machine.temperature))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(36),
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(header);

    frame.render_widget(table, inner);
}

/// Render the AI suggestions list
fn render_suggestions(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default()
        .title(" AI Suggestions ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = app
        .state
        .ai_suggestions
        .iter()
        .enumerate()
        .map(|(i, suggestion)| {
            Line::from(vec![
                Span::styled(
                    format!("{}. ", i + 1),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw(suggestion.as_str()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

/// Render the realtime chart: the last seven daily samples as a mini bar chart
fn render_realtime_chart(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let daily = &app.state.history.daily;
    let recent: Vec<(&str, u64)> = daily
        .values
        .iter()
        .rev()
        .take(7)
        .rev()
        .map(|&v| ("", (v * 10.0) as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(" Live Energy ")
                .borders(Borders::ALL),
        )
        .direction(Direction::Vertical)
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(Style::default().fg(Color::Black).bg(Color::Blue))
        .data(&recent)
        .max(bar_max(&recent));

    frame.render_widget(chart, area);
}

/// Render the per-machine usage distribution
fn render_distribution_chart(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let labels: Vec<String> = app
        .state
        .machines
        .iter()
        .map(|m| format!("#{}", m.id))
        .collect();
    let data: Vec<(&str, u64)> = app
        .state
        .machines
        .iter()
        .zip(labels.iter())
        .map(|(m, label)| (label.as_str(), (m.usage_kwh * 10.0) as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(" Usage Distribution ")
                .borders(Borders::ALL),
        )
        .direction(Direction::Vertical)
        .bar_width(4)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Magenta))
        .value_style(Style::default().fg(Color::Black).bg(Color::Magenta))
        .data(&data)
        .max(bar_max(&data));

    frame.render_widget(chart, area);
}

/// Render the historical chart for the selected period
fn render_historical_chart(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let series = app.state.history.series(app.selected_period);

    let data: Vec<(&str, u64)> = series
        .labels
        .iter()
        .zip(series.values.iter())
        .map(|(label, &value)| (label.as_str(), (value * 10.0) as u64))
        .collect();

    let highlight = |period: Period| {
        if period == app.selected_period {
            format!("[{}]", period.label())
        } else {
            period.label().to_string()
        }
    };
    let title = format!(
        " Energy Usage ({} │ {} │ {}) ",
        highlight(Period::Daily),
        highlight(Period::Weekly),
        highlight(Period::Monthly),
    );

    let chart = BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .direction(Direction::Vertical)
        .bar_width(6)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .data(&data)
        .max(bar_max(&data));

    frame.render_widget(chart, area);
}

/// Largest bar value, never zero (BarChart treats 0 max as empty)
fn bar_max(data: &[(&str, u64)]) -> u64 {
    data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1)
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let help = " q: Quit │ s: Start all │ x: Shutdown │ o: Optimize │ r: Report │ d/w/m: Range │ ?: Help ";
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Render the notification toast in the top-right corner
fn render_toast(frame: &mut Frame, area: Rect, toast: &super::app::Toast) {
    let width = 42.min(area.width.saturating_sub(2));
    let height = 4;
    if width < 10 || area.height < height + 2 {
        return;
    }

    let toast_area = Rect {
        x: area.right().saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height,
    };

    let color = notification_color(toast.notification.kind);
    let block = Block::default()
        .title(format!(" {} ", toast.notification.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(toast.notification.message.as_str())
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, toast_area);
    frame.render_widget(paragraph, toast_area);
}

/// Render the emergency shutdown confirmation modal
fn render_confirm_modal(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(54, 40, area);

    let block = Block::default()
        .title(" ⚠ Confirm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

    let text = format!("{}\n\n   [Y] Proceed      [N] Cancel", SHUTDOWN_PROMPT);
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = r#"
    EnergizeAI Dashboard - Help

    Keyboard Shortcuts:
    ─────────────────────────────────────
    q / Esc     Quit the application
    ? / h       Toggle this help screen
    s           Start all machines
    x           Emergency shutdown
    o           Run AI optimization
    r           Export CSV report
    d / w / m   Daily / weekly / monthly chart

    Press ? again to close this help
    "#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::DarkGray));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    let popup_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
