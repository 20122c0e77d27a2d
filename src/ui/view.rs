//! Countdown view rendering

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::state::{CountdownState, Phase};

/// Draw the full view: the count, the three controls, and a status line.
/// All three controls are always shown as available; redundant presses
/// are accepted no-ops.
pub fn draw(
    frame: &mut Frame,
    countdown: &CountdownState,
    last_action: Option<&str>,
    last_action_time: Option<DateTime<Utc>>,
    uptime: &str,
) {
    let chunks = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    draw_count(frame, chunks[0], countdown);
    draw_controls(frame, chunks[1]);
    draw_status(frame, chunks[2], countdown, last_action, last_action_time, uptime);
}

fn draw_count(frame: &mut Frame, area: Rect, countdown: &CountdownState) {
    let style = match countdown.phase() {
        Phase::Idle => Style::new().bold(),
        Phase::Active => Style::new().fg(Color::Green).bold(),
        Phase::Finished => Style::new().fg(Color::Red).bold(),
    };

    let block = Block::bordered().title(" tickdown ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    // Single centered line at the vertical middle of the box
    let middle = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
    let count = Line::styled(countdown.remaining.to_string(), style).centered();
    frame.render_widget(Paragraph::new(count), middle);
}

fn draw_controls(frame: &mut Frame, area: Rect) {
    let key = Style::new().fg(Color::Yellow).bold();
    let controls = Line::from(vec![
        Span::styled("[s]", key),
        Span::raw(" start   "),
        Span::styled("[p]", key),
        Span::raw(" pause   "),
        Span::styled("[r]", key),
        Span::raw(" reset   "),
        Span::styled("[q]", key),
        Span::raw(" quit"),
    ])
    .centered();

    frame.render_widget(Paragraph::new(controls), area);
}

fn draw_status(
    frame: &mut Frame,
    area: Rect,
    countdown: &CountdownState,
    last_action: Option<&str>,
    last_action_time: Option<DateTime<Utc>>,
    uptime: &str,
) {
    let last = match (last_action, last_action_time) {
        (Some(action), Some(time)) => format!("{} at {}", action, time.format("%H:%M:%S")),
        (Some(action), None) => action.to_string(),
        _ => "none".to_string(),
    };

    let status = Line::from(format!(
        "state: {}   last action: {}   uptime: {}",
        countdown.phase().as_str(),
        last,
        uptime,
    ))
    .style(Style::new().dim());

    frame.render_widget(Paragraph::new(status), area);
}
