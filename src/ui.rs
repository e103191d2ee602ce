pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::session::Phase;
use crate::util::format_clock;
use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;

/// Shown in place of an exercise outside a running block
pub const IDLE_PLACEHOLDER: &str = "—";

/// Status line once every exercise in the block has been presented
pub const EXHAUSTED_MSG: &str = "All exercises shown — wait for the timer to finish.";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.session.phase() {
            Phase::Idle => render_idle(self, area, buf),
            Phase::Running => render_session(self, area, buf),
        }
    }
}

fn render_idle(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_italic_style = Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new(Span::styled("blok", bold_style.fg(Color::Magenta)))
        .alignment(Alignment::Center);
    title.render(chunks[0], buf);

    let mut text = app.input.clone();
    text.push('▏');
    let editor = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("exercises, one per line"),
        )
        .wrap(Wrap { trim: false });
    editor.render(chunks[1], buf);

    if let Some(notice) = &app.notice {
        // Blocking validation notice, e.g. an empty list
        let notice = Paragraph::new(Span::styled(
            notice.clone(),
            bold_style.fg(Color::Red),
        ))
        .alignment(Alignment::Center);
        notice.render(chunks[2], buf);
    } else if app.alert.is_active() {
        let style = if app.flash {
            bold_style.fg(Color::Red)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::DIM)
        };
        let banner = Paragraph::new(Span::styled("Time is up!", style))
            .alignment(Alignment::Center);
        banner.render(chunks[2], buf);
    }

    let hints = Paragraph::new(Span::styled(
        "ctrl+s start  ctrl+k clear  esc quit",
        dim_italic_style,
    ))
    .alignment(Alignment::Center);
    hints.render(chunks[3], buf);
}

fn render_session(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let dim_italic_style = Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC);

    let exercise = app.session.current().unwrap_or(IDLE_PLACEHOLDER);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let exercise_lines =
        ((exercise.width() as f64 / max_chars_per_line as f64).ceil().max(1.0)) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(exercise_lines),
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    let countdown = Paragraph::new(Span::styled(format_clock(app.remaining_ms), dim_bold_style))
        .alignment(Alignment::Center);
    countdown.render(chunks[1], buf);

    let exercise = Paragraph::new(Span::styled(exercise.to_string(), bold_style))
        .alignment(if exercise_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    exercise.render(chunks[2], buf);

    let status = if app.session.exhausted() {
        Span::styled(EXHAUSTED_MSG, bold_style.fg(Color::Yellow))
    } else {
        Span::styled(
            format!("{} remaining in this block", app.session.remaining_in_block()),
            dim_italic_style,
        )
    };
    Paragraph::new(status)
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    // The advance control disappears from the hints once the block is exhausted
    let hints = if app.session.can_advance() {
        "n/space next  r reset  esc quit"
    } else {
        "r reset  esc quit"
    };
    Paragraph::new(Span::styled(hints, dim_italic_style))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);
}
