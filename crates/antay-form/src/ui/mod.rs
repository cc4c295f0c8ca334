//! TUI rendering.

use antay_core::Field;
use antay_form::{FormStatus, ToastKind, Transport};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Focus, INPUTS};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<T: Transport>(f: &mut Frame, app: &App<T>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // form
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  draw_form(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<T: Transport>(f: &mut Frame, area: Rect, app: &App<T>) {
  let left = Span::styled(
    " antay  contact us",
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{} ", app.target), Style::default().fg(Color::Gray));

  let pad = area
    .width
    .saturating_sub(left.content.chars().count() as u16)
    .saturating_sub(right.content.chars().count() as u16);
  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Form ─────────────────────────────────────────────────────────────────────

fn input_height(field: Field) -> u16 {
  match field {
    Field::Message => 6,
    _ => 3,
  }
}

fn draw_form<T: Transport>(f: &mut Frame, area: Rect, app: &App<T>) {
  // Each input is followed by a one-line error slot.
  let mut constraints: Vec<Constraint> = INPUTS
    .iter()
    .flat_map(|field| [Constraint::Length(input_height(*field)), Constraint::Length(1)])
    .collect();
  constraints.push(Constraint::Length(3));
  constraints.push(Constraint::Min(0));

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints(constraints)
    .split(area);

  for (i, field) in INPUTS.iter().enumerate() {
    draw_input(f, rows[i * 2], app, *field);
    draw_error(f, rows[i * 2 + 1], app, *field);
  }
  draw_submit(f, rows[INPUTS.len() * 2], app);
}

fn border_style(focused: bool) -> Style {
  if focused {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  }
}

fn draw_input<T: Transport>(f: &mut Frame, area: Rect, app: &App<T>, field: Field) {
  let focused = app.focus == Focus::Input(field);
  let optional = match field {
    Field::Phone => true,
    Field::Subject => !app.form.options().rules.subject_required(),
    _ => false,
  };
  let title = if optional {
    format!(" {} (optional) ", field.label())
  } else {
    format!(" {} ", field.label())
  };

  let border = if app.form.errors().contains(field) {
    Style::default().fg(Color::Red)
  } else {
    border_style(focused)
  };
  let block = Block::default().title(title).borders(Borders::ALL).border_style(border);

  let mut text = app.form.draft().get(field).to_owned();
  if focused {
    text.push('▏');
  }
  f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: false }), area);
}

fn draw_error<T: Transport>(f: &mut Frame, area: Rect, app: &App<T>, field: Field) {
  if let Some(message) = app.form.errors().get(field) {
    f.render_widget(
      Paragraph::new(format!("  {message}")).style(Style::default().fg(Color::Red)),
      area,
    );
  }
}

fn draw_submit<T: Transport>(f: &mut Frame, area: Rect, app: &App<T>) {
  let label = match app.form.status() {
    FormStatus::Submitting => "Sending…",
    _ => "Send Message",
  };
  let focused = app.focus == Focus::Submit;
  let style = if focused {
    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
  } else {
    Style::default()
  };
  let block = Block::default().borders(Borders::ALL).border_style(border_style(focused));
  f.render_widget(Paragraph::new(Span::styled(format!(" {label} "), style)).block(block), area);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<T: Transport>(f: &mut Frame, area: Rect, app: &App<T>) {
  let (label, colour) = match app.form.status() {
    FormStatus::Idle => ("IDLE", Color::Cyan),
    FormStatus::Submitting => ("SENDING", Color::Yellow),
    FormStatus::Success => ("SENT", Color::Green),
    FormStatus::Error => ("ERROR", Color::Red),
  };
  let mode_span = Span::styled(
    format!(" {label} "),
    Style::default().fg(Color::Black).bg(colour).add_modifier(Modifier::BOLD),
  );

  // Toasts stay visible until the form returns to idle.
  let toast = (app.form.status() != FormStatus::Idle)
    .then(|| app.toasts.latest())
    .flatten()
    .or_else(|| {
      app
        .toasts
        .latest()
        .filter(|t| t.kind == ToastKind::Error && !app.form.errors().is_empty())
    });

  let detail = match toast {
    Some(t) => Span::styled(
      format!("  {}: {}", t.title, t.description),
      Style::default().fg(match t.kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
      }),
    ),
    None => Span::styled(
      "  Tab/Shift-Tab move  Enter next  Ctrl-S send  Esc quit",
      Style::default().fg(Color::DarkGray),
    ),
  };

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, detail])).style(Style::default().bg(Color::Black)),
    area,
  );
}
