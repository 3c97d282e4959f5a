//! Screen drawing for the terminal frontend. One function per screen plus
//! the toast and confirmation overlays. Nothing in here mutates app state
//! beyond the list selection ratatui tracks for us.

use chrono::Local;
use huddle_core::{NoticeLevel, Tab, schedule};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::app::{App, CreateField, LoginField, Screen};

pub fn ui(f: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::Login => draw_login(f, app),
        Screen::Dashboard => draw_dashboard(f, app),
        Screen::CreateRoom => draw_create_form(f, app),
        Screen::RoomDetail => draw_room_detail(f, app),
        Screen::Editor => draw_editor(f, app),
    }

    draw_toasts(f, app);
    if app.confirm_delete.is_some() {
        draw_confirm_modal(f);
    }
}

fn draw_login(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 9, f.area());
    let focused = |field: LoginField| {
        if app.login.focus == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Username: {}", app.login.username),
            focused(LoginField::Username),
        )),
        Line::from(Span::styled(
            format!("Email:    {}", app.login.email),
            focused(LoginField::Email),
        )),
        Line::from(""),
        Line::from("Tab: Switch field | Enter: Login | Esc: Quit"),
    ];

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Login to huddle"),
    );
    f.render_widget(form, area);
}

fn draw_dashboard(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let now = Local::now().naive_local();
    let header = Paragraph::new(vec![Line::from(app.clock_line(now))]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("huddle ({})", app.filter_label())),
    );
    f.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = app
        .visible_rooms()
        .iter()
        .map(|room| {
            let spots = if room.is_full() {
                "full".to_string()
            } else {
                format!("{} spots left", room.spots_left())
            };
            let text = format!(
                "{} | {} | {} {} | {}/{} ({})",
                room.name,
                room.activity.label(),
                schedule::format_date(room.date),
                schedule::format_time(room.time),
                room.participants.len(),
                room.max_participants,
                spots,
            );
            ListItem::new(vec![Line::from(vec![Span::raw(text)])])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Rooms"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(list, chunks[1], &mut app.room_list_state);

    let help = Paragraph::new(vec![Line::from(
        "Enter: Open | j/k: Move | f: Filter | n: New room | e: Editor | o: Logout | q: Quit",
    )])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn draw_room_detail(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let lines = match app.detail_room() {
        Some(room) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    room.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("Hosted by {}", room.host)),
                Line::from(format!("Activity: {}", room.activity.label())),
                Line::from(format!("Location: {}", room.location)),
                Line::from(format!(
                    "When: {} at {}",
                    schedule::format_date(room.date),
                    schedule::format_time(room.time)
                )),
                Line::from(format!(
                    "Participants ({}/{}):",
                    room.participants.len(),
                    room.max_participants
                )),
            ];
            for participant in &room.participants {
                lines.push(Line::from(format!("  - {participant}")));
            }
            if !room.description.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(room.description.clone()));
            }
            lines
        }
        None => vec![Line::from("This room no longer exists.")],
    };

    let detail = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Room"))
        .wrap(Wrap { trim: true });
    f.render_widget(detail, chunks[0]);

    let help = Paragraph::new(vec![Line::from(
        "j: Join | l: Leave | d: Delete (host only) | Esc: Back",
    )])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

fn draw_create_form(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let mut lines = vec![Line::from("")];
    for field in CreateField::ALL {
        let is_focused = app.create.focus == field;
        let marker = if is_focused { "> " } else { "  " };
        let style = if is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{marker}{:<20} {}",
                format!("{}:", field.label()),
                app.create.field_value(field)
            ),
            style,
        )));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Create a Room"),
    );
    f.render_widget(form, chunks[0]);

    let help = Paragraph::new(vec![Line::from(
        "Tab/Up/Down: Move | Left/Right: Activity | Enter: Create | Esc: Cancel",
    )])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

fn draw_editor(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    match app.editor.tab() {
        Tab::Write => {
            let document = app.editor.document();
            let text = with_caret_marker(document.text(), document.selection().start);
            let pane = Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL).title("Write"))
                .wrap(Wrap { trim: false });
            f.render_widget(pane, chunks[0]);
        }
        Tab::Preview => {
            let pane = Paragraph::new(app.editor.preview_html().to_string())
                .block(Block::default().borders(Borders::ALL).title("Preview"))
                .wrap(Wrap { trim: false });
            f.render_widget(pane, chunks[0]);
        }
    }

    let modifier = app.editor.modifier_hint();
    let help_text = if app.toolbar_menu {
        "Pick: h=Heading b=Bold i=Italic q=Quote c=Code k=Link u=List o=Numbered t=Tasks \
         m=Mention s=Save /=Slash f=Full"
            .to_string()
    } else {
        format!(
            "{modifier}+B Bold | {modifier}+I Italic | {modifier}+K Link | {modifier}+S Save/Load \
             | {modifier}+T Toolbar | {modifier}+P Preview | Tab: Expand /token | Esc: Back"
        )
    };
    let help =
        Paragraph::new(vec![Line::from(help_text)]).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

/// Splice a caret glyph into the buffer text at the caret's char offset.
fn with_caret_marker(text: &str, caret: usize) -> String {
    let mut out = String::with_capacity(text.len() + 3);
    let mut placed = false;
    for (i, ch) in text.chars().enumerate() {
        if i == caret {
            out.push('▏');
            placed = true;
        }
        out.push(ch);
    }
    if !placed {
        out.push('▏');
    }
    out
}

fn draw_toasts(f: &mut Frame, app: &App) {
    let area = f.area();
    for (i, toast) in app.toasts.iter().rev().take(4).enumerate() {
        let width = (toast.notice.message.chars().count() as u16)
            .saturating_add(4)
            .min(area.width);
        let rect = Rect {
            x: area.width.saturating_sub(width + 1),
            y: 1 + (i as u16) * 3,
            width,
            height: 3,
        };
        if rect.y + rect.height > area.height {
            break;
        }

        let style = Style::default().fg(toast_color(toast.notice.level));
        let widget = Paragraph::new(toast.notice.message.clone())
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(style));
        f.render_widget(Clear, rect);
        f.render_widget(widget, rect);
    }
}

fn toast_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    }
}

fn draw_confirm_modal(f: &mut Frame) {
    let area = centered_rect(40, 5, f.area());
    let style = Style::default().fg(Color::Red);

    let modal = Paragraph::new(vec![Line::from(""), Line::from("Delete this room? (y/n)")])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title("Confirm"),
        );
    f.render_widget(Clear, area);
    f.render_widget(modal, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
