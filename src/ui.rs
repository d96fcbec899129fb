use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::backend::Availability;
use crate::conversation::Author;
use crate::format;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, chat log, input, footer
    let [header_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_chat(app, frame, chat_area);
    render_input(app, frame, input_area);
    render_footer(frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let status = match app.availability {
        Availability::Checking => Span::styled("🔄 Checking...", Style::default().fg(Color::Yellow)),
        Availability::Online => Span::styled("🟢 Online", Style::default().fg(Color::Green)),
        Availability::Offline => Span::styled("🔴 Offline", Style::default().fg(Color::Red)),
    };

    let title = Line::from(vec![
        Span::styled(" 🤖 AI Robotics Assistant ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("Backend: "),
        status,
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Physical AI & Humanoid Robotics Book ");

    let mut lines: Vec<Line> = Vec::new();

    for msg in app.conversation.messages() {
        let (label, label_color) = match msg.author {
            Author::User => ("You:", Color::Cyan),
            Author::Assistant => ("AI:", Color::Yellow),
        };
        lines.push(Line::from(vec![
            Span::styled(
                label,
                Style::default().fg(label_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                msg.timestamp.format("%H:%M").to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.extend(format::message_lines(&msg.text));
        lines.extend(format::citation_lines(&msg.citations));
        lines.push(Line::default());
    }

    if app.is_pending() {
        lines.push(Line::from(Span::styled(
            "AI:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let border_color = if app.is_pending() {
        Color::DarkGray
    } else {
        Color::Yellow
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(if app.is_pending() { " Waiting... " } else { " Ask " });

    // Horizontal scrolling keeps the cursor visible in a narrow pane
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if app.input.is_empty() {
        Paragraph::new("Ask about ROS 2, Gazebo, Unity, NVIDIA Isaac, VLA models...")
            .style(Style::default().fg(Color::DarkGray))
            .block(input_block)
    } else {
        let visible_text: String = app
            .input
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        Paragraph::new(visible_text)
            .style(Style::default().fg(Color::Cyan))
            .block(input_block)
    };

    frame.render_widget(input, area);

    let cursor_x = (cursor_pos - scroll_offset) as u16;
    frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" Enter ", Style::default().bg(Color::Blue).fg(Color::White)),
        Span::raw(" send  "),
        Span::styled(" ↑/↓ ", Style::default().bg(Color::Blue).fg(Color::White)),
        Span::raw(" scroll  "),
        Span::styled(" Esc ", Style::default().bg(Color::Blue).fg(Color::White)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(hints), area);
}
