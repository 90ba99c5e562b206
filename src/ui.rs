use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use babybot::chat::Role;
use babybot::controller::ConversationController;

use crate::app::{App, InputMode};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, chat history, input, footer
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
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let key_indicator = if app.controller.has_api_key() {
        Span::raw("")
    } else {
        Span::styled(" [no API key] ", Style::default().fg(Color::Red))
    };

    let title = Line::from(vec![
        Span::styled(" Baby Bot ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!(" {} ", app.controller.model()),
            Style::default().fg(Color::Gray),
        ),
        key_indicator,
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
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
        .title(" Conversation ");

    let messages = app.controller.messages();
    let chat_text = if messages.is_empty() && !app.controller.is_loading() {
        Text::from(Span::styled(
            "Type a message to start chatting...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut lines: Vec<Line> = Vec::new();

        for (i, msg) in messages.iter().enumerate() {
            let (label, label_color) = match msg.role {
                Role::User => ("You:", Color::Cyan),
                Role::Assistant => ("Grok:", Color::Yellow),
                Role::System => ("babybot:", Color::Red),
            };
            let mut label_style = Style::default()
                .fg(label_color)
                .add_modifier(Modifier::BOLD);
            if app.selected == Some(i) {
                label_style = label_style.add_modifier(Modifier::REVERSED);
            }
            lines.push(Line::from(Span::styled(label, label_style)));

            let content_style = match msg.role {
                Role::System => Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
                _ => Style::default(),
            };
            for line in msg.content.lines() {
                lines.push(Line::from(Span::styled(line, content_style)));
            }
            lines.push(Line::default());
        }

        if app.controller.is_loading() {
            lines.push(Line::from(Span::styled(
                "Grok:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            // Animated ellipsis: cycles through ".", "..", "..."
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            lines.push(Line::from(Span::styled(
                format!("Thinking{}", dots),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        Text::from(lines)
    };

    let chat = Paragraph::new(chat_text)
        .block(chat_block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let loading = app.controller.is_loading();

    let input_border_color = if loading {
        Color::DarkGray
    } else if app.input_mode == InputMode::Editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let title = if loading {
        " Waiting for reply... "
    } else {
        " Message "
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(input_border_color))
        .title(title);

    // Calculate visible portion of input with horizontal scrolling.
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;

    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = app
        .input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let text_style = if loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let input = Paragraph::new(visible_text)
        .style(text_style)
        .block(input_block);

    frame.render_widget(input, area);

    // Show cursor when editing
    if app.input_mode == InputMode::Editing && !loading {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.input_mode {
        InputMode::Normal => " BROWSE ",
        InputMode::Editing => " CHAT ",
    };

    // Key style: dark background with bright text for visibility on both
    // light and dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = match app.input_mode {
        InputMode::Normal => vec![
            Span::styled(" j/k ", key_style),
            Span::styled(" select ", label_style),
            Span::styled(" d ", key_style),
            Span::styled(" delete ", label_style),
            Span::styled(" i ", key_style),
            Span::styled(" type ", label_style),
            Span::styled(" G ", key_style),
            Span::styled(" bottom ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ],
        InputMode::Editing => vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" browse ", label_style),
            Span::styled(" Ctrl-c ", key_style),
            Span::styled(" quit ", label_style),
        ],
    };

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    spans.extend(hints);

    let footer = Paragraph::new(Line::from(spans));
    frame.render_widget(footer, area);
}
