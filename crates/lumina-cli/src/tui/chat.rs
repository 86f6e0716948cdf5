//! Assistant chat overlay for the post detail screen.
//!
//! Requests run on a background thread so the UI stays responsive; replies
//! come back over an mpsc channel tagged with a generation number. Closing
//! and reopening the overlay bumps the generation, so a reply from an
//! abandoned conversation is dropped instead of appearing in the new one.

use crossterm::event::{KeyCode, KeyEvent};
use lumina_core::config::LuminaConfig;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use crate::assistant::{self, ChatMessage, Role};

/// The action the overlay wants the caller to take.
pub enum ChatAction {
    /// Close the overlay.
    Close,
}

pub struct ChatView {
    config: LuminaConfig,
    /// Post context sent with every request.
    context: String,
    post_title: String,
    messages: Vec<ChatMessage>,
    input: String,
    /// A request is in flight.
    pending: bool,
    /// Stamped onto each request; replies with a stale stamp are dropped.
    generation: u64,
    tx: Sender<(u64, String)>,
    rx: Receiver<(u64, String)>,
}

impl ChatView {
    pub fn new(config: LuminaConfig, post_title: &str, post_content: &str, generation: u64) -> Self {
        let (tx, rx) = channel();
        Self {
            config,
            context: format!("Title: {post_title}\n\n{post_content}"),
            post_title: post_title.to_string(),
            messages: vec![ChatMessage::model(assistant::GREETING)],
            input: String::new(),
            pending: false,
            generation,
            tx,
            rx,
        }
    }

    /// Drain any replies that arrived since the last frame.
    pub fn tick(&mut self) {
        while let Ok((generation, reply)) = self.rx.try_recv() {
            if generation != self.generation {
                continue;
            }
            self.messages.push(ChatMessage::model(reply));
            self.pending = false;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ChatAction> {
        match key.code {
            KeyCode::Esc => Some(ChatAction::Close),
            KeyCode::Enter => {
                self.submit();
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }

    fn submit(&mut self) {
        let prompt = self.input.trim().to_string();
        if prompt.is_empty() || self.pending {
            return;
        }
        self.input.clear();
        self.messages.push(ChatMessage::user(prompt.clone()));
        self.pending = true;

        let tx = self.tx.clone();
        let config = self.config.clone();
        let context = self.context.clone();
        let generation = self.generation;
        thread::spawn(move || {
            let reply = assistant::ask(&config, &prompt, &context);
            // The receiver is gone once the overlay closes; nothing to do.
            let _ = tx.send((generation, reply));
        });
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let popup = centered_rect(70, 80, area);
        frame.render_widget(Clear, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(popup);

        let mut lines: Vec<Line<'_>> = Vec::new();
        for msg in &self.messages {
            let (who, style) = match msg.role {
                Role::User => ("you", Style::default().fg(Color::Cyan)),
                Role::Model => ("lumina", Style::default().fg(Color::Green)),
            };
            lines.push(Line::from(Span::styled(
                format!("{who}:"),
                style.add_modifier(Modifier::BOLD),
            )));
            for text_line in msg.text.lines() {
                lines.push(Line::from(format!("  {text_line}")));
            }
            lines.push(Line::from(""));
        }
        if self.pending {
            lines.push(Line::from(Span::styled(
                "lumina is thinking...",
                Style::default().fg(Color::DarkGray),
            )));
        }

        let history = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Ask about: {} ", self.post_title)),
            );
        frame.render_widget(history, chunks[0]);

        let input = Paragraph::new(self.input.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Enter to send · Esc to close "),
        );
        frame.render_widget(input, chunks[1]);
    }
}

/// Center a popup of the given percentage size within `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
