//! Post editor overlay used by the admin dashboard for both "new post"
//! and "edit post".
//!
//! Tab cycles fields, Ctrl-s saves, Esc cancels. The content field is
//! multiline; Enter inserts a newline there and is ignored elsewhere.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lumina_core::{Post, PostDraft};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::chat::centered_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Excerpt,
    Category,
    Content,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Excerpt,
            Self::Excerpt => Self::Category,
            Self::Category => Self::Content,
            Self::Content => Self::Title,
        }
    }
}

/// The action the editor wants the caller to take.
pub enum EditorAction {
    /// Save the form contents.
    Save,
    /// The user cancelled; close the editor.
    Cancel,
}

pub struct EditorForm {
    /// Id of the post being edited, `None` for a new post.
    pub editing_id: Option<String>,
    title: String,
    excerpt: String,
    category: String,
    content: String,
    focus: Field,
}

impl EditorForm {
    pub fn blank() -> Self {
        Self {
            editing_id: None,
            title: String::new(),
            excerpt: String::new(),
            category: String::new(),
            content: String::new(),
            focus: Field::Title,
        }
    }

    pub fn from_post(post: &Post) -> Self {
        Self {
            editing_id: Some(post.id.clone()),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            category: post.category.clone(),
            content: post.content.clone(),
            focus: Field::Title,
        }
    }

    /// All fields must be non-blank before saving.
    pub fn can_save(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.excerpt.trim().is_empty()
            && !self.category.trim().is_empty()
            && !self.content.trim().is_empty()
    }

    pub fn draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.trim().to_string(),
            excerpt: self.excerpt.trim().to_string(),
            content: self.content.clone(),
            category: self.category.trim().to_string(),
            author: None,
            image_url: None,
        }
    }

    /// Copy the form fields onto an existing post.
    pub fn apply_to(&self, post: &mut Post) {
        post.title = self.title.trim().to_string();
        post.excerpt = self.excerpt.trim().to_string();
        post.category = self.category.trim().to_string();
        post.content = self.content.clone();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<EditorAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return self.can_save().then_some(EditorAction::Save);
        }
        match key.code {
            KeyCode::Esc => Some(EditorAction::Cancel),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::Enter if self.focus == Field::Content => {
                self.content.push('\n');
                None
            }
            KeyCode::Backspace => {
                self.active_mut().pop();
                None
            }
            KeyCode::Char(c) => {
                self.active_mut().push(c);
                None
            }
            _ => None,
        }
    }

    fn active_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Excerpt => &mut self.excerpt,
            Field::Category => &mut self.category,
            Field::Content => &mut self.content,
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let popup = centered_rect(80, 85, area);
        frame.render_widget(Clear, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(popup);

        self.render_field(frame, chunks[0], "Title", &self.title, Field::Title);
        self.render_field(frame, chunks[1], "Excerpt", &self.excerpt, Field::Excerpt);
        self.render_field(frame, chunks[2], "Category", &self.category, Field::Category);
        self.render_field(frame, chunks[3], "Content", &self.content, Field::Content);

        let mode = if self.editing_id.is_some() { "edit" } else { "new post" };
        let hint = format!(" {mode} · Tab next field · Ctrl-s save · Esc cancel ");
        frame.render_widget(
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
            chunks[4],
        );
    }

    fn render_field(&self, frame: &mut Frame<'_>, area: Rect, label: &str, value: &str, field: Field) {
        let style = if self.focus == field {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let widget = Paragraph::new(value)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style)
                    .title(format!(" {label} ")),
            );
        frame.render_widget(widget, area);
    }
}
