//! Application state for the full-screen reader.
//!
//! One [`App`] owns the stores, the navigation [`Session`], and whichever
//! overlay is active. Key handling routes to the overlay first, then to
//! the current screen.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use lumina_core::config::{LuminaConfig, load_config};
use lumina_core::model::post::{display_date, read_time_label};
use lumina_core::store::{CommentStore, FileStore, PostStore};
use lumina_core::{Block as DocBlock, Session, View, render};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::path::Path;

use super::chat::{ChatAction, ChatView, centered_rect};
use super::editor::{EditorAction, EditorForm};
use super::search::{SearchAction, SearchView};

const ABOUT_TEXT: &str = "Lumina is a quiet corner of the internet: a device-local \
journal for long-form writing, with reader comments and a reading assistant. \
Everything lives on this machine.";

enum Overlay {
    None,
    Search(SearchView),
    Chat(Box<ChatView>),
    Editor(Box<EditorForm>),
    Login { input: String },
    ConfirmDelete { post_id: String },
}

/// Simple two-field comment composer shown at the bottom of detail view.
struct CommentForm {
    author: String,
    body: String,
    on_body: bool,
}

pub struct App {
    posts: PostStore<FileStore>,
    comments: CommentStore<FileStore>,
    config: LuminaConfig,
    session: Session,
    list_state: ListState,
    admin_state: ListState,
    detail_scroll: u16,
    comment_form: Option<CommentForm>,
    overlay: Overlay,
    status: Option<String>,
    /// Bumped every time a chat overlay opens; stale replies are dropped.
    chat_generation: u64,
    quit: bool,
}

impl App {
    pub fn new(data_dir: &Path) -> Result<Self> {
        let posts = PostStore::open(FileStore::new(data_dir));
        let comments = CommentStore::open(FileStore::new(data_dir));
        let config = load_config(data_dir)?;
        let mut list_state = ListState::default();
        if !posts.list().is_empty() {
            list_state.select(Some(0));
        }
        Ok(Self {
            posts,
            comments,
            config,
            session: Session::new(),
            list_state,
            admin_state: ListState::default(),
            detail_scroll: 0,
            comment_form: None,
            overlay: Overlay::None,
            status: None,
            chat_generation: 0,
            quit: false,
        })
    }

    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    /// Per-frame upkeep: drain assistant replies.
    pub fn tick(&mut self) {
        if let Overlay::Chat(chat) = &mut self.overlay {
            chat.tick();
        }
    }

    // -----------------------------------------------------------------
    // Key handling
    // -----------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.status = None;

        // Overlays swallow input while open.
        match &mut self.overlay {
            Overlay::Search(view) => {
                if let Some(action) = view.handle_key(key, self.posts.list()) {
                    match action {
                        SearchAction::Open(id) => {
                            self.session.open_post(&id);
                            self.detail_scroll = 0;
                            self.overlay = Overlay::None;
                        }
                        SearchAction::Close => self.overlay = Overlay::None,
                    }
                }
                return Ok(());
            }
            Overlay::Chat(chat) => {
                if let Some(ChatAction::Close) = chat.handle_key(key) {
                    // Invalidate any in-flight request.
                    self.chat_generation += 1;
                    self.overlay = Overlay::None;
                }
                return Ok(());
            }
            Overlay::Editor(form) => {
                if let Some(action) = form.handle_key(key) {
                    match action {
                        EditorAction::Save => self.save_editor()?,
                        EditorAction::Cancel => self.overlay = Overlay::None,
                    }
                }
                return Ok(());
            }
            Overlay::Login { input } => {
                match key.code {
                    KeyCode::Esc => {
                        self.session.clear_login_error();
                        self.overlay = Overlay::None;
                    }
                    KeyCode::Enter => {
                        let attempt = input.clone();
                        let secret = self.config.admin_password();
                        if self.session.attempt_login(&attempt, &secret) {
                            self.overlay = Overlay::None;
                            self.admin_state.select(Some(0));
                        } else {
                            input.clear();
                        }
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Char(c) => {
                        input.push(c);
                    }
                    _ => {}
                }
                return Ok(());
            }
            Overlay::ConfirmDelete { post_id } => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => {
                        let id = post_id.clone();
                        self.posts.delete(&id)?;
                        self.clamp_admin_selection();
                        self.status = Some(format!("deleted {id}"));
                        self.overlay = Overlay::None;
                    }
                    _ => self.overlay = Overlay::None,
                }
                return Ok(());
            }
            Overlay::None => {}
        }

        if let Some(form) = &mut self.comment_form {
            match key.code {
                KeyCode::Esc => self.comment_form = None,
                KeyCode::Tab => form.on_body = !form.on_body,
                KeyCode::Enter => self.submit_comment()?,
                KeyCode::Backspace => {
                    if form.on_body {
                        form.body.pop();
                    } else {
                        form.author.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if form.on_body {
                        form.body.push(c);
                    } else {
                        form.author.push(c);
                    }
                }
                _ => {}
            }
            return Ok(());
        }

        match self.session.effective_view().unwrap_or(View::Home) {
            View::Home => self.handle_home_key(key),
            View::PostDetail => self.handle_detail_key(key),
            View::About => self.handle_about_key(key),
            View::Admin => self.handle_admin_key(key)?,
        }
        Ok(())
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.select_next_home(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev_home(),
            KeyCode::Enter => {
                if let Some(post) = self.selected_home_post() {
                    let id = post.id.clone();
                    self.session.open_post(&id);
                    self.detail_scroll = 0;
                }
            }
            KeyCode::Char('/') => self.overlay = Overlay::Search(SearchView::new()),
            KeyCode::Char('a') => self.session.go_about(),
            KeyCode::Char('d') => {
                if self.session.is_authenticated() {
                    self.session.enter_admin();
                    self.admin_state.select(Some(0));
                } else {
                    self.session.clear_login_error();
                    self.overlay = Overlay::Login {
                        input: String::new(),
                    };
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc | KeyCode::Char('b') => {
                self.session.go_back();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            KeyCode::Char('c') => {
                self.comment_form = Some(CommentForm {
                    author: String::new(),
                    body: String::new(),
                    on_body: false,
                });
            }
            KeyCode::Char('i') => self.open_chat(),
            KeyCode::Char('/') => self.overlay = Overlay::Search(SearchView::new()),
            _ => {}
        }
    }

    fn handle_about_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc | KeyCode::Char('b') => self.session.go_home(),
            _ => {}
        }
    }

    fn handle_admin_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc | KeyCode::Char('b') => self.session.go_home(),
            KeyCode::Char('L') => {
                self.session.logout();
                self.status = Some("logged out".to_string());
            }
            KeyCode::Char('j') | KeyCode::Down => self.select_next_admin(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev_admin(),
            KeyCode::Char('n') => self.overlay = Overlay::Editor(Box::new(EditorForm::blank())),
            KeyCode::Char('e') => {
                if let Some(post) = self.selected_admin_post() {
                    self.overlay = Overlay::Editor(Box::new(EditorForm::from_post(post)));
                }
            }
            KeyCode::Char('x') => {
                if let Some(post) = self.selected_admin_post() {
                    self.overlay = Overlay::ConfirmDelete {
                        post_id: post.id.clone(),
                    };
                }
            }
            _ => {}
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------

    fn open_chat(&mut self) {
        let Some(post) = self
            .session
            .selected_post_id()
            .and_then(|id| self.posts.get(id))
        else {
            return;
        };
        self.chat_generation += 1;
        self.overlay = Overlay::Chat(Box::new(ChatView::new(
            self.config.clone(),
            &post.title,
            &post.content,
            self.chat_generation,
        )));
    }

    fn submit_comment(&mut self) -> Result<()> {
        let Some(form) = &self.comment_form else {
            return Ok(());
        };
        let author = form.author.trim().to_string();
        let body = form.body.trim().to_string();
        if author.is_empty() || body.is_empty() {
            self.status = Some("both name and comment are required".to_string());
            return Ok(());
        }
        let Some(post_id) = self.session.selected_post_id().map(ToString::to_string) else {
            return Ok(());
        };
        self.comments.add(&post_id, &author, &body)?;
        self.comment_form = None;
        self.status = Some("comment posted".to_string());
        Ok(())
    }

    fn save_editor(&mut self) -> Result<()> {
        let Overlay::Editor(form) = &self.overlay else {
            return Ok(());
        };
        match &form.editing_id {
            None => {
                let created = self.posts.create(form.draft())?;
                self.status = Some(format!("published \"{}\"", created.title));
            }
            Some(id) => {
                if let Some(mut post) = self.posts.get(id).cloned() {
                    form.apply_to(&mut post);
                    post.date = display_date(chrono::Local::now().date_naive());
                    post.read_time = read_time_label(&post.content);
                    self.posts.update(post)?;
                    self.status = Some("saved".to_string());
                }
            }
        }
        self.overlay = Overlay::None;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Selection helpers
    // -----------------------------------------------------------------

    fn selected_home_post(&self) -> Option<&lumina_core::Post> {
        self.list_state
            .selected()
            .and_then(|i| self.posts.list().get(i))
    }

    fn selected_admin_post(&self) -> Option<&lumina_core::Post> {
        self.admin_state
            .selected()
            .and_then(|i| self.posts.list().get(i))
    }

    fn select_next_home(&mut self) {
        let len = self.posts.list().len();
        if len == 0 {
            return;
        }
        let next = self.list_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.list_state.select(Some(next));
    }

    fn select_prev_home(&mut self) {
        if self.posts.list().is_empty() {
            return;
        }
        let prev = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(prev));
    }

    fn select_next_admin(&mut self) {
        let len = self.posts.list().len();
        if len == 0 {
            return;
        }
        let next = self.admin_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.admin_state.select(Some(next));
    }

    fn select_prev_admin(&mut self) {
        if self.posts.list().is_empty() {
            return;
        }
        let prev = self.admin_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.admin_state.select(Some(prev));
    }

    fn clamp_admin_selection(&mut self) {
        let len = self.posts.list().len();
        if len == 0 {
            self.admin_state.select(None);
        } else if self.admin_state.selected().is_some_and(|i| i >= len) {
            self.admin_state.select(Some(len - 1));
        }
    }

    // -----------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------

    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        match self.session.effective_view() {
            Some(View::Home) | None => self.render_home(frame, chunks[0]),
            Some(View::PostDetail) => self.render_detail(frame, chunks[0]),
            Some(View::About) => Self::render_about(frame, chunks[0]),
            Some(View::Admin) => self.render_admin(frame, chunks[0]),
        }

        self.render_status_bar(frame, chunks[1]);

        match &mut self.overlay {
            Overlay::Search(view) => view.render(frame, area),
            Overlay::Chat(chat) => chat.render(frame, area),
            Overlay::Editor(form) => form.render(frame, area),
            Overlay::Login { input } => {
                Self::render_login(frame, area, input, self.session.login_error());
            }
            Overlay::ConfirmDelete { post_id } => Self::render_confirm(frame, area, post_id),
            Overlay::None => {}
        }
    }

    fn render_home(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem<'_>> = self
            .posts
            .list()
            .iter()
            .map(|post| {
                let count = self.comments.count_for_post(&post.id);
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            format!("[{}] ", post.category),
                            Style::default().fg(Color::Yellow),
                        ),
                        Span::styled(
                            post.title.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!(
                            "    {} · {} · {} comment(s)",
                            post.date, post.read_time, count
                        ),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Lumina · Enter read · / search · a about · d dashboard · q quit "),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_detail(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let Some(post) = self
            .session
            .selected_post_id()
            .and_then(|id| self.posts.get(id))
        else {
            self.render_home(frame, area);
            return;
        };

        let mut lines: Vec<Line<'_>> = vec![
            Line::from(Span::styled(
                post.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "{} · {} · {} · {}",
                    post.author, post.date, post.read_time, post.category
                ),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];

        for block in render(&post.content) {
            match block {
                DocBlock::Heading { level, text } => {
                    lines.push(Line::from(Span::styled(
                        format!("{} {}", "#".repeat(usize::from(level)), text),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )));
                }
                DocBlock::Quote(text) => {
                    lines.push(Line::from(Span::styled(
                        format!("  > {text}"),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::ITALIC),
                    )));
                }
                DocBlock::CodePlaceholder => {
                    lines.push(Line::from(Span::styled(
                        "  [code block]",
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                DocBlock::LineBreak => lines.push(Line::from("")),
                DocBlock::Paragraph(text) => lines.push(Line::from(text)),
            }
        }

        let post_comments = self.comments.for_post(&post.id);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Comments ({})", post_comments.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for comment in &post_comments {
            lines.push(Line::from(Span::styled(
                format!("{} · {}", comment.author, comment.date),
                Style::default().fg(Color::Yellow),
            )));
            lines.push(Line::from(format!("  {}", comment.content)));
        }

        let body_area = if self.comment_form.is_some() {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(6)])
                .split(area);
            self.render_comment_form(frame, chunks[1]);
            chunks[0]
        } else {
            area
        };

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.detail_scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" b back · c comment · i ask · / search · q quit "),
            );
        frame.render_widget(paragraph, body_area);
    }

    fn render_comment_form(&self, frame: &mut Frame<'_>, area: Rect) {
        let Some(form) = &self.comment_form else {
            return;
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3)])
            .split(area);

        let focus = Style::default().fg(Color::Cyan);
        let author = Paragraph::new(form.author.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if form.on_body { Style::default() } else { focus })
                .title(" Name "),
        );
        frame.render_widget(author, chunks[0]);

        let body = Paragraph::new(form.body.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if form.on_body { focus } else { Style::default() })
                .title(" Comment · Tab switch · Enter post · Esc cancel "),
        );
        frame.render_widget(body, chunks[1]);
    }

    fn render_about(frame: &mut Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new(ABOUT_TEXT)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" About · b back · q quit "),
            );
        frame.render_widget(paragraph, area);
    }

    fn render_admin(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem<'_>> = self
            .posts
            .list()
            .iter()
            .map(|post| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<14}", post.id),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(post.title.clone()),
                    Span::styled(
                        format!("  [{}] {}", post.category, post.date),
                        Style::default().fg(Color::Yellow),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(
                " Dashboard · n new · e edit · x delete · L logout · b back · q quit ",
            ))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.admin_state);
    }

    fn render_login(frame: &mut Frame<'_>, area: Rect, input: &str, error: bool) {
        let popup = centered_rect(40, 20, area);
        frame.render_widget(Clear, popup);

        let masked = "*".repeat(input.chars().count());
        let title = if error {
            " Incorrect password. Try again · Esc cancel "
        } else {
            " Editor password · Enter login · Esc cancel "
        };
        let style = if error {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        let widget = Paragraph::new(masked).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(title),
        );
        frame.render_widget(widget, popup);
    }

    fn render_confirm(frame: &mut Frame<'_>, area: Rect, post_id: &str) {
        let popup = centered_rect(40, 15, area);
        frame.render_widget(Clear, popup);
        let widget = Paragraph::new(format!("Delete post {post_id}? y/N"))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Confirm "));
        frame.render_widget(widget, popup);
    }

    fn render_status_bar(&self, frame: &mut Frame<'_>, area: Rect) {
        let text = self.status.clone().unwrap_or_else(|| {
            format!(
                "{} post(s){}",
                self.posts.list().len(),
                if self.session.is_authenticated() {
                    " · logged in"
                } else {
                    ""
                }
            )
        });
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}
