//! Search overlay with results updating as you type.

use crossterm::event::{KeyCode, KeyEvent};
use lumina_core::Post;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::chat::centered_rect;

/// A hit captured from the corpus at search time.
#[derive(Clone)]
pub struct SearchHit {
    pub post_id: String,
    pub title: String,
    pub category: String,
}

/// The action the overlay wants the caller to take.
pub enum SearchAction {
    /// Open the selected post.
    Open(String),
    /// Close the overlay.
    Close,
}

pub struct SearchView {
    query: String,
    results: Vec<SearchHit>,
    state: ListState,
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            state: ListState::default(),
        }
    }

    /// Re-run the query against the current corpus.
    pub fn refresh(&mut self, posts: &[Post]) {
        self.results = lumina_search::search(&self.query, posts)
            .into_iter()
            .map(|p| SearchHit {
                post_id: p.id.clone(),
                title: p.title.clone(),
                category: p.category.clone(),
            })
            .collect();
        if self.state.selected().is_none_or(|i| i >= self.results.len()) {
            self.state
                .select(if self.results.is_empty() { None } else { Some(0) });
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, posts: &[Post]) -> Option<SearchAction> {
        match key.code {
            KeyCode::Esc => Some(SearchAction::Close),
            KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Up => {
                self.select_prev();
                None
            }
            KeyCode::Enter => self
                .state
                .selected()
                .and_then(|i| self.results.get(i))
                .map(|hit| SearchAction::Open(hit.post_id.clone())),
            KeyCode::Backspace => {
                self.query.pop();
                self.refresh(posts);
                None
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.refresh(posts);
                None
            }
            _ => None,
        }
    }

    fn select_next(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let next = self
            .state
            .selected()
            .map_or(0, |i| (i + 1).min(self.results.len() - 1));
        self.state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let prev = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(prev));
    }

    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let popup = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(popup);

        let input = Paragraph::new(self.query.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search · Esc to close "),
        );
        frame.render_widget(input, chunks[0]);

        let items: Vec<ListItem<'_>> = self
            .results
            .iter()
            .map(|hit| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("[{}] ", hit.category),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(hit.title.clone()),
                ]))
            })
            .collect();

        let title = if self.query.trim().is_empty() {
            " type to search ".to_string()
        } else {
            format!(" {} result(s) ", self.results.len())
        };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, chunks[1], &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_core::seed::seed_posts;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn typing_refreshes_results() {
        let posts = seed_posts();
        let mut view = SearchView::new();
        for c in "design".chars() {
            view.handle_key(key(KeyCode::Char(c)), &posts);
        }
        assert!(!view.results.is_empty());
        assert_eq!(view.state.selected(), Some(0));
    }

    #[test]
    fn blank_query_has_no_results() {
        let posts = seed_posts();
        let mut view = SearchView::new();
        view.refresh(&posts);
        assert!(view.results.is_empty());
        assert_eq!(view.state.selected(), None);
    }

    #[test]
    fn enter_opens_selected_hit() {
        let posts = seed_posts();
        let mut view = SearchView::new();
        for c in "design".chars() {
            view.handle_key(key(KeyCode::Char(c)), &posts);
        }
        match view.handle_key(key(KeyCode::Enter), &posts) {
            Some(SearchAction::Open(id)) => assert!(!id.is_empty()),
            other => panic!("expected open, got {:?}", other.is_some()),
        }
    }

    #[test]
    fn esc_closes() {
        let posts = seed_posts();
        let mut view = SearchView::new();
        assert!(matches!(
            view.handle_key(key(KeyCode::Esc), &posts),
            Some(SearchAction::Close)
        ));
    }
}
