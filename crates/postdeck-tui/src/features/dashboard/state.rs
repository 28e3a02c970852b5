//! Dashboard view state: post stats, upcoming list, schedule form.

use postdeck_core::api::types::PLATFORMS;
use postdeck_core::api::{AnalyticsSummary, Post, PostStatus};

use crate::common::TextField;

/// Upcoming list shows at most this many pending posts.
pub const UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Default)]
pub struct DashboardState {
    /// Whether the post list has been fetched at least once.
    pub posts_loaded: bool,
    /// Total post count, all statuses.
    pub total_posts: usize,
    /// Pending posts in server order.
    pub pending: Vec<Post>,
    /// 30-day summary for the stat tiles.
    pub summary: Option<AnalyticsSummary>,
    /// Selection inside the visible upcoming list.
    pub selected: usize,
    pub form: PostForm,
}

impl DashboardState {
    /// Replaces the post data with a freshly fetched collection.
    pub fn apply_posts(&mut self, posts: Vec<Post>) {
        self.total_posts = posts.len();
        self.pending = posts
            .into_iter()
            .filter(|p| p.status == PostStatus::Pending)
            .collect();
        self.posts_loaded = true;
        self.selected = self.selected.min(self.visible_count().saturating_sub(1));
    }

    pub fn visible_count(&self) -> usize {
        self.pending.len().min(UPCOMING_LIMIT)
    }

    /// The upcoming posts actually shown: first 5 pending, server order.
    pub fn upcoming(&self) -> &[Post] {
        &self.pending[..self.visible_count()]
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.upcoming().get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible_count() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Content,
    Time,
    MediaUrl,
    Platforms,
}

/// The schedule-a-post form.
#[derive(Debug)]
pub struct PostForm {
    pub content: TextField,
    /// Entered as local `YYYY-MM-DD HH:MM`.
    pub scheduled_time: TextField,
    pub media_url: TextField,
    /// One toggle per entry of [`PLATFORMS`].
    pub platforms: Vec<bool>,
    /// Cursor inside the platform toggle row.
    pub platform_cursor: usize,
    pub focus: PostField,
}

impl Default for PostForm {
    fn default() -> Self {
        Self {
            content: TextField::new(),
            scheduled_time: TextField::new(),
            media_url: TextField::new(),
            platforms: vec![false; PLATFORMS.len()],
            platform_cursor: 0,
            focus: PostField::Content,
        }
    }
}

impl PostForm {
    pub fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            PostField::Content => Some(&mut self.content),
            PostField::Time => Some(&mut self.scheduled_time),
            PostField::MediaUrl => Some(&mut self.media_url),
            PostField::Platforms => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            PostField::Content => PostField::Time,
            PostField::Time => PostField::MediaUrl,
            PostField::MediaUrl => PostField::Platforms,
            PostField::Platforms => PostField::Content,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            PostField::Content => PostField::Platforms,
            PostField::Time => PostField::Content,
            PostField::MediaUrl => PostField::Time,
            PostField::Platforms => PostField::MediaUrl,
        };
    }

    pub fn toggle_platform(&mut self) {
        if let Some(flag) = self.platforms.get_mut(self.platform_cursor) {
            *flag = !*flag;
        }
    }

    pub fn platform_cursor_left(&mut self) {
        self.platform_cursor = self.platform_cursor.saturating_sub(1);
    }

    pub fn platform_cursor_right(&mut self) {
        self.platform_cursor = (self.platform_cursor + 1).min(PLATFORMS.len() - 1);
    }

    /// Names of the platforms currently toggled on.
    pub fn selected_platforms(&self) -> Vec<String> {
        PLATFORMS
            .iter()
            .zip(&self.platforms)
            .filter(|(_, on)| **on)
            .map(|(name, _)| (*name).to_string())
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
