// ABOUTME: TUI state — current screen and tab, login step, dashboard data, transcript snapshot, input buffer.
// ABOUTME: Updated from library notifications and key handling; rendering reads it only.

use std::time::Instant;

use crate::auth::{LoginFlow, LoginStep};
use crate::chat::Message;
use crate::rewards::{Analytics, Card, RewardSummary, mock_analytics, mock_cards};

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

/// Dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Analytics,
    Chat,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Analytics, Tab::Chat];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Analytics => "Analytics",
            Tab::Chat => "Chat",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Overview => Tab::Analytics,
            Tab::Analytics => Tab::Chat,
            Tab::Chat => Tab::Overview,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Tab::Overview => Tab::Chat,
            Tab::Analytics => Tab::Overview,
            Tab::Chat => Tab::Analytics,
        }
    }
}

/// Reachability of the remote query endpoint, as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    /// No client configured; every reply is local.
    Disabled,
    Checking,
    Online,
    Offline,
}

/// One-line feedback shown under the login form or above the chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

/// Full TUI application state.
pub struct TuiState {
    pub screen: Screen,
    pub tab: Tab,
    pub login: LoginFlow,
    pub notice: Option<Notice>,
    pub user_name: Option<String>,
    pub cards: Vec<Card>,
    pub summary: RewardSummary,
    pub analytics: Analytics,
    pub messages: Vec<Message>,
    pub composing: bool,
    pub input: String,
    pub cursor_pos: usize,
    pub scroll_offset: u16,
    pub remote: RemoteStatus,
    pub session_start: Instant,
}

impl TuiState {
    /// Create a state on the login screen with the demo dashboard data loaded.
    pub fn new(remote: RemoteStatus) -> Self {
        let cards = mock_cards();
        Self {
            screen: Screen::Login,
            tab: Tab::Overview,
            login: LoginFlow::new(),
            notice: None,
            user_name: None,
            summary: RewardSummary::from_cards(&cards),
            cards,
            analytics: mock_analytics(),
            messages: Vec::new(),
            composing: false,
            input: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            remote,
            session_start: Instant::now(),
        }
    }

    /// Switch screens to follow the session: logged in shows the dashboard.
    pub fn set_user(&mut self, user_name: Option<String>) {
        let was_logged_in = self.user_name.is_some();
        self.user_name = user_name;
        match (&self.user_name, was_logged_in) {
            (Some(_), false) => {
                self.screen = Screen::Dashboard;
                self.tab = Tab::Overview;
                self.clear_input();
            }
            (None, true) => {
                self.screen = Screen::Login;
                self.login.back();
                self.clear_input();
            }
            _ => {}
        }
    }

    /// Replace the transcript snapshot and reset scroll to bottom.
    pub fn set_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.scroll_offset = 0;
    }

    pub fn set_notice(&mut self, text: impl Into<String>, is_error: bool) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error,
        });
    }

    /// Whether the login screen is asking for the verification code.
    pub fn awaiting_code(&self) -> bool {
        matches!(self.login.step(), LoginStep::EnterCode { .. })
    }

    /// Submit the current input buffer. Returns the trimmed text if non-empty.
    pub fn submit_input(&mut self) -> Option<String> {
        let trimmed = self.input.trim().to_string();
        if trimmed.is_empty() {
            return None;
        }
        self.clear_input();
        Some(trimmed)
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    /// Clamp the cursor position to the valid character range of the input buffer.
    pub fn clamp_cursor(&mut self) {
        self.cursor_pos = self.cursor_pos.min(self.input_char_len());
    }

    /// Return the current cursor byte index in the UTF-8 input buffer.
    pub fn cursor_byte_index(&self) -> usize {
        char_index_to_byte_index(&self.input, self.cursor_pos)
    }

    pub fn input_char_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at the cursor and advance by one character.
    pub fn insert_char_at_cursor(&mut self, c: char) {
        self.clamp_cursor();
        let byte_index = self.cursor_byte_index();
        self.input.insert(byte_index, c);
        self.cursor_pos += 1;
    }

    /// Delete the character before the cursor (backspace behavior).
    pub fn backspace_char(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos == 0 {
            return;
        }
        let end = self.cursor_byte_index();
        let start = char_index_to_byte_index(&self.input, self.cursor_pos - 1);
        self.input.replace_range(start..end, "");
        self.cursor_pos -= 1;
    }

    /// Delete the character at the cursor (delete behavior).
    pub fn delete_char_at_cursor(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos >= self.input_char_len() {
            return;
        }
        let start = self.cursor_byte_index();
        let end = char_index_to_byte_index(&self.input, self.cursor_pos + 1);
        self.input.replace_range(start..end, "");
    }

    pub fn move_cursor_left(&mut self) {
        self.clamp_cursor();
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos < self.input_char_len() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.input_char_len();
    }
}

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    if char_index == 0 {
        return 0;
    }
    match s.char_indices().nth(char_index) {
        Some((idx, _)) => idx,
        None => s.len(),
    }
}
