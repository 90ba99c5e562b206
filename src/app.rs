use babybot::config::Config;
use babybot::controller::{ConversationController, GrokController};
use babybot::grok::DEFAULT_MODEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub controller: GrokController,

    // Input box state
    pub input: String,
    pub input_cursor: usize, // cursor position in input, in chars

    // Chat viewport state
    pub chat_scroll: u16,
    pub chat_height: u16, // inner height of the chat area, set during render
    pub chat_width: u16,  // inner width, used for wrap calculations
    pub selected: Option<usize>, // message selected for deletion

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation
}

impl App {
    pub fn new(model_override: Option<String>) -> Self {
        // Load config
        let config = Config::load().unwrap_or_else(|_| Config::new());

        let model = model_override
            .or_else(|| config.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            should_quit: false,
            input_mode: InputMode::Editing,
            controller: GrokController::new(config, model),

            input: String::new(),
            input_cursor: 0,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            selected: None,

            animation_frame: 0,
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.controller.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    // Message selection (Normal mode, for deletion)
    pub fn select_next(&mut self) {
        let len = self.controller.messages().len();
        if len > 0 {
            let current = self.selected.map(|i| i + 1).unwrap_or(0);
            self.selected = Some(current.min(len - 1));
            self.scroll_to_selected();
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(current) = self.selected {
            self.selected = Some(current.saturating_sub(1));
            self.scroll_to_selected();
        } else if !self.controller.messages().is_empty() {
            self.selected = Some(0);
            self.scroll_to_selected();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Delete the selected message and keep the selection in bounds.
    pub fn delete_selected(&mut self) {
        if let Some(i) = self.selected {
            self.controller.delete_message(i);
            let len = self.controller.messages().len();
            if len == 0 {
                self.selected = None;
            } else if i >= len {
                self.selected = Some(len - 1);
            }
        }
    }

    // Chat scrolling
    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max_scroll = self.chat_line_count().saturating_sub(self.chat_height);
        if self.chat_scroll < max_scroll {
            self.chat_scroll += 1;
        }
    }

    pub fn scroll_half_page_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(self.chat_height / 2);
    }

    pub fn scroll_half_page_down(&mut self) {
        let max_scroll = self.chat_line_count().saturating_sub(self.chat_height);
        self.chat_scroll = (self.chat_scroll + self.chat_height / 2).min(max_scroll);
    }

    /// Scroll so the newest message (or the "Thinking..." indicator) is visible.
    pub fn scroll_to_bottom(&mut self) {
        let total_lines = self.chat_line_count();
        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };
        self.chat_scroll = total_lines.saturating_sub(visible_height);
    }

    /// Estimated rendered line count for the conversation, matching the
    /// wrap behavior of the chat paragraph.
    fn chat_line_count(&self) -> u16 {
        let wrap_width = self.wrap_width();

        let mut total_lines: u16 = 0;
        for msg in self.controller.messages() {
            total_lines += 1; // Role label line
            total_lines += wrapped_line_count(&msg.content, wrap_width);
            total_lines += 1; // Blank line after message
        }

        if self.controller.is_loading() {
            total_lines += 2; // Label plus the thinking indicator
        }

        total_lines
    }

    fn wrap_width(&self) -> usize {
        if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        }
    }

    fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected else {
            return;
        };

        let wrap_width = self.wrap_width();
        let mut start_line: u16 = 0;

        for (i, msg) in self.controller.messages().iter().enumerate() {
            let lines = 1 + wrapped_line_count(&msg.content, wrap_width);
            let end_line = start_line + lines;

            if i == idx {
                if start_line < self.chat_scroll {
                    self.chat_scroll = start_line;
                } else if end_line > self.chat_scroll + self.chat_height {
                    self.chat_scroll = end_line.saturating_sub(self.chat_height);
                }
                break;
            }

            start_line = end_line + 1; // +1 for the blank separator
        }
    }
}

/// Number of lines `content` occupies when wrapped at `width` columns.
/// Uses character counts, not byte lengths, for proper UTF-8 handling.
fn wrapped_line_count(content: &str, width: usize) -> u16 {
    let mut count: u16 = 0;
    for line in content.lines() {
        let char_count = line.chars().count();
        if char_count == 0 {
            count += 1; // Empty line still takes one line
        } else {
            count += ((char_count / width.max(1)) + 1) as u16;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_messages(n: usize) -> App {
        std::env::remove_var("XAI_API_KEY");

        let mut app = App {
            should_quit: false,
            input_mode: InputMode::Editing,
            controller: GrokController::new(Config::new(), DEFAULT_MODEL.to_string()),
            input: String::new(),
            input_cursor: 0,
            chat_scroll: 0,
            chat_height: 10,
            chat_width: 40,
            selected: None,
            animation_frame: 0,
        };
        // Without an API key each send resolves synchronously into a user
        // turn plus a notice, so the store fills without any network.
        for i in 0..n {
            app.controller.send_message(&format!("message {}", i));
        }
        app
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app_with_messages(2); // 4 messages total

        app.select_prev();
        assert_eq!(app.selected, Some(0));

        for _ in 0..10 {
            app.select_next();
        }
        assert_eq!(app.selected, Some(3));
    }

    #[test]
    fn test_delete_selected_clamps_selection() {
        let mut app = app_with_messages(2);

        app.selected = Some(3);
        app.delete_selected();
        assert_eq!(app.controller.messages().len(), 3);
        assert_eq!(app.selected, Some(2));

        app.delete_selected();
        app.delete_selected();
        app.delete_selected();
        assert!(app.controller.messages().is_empty());
        assert_eq!(app.selected, None);
    }

    #[test]
    fn test_delete_with_no_selection_is_a_no_op() {
        let mut app = app_with_messages(1);
        app.delete_selected();
        assert_eq!(app.controller.messages().len(), 2);
    }

    #[test]
    fn test_wrapped_line_count_handles_width() {
        assert_eq!(wrapped_line_count("short", 40), 1);
        // 100 chars at width 40 wraps onto three lines
        let long = "x".repeat(100);
        assert_eq!(wrapped_line_count(&long, 40), 3);
        assert_eq!(wrapped_line_count("a\n\nb", 40), 3);
    }

    #[test]
    fn test_scroll_to_bottom_clamps_to_content() {
        let mut app = app_with_messages(1);
        app.scroll_to_bottom();
        // 2 messages, 3 lines each, fits inside a 10-line viewport
        assert_eq!(app.chat_scroll, 0);

        let mut app = app_with_messages(6);
        app.scroll_to_bottom();
        // 12 messages at 3 lines each is 36 lines; viewport shows 10
        assert_eq!(app.chat_scroll, 26);
    }
}
