use crate::ui::ansi::{
    CLEAR_LINE_REST, CLEAR_SCREEN, CURSOR_HOME, CURSOR_UP_ONE, FG_LIGHT_GRAY, PROMPT_STYLE,
    STYLE_BOLD, STYLE_ITALIC, STYLE_RESET,
};
use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

const BANNER_INNER_WIDTH: usize = 50;

/// Screen-level helpers (banner, clearing, centered prompts).
#[derive(Debug, Default, Clone)]
pub struct UiChrome {
    util: WidthUtil,
}

impl UiChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banner_lines(&self) -> Vec<String> {
        let version = env!("CARGO_PKG_VERSION");
        let title = format!(
            "{STYLE_BOLD}S L O T D E S K{STYLE_RESET} {FG_LIGHT_GRAY}(v{version}){STYLE_RESET}"
        );
        let subtitle = format!("{STYLE_ITALIC}Half-hour bookings and a job queue{STYLE_RESET}");
        let blank = format!("│{}│", " ".repeat(BANNER_INNER_WIDTH));
        vec![
            format!("╭{}╮", "─".repeat(BANNER_INNER_WIDTH)),
            blank.clone(),
            format!("│{}│", self.center_in_box(&title, BANNER_INNER_WIDTH)),
            format!("│{}│", self.center_in_box(&subtitle, BANNER_INNER_WIDTH)),
            blank,
            format!("╰{}╯", "─".repeat(BANNER_INNER_WIDTH)),
        ]
    }

    pub fn print_banner(&self) {
        for line in self.banner_lines() {
            println!("{line}");
        }
    }

    pub fn clear_screen(&self) {
        print!("{CLEAR_SCREEN}{CURSOR_HOME}");
        let _ = io::stdout().flush();
    }

    pub fn print_centered_prefix_plain(&self, prefix: &str, box_width: usize) {
        let line = self.format_centered_prefix(prefix, box_width);
        print!("{line}");
        let _ = io::stdout().flush();
    }

    /// Shaded prompt bar with the cursor parked after `prompt`.
    pub fn print_prompt(&self, prompt: &str) {
        self.print_prompt_padding_line();
        print!("{PROMPT_STYLE}{prompt}{CLEAR_LINE_REST}{STYLE_RESET}\n");
        print!("{PROMPT_STYLE}{CLEAR_LINE_REST}{STYLE_RESET}");
        let column = self.util.visible_width(prompt) + 1;
        print!("{CURSOR_UP_ONE}\x1B[{column}G{PROMPT_STYLE}");
        let _ = io::stdout().flush();
    }

    pub fn print_prompt_bottom_padding(&self) {
        self.print_prompt_padding_line();
        let _ = io::stdout().flush();
    }

    fn print_prompt_padding_line(&self) {
        print!("{PROMPT_STYLE}{CLEAR_LINE_REST}{STYLE_RESET}\n");
    }

    pub fn println_centered_in_box(&self, s: &str, box_width: usize) {
        println!("{}", self.format_centered_line(s, box_width));
    }

    pub fn format_centered_prefix(&self, prefix: &str, box_width: usize) -> String {
        let left = self.util.center_pad(box_width);
        format!("{}{}", " ".repeat(left), prefix)
    }

    pub fn format_centered_line(&self, s: &str, box_width: usize) -> String {
        let left = self.util.center_pad(box_width);
        let inner_pad = box_width.saturating_sub(self.util.visible_width(s)) / 2;
        format!("{}{}", " ".repeat(left + inner_pad), s)
    }

    fn center_in_box(&self, content: &str, width: usize) -> String {
        let content_width = self.util.visible_width(content);
        if content_width >= width {
            return content.to_string();
        }
        let left = (width - content_width) / 2;
        let right = width - content_width - left;
        format!("{}{}{}", " ".repeat(left), content, " ".repeat(right))
    }
}
