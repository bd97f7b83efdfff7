// Shared ANSI/VT100 control sequences used across the UI.

/// Switch to the terminal's alternate screen buffer (smcup).
pub const ENTER_ALT_SCREEN: &str = crate::csi!("?1049h");
/// Return to the main screen buffer (rmcup).
pub const EXIT_ALT_SCREEN: &str = crate::csi!("?1049l");

pub const CLEAR_SCREEN: &str = crate::csi!("2J");
pub const CURSOR_HOME: &str = crate::csi!("H");
/// Clear from cursor to end of line.
pub const CLEAR_LINE_REST: &str = crate::csi!("0K");
pub const CURSOR_UP_ONE: &str = crate::csi!("1A");

pub const HIDE_CURSOR: &str = crate::csi!("?25l");
pub const SHOW_CURSOR: &str = crate::csi!("?25h");
/// Request a blinking block cursor (if the terminal supports it).
pub const CURSOR_BLINKING_BLOCK: &str = crate::csi!("1 q");

pub const STYLE_RESET: &str = crate::csi!("0m");
pub const STYLE_BOLD: &str = crate::csi!("1m");
pub const STYLE_ITALIC: &str = crate::csi!("3m");
pub const FG_LIGHT_GRAY: &str = crate::csi!("37m");
pub const FG_DARK_GRAY: &str = crate::csi!("90m");
pub const FG_RED: &str = crate::csi!("31m");
pub const FG_GREEN: &str = crate::csi!("32m");
pub const FG_YELLOW: &str = crate::csi!("33m");
/// Selected grid cells.
pub const SELECTED_STYLE: &str = crate::csi2!("1m", "32m");
/// Dark gray background with white text for input prompts.
pub const PROMPT_STYLE: &str = crate::csi2!("38;5;15m", "48;5;236m");

/// Wrap `text` in `style` and a reset.
pub fn paint(style: &str, text: &str) -> String {
    format!("{style}{text}{STYLE_RESET}")
}
