pub mod banner;
pub mod forms;
pub mod progress;
pub mod render;
pub mod tui;

/// Prints the welcome banner (unless disabled) and applies the prompt theme.
/// Call once at startup, after tracing init.
pub fn init_ui(show_banner: bool) {
    if show_banner {
        banner::print_welcome();
    }
    tui::apply_theme();
}
