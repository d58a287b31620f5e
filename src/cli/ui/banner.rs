use crate::cli::output::current_preferences;
use crate::cli::shell_context::ShellContext;
use crate::cli::ui::formatting::Formatter;

pub struct Banner;

impl Banner {
    pub fn render(context: &ShellContext) {
        let formatter = Formatter::new();
        formatter.print_detail(Self::text(context));
    }

    /// One-line shell status: selected month, a `*` while the record
    /// has unsaved edits, and the prompt arrow.
    pub fn text(context: &ShellContext) -> String {
        let month = context.manager.selected_key().label();
        let dirty_marker = if context.manager.is_dirty() { "*" } else { "" };
        let arrow = if current_preferences().plain_mode {
            ">"
        } else {
            "⮞"
        };
        format!("{month}{dirty_marker} {arrow}")
    }
}
