pub mod config_menu;
pub mod expense_menu;
pub mod income_menu;
pub mod main_menu;
pub mod operational_menu;
pub mod sub_menu;
pub mod tax_menu;
pub mod template_menu;

use crate::cli::core::CommandError;

pub use main_menu::MenuError;

pub fn menu_error_to_command_error(err: MenuError) -> CommandError {
    match err {
        MenuError::Interrupted | MenuError::EndOfInput => CommandError::ExitRequested,
        MenuError::Io(io_err) => CommandError::Io(io_err),
    }
}
