use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::RecordManager,
    storage::json_backend::JsonStore,
};

use super::commands::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Shared state threaded through every command handler. One instance lives
/// for the whole shell session.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: RecordManager,
    pub storage: JsonStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl std::fmt::Debug for ShellContext {
    // ColorfulTheme is not Debug, so this cannot be derived.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellContext")
            .field("mode", &self.mode)
            .field("last_command", &self.last_command)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl ShellContext {
    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }
}
