use super::main_menu::MenuError;
use super::sub_menu::{SubMenu, SubMenuItem};

pub fn show() -> Result<Option<&'static str>, MenuError> {
    let items = vec![
        SubMenuItem::new("show", "show", "Show current preferences"),
        SubMenuItem::new("set", "set", "Change a preference"),
        SubMenuItem::new("backup", "backup", "Back up the preference file"),
        SubMenuItem::new("backups", "backups", "List preference backups"),
        SubMenuItem::new("restore", "restore", "Restore a preference backup"),
    ];
    SubMenu::new("config", items).show()
}
