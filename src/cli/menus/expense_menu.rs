use super::main_menu::MenuError;
use super::sub_menu::{SubMenu, SubMenuItem};

/// Shared between the `fixed` and `variable` commands; the title is the only
/// difference between the two screens.
pub fn show(title: &'static str) -> Result<Option<&'static str>, MenuError> {
    let items = vec![
        SubMenuItem::new("add", "add", "Add an expense"),
        SubMenuItem::new("edit", "edit", "Edit an expense"),
        SubMenuItem::new("remove", "remove", "Remove an expense"),
        SubMenuItem::new("list", "list", "List expenses"),
        SubMenuItem::new("paid", "paid", "Toggle paid on an expense"),
    ];
    SubMenu::new(title, items).show()
}
