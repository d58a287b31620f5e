use super::main_menu::MenuError;
use super::sub_menu::{SubMenu, SubMenuItem};

pub fn show() -> Result<Option<&'static str>, MenuError> {
    let items = vec![
        SubMenuItem::new("add", "add", "Add an operational expense"),
        SubMenuItem::new("edit", "edit", "Edit an operational expense"),
        SubMenuItem::new("remove", "remove", "Remove an operational expense"),
        SubMenuItem::new("list", "list", "List operational expenses"),
    ];
    SubMenu::new("op", items).show()
}
