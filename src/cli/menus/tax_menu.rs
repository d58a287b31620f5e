use super::main_menu::MenuError;
use super::sub_menu::{SubMenu, SubMenuItem};

pub fn show() -> Result<Option<&'static str>, MenuError> {
    let items = vec![
        SubMenuItem::new("add", "add", "Add a tax"),
        SubMenuItem::new("edit", "edit", "Edit a tax"),
        SubMenuItem::new("remove", "remove", "Remove a tax"),
        SubMenuItem::new("list", "list", "List taxes"),
        SubMenuItem::new("paid", "paid", "Toggle paid on a tax"),
    ];
    SubMenu::new("tax", items).show()
}
