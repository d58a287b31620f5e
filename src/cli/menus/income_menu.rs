use super::main_menu::MenuError;
use super::sub_menu::{SubMenu, SubMenuItem};

pub fn show() -> Result<Option<&'static str>, MenuError> {
    let items = vec![
        SubMenuItem::new("add", "add", "Add a commission income"),
        SubMenuItem::new("edit", "edit", "Edit a commission income"),
        SubMenuItem::new("remove", "remove", "Remove a commission income"),
        SubMenuItem::new("list", "list", "List commission incomes"),
        SubMenuItem::new("received", "received", "Toggle received on an income"),
        SubMenuItem::new("base", "base", "Set the month's base income"),
    ];
    SubMenu::new("income", items).show()
}
