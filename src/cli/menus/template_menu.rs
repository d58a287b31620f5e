use super::main_menu::MenuError;
use super::sub_menu::{SubMenu, SubMenuItem};

pub fn show() -> Result<Option<&'static str>, MenuError> {
    let items = vec![
        SubMenuItem::new("add", "add", "Add a fixed-expense template"),
        SubMenuItem::new("edit", "edit", "Edit a template"),
        SubMenuItem::new("remove", "remove", "Remove a template"),
        SubMenuItem::new("list", "list", "List templates"),
        SubMenuItem::new("apply", "apply", "Apply active templates to the open month"),
    ];
    SubMenu::new("template", items).show()
}
