pub mod banner;
pub mod formatting;
pub mod prompts;
pub mod table_renderer;

pub use table_renderer::{Alignment, Table, TableColumn};
