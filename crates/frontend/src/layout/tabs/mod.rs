//! Вкладки:
//! - `page` - обёртка контента вкладки
//! - `registry` - ключ вкладки → View и заголовки

pub mod page;
pub mod registry;

pub use page::TabPage;
pub use registry::{menu_items, tab_label_for_key};
