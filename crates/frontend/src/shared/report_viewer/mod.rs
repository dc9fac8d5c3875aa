//! Просмотр отчёта: панель фильтров по описанию, запуск через backend,
//! таблица с форматтером отчёта и кнопки панели (выгрузка).

pub mod api;
pub mod controls;
pub mod display_mode;
pub mod view;

pub use view::ReportViewer;
