pub mod api_utils;
pub mod export;
pub mod icons;
pub mod notice_center;
pub mod page_frame;
pub mod report_viewer;
