mod app_view;
mod result_display;

pub use app_view::{render_header, render_view_state};
pub use result_display::ResultDisplay;
