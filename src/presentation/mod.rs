pub mod render;
pub mod view;

pub use render::{render_json, render_text};
pub use view::{
    build_dashboard, bubbles, location_timeline, BarEntry, Bubble, DashboardRequest,
    DashboardView, Timeline, TimelinePoint,
};
