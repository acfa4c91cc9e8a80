//! Chart rendering and logging.

mod dashboard;
mod gauge;
mod logging;
mod render;
mod scatter3d;
mod theme;

pub use dashboard::render_dashboard;
pub use gauge::render_gauge;
pub use logging::setup_logging;
pub use render::ChartOptions;
pub use scatter3d::render_scatter_3d;
pub use theme::Palette;
