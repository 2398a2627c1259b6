//! PDF export: layout first, then rendering

mod layout;
mod measure;
mod render;

pub use layout::layout_form;
pub use measure::HelveticaMetrics;
pub use render::render_pdf;
