//! Application state module

mod editor;
mod model;
mod notice;
mod workflow;

pub use editor::*;
pub use model::*;
pub use notice::*;
pub use workflow::*;
