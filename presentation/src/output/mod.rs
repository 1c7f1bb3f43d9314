//! Renderers for reasoning chains and usage reports

pub mod console;
pub mod formatter;
pub mod html;
pub mod json;
pub mod markdown;

pub use formatter::{OutputFormatter, formatter_for};
