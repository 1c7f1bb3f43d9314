//! Presentation-facing domain configuration values

pub mod output_format;

pub use output_format::OutputFormat;
