//! Configuration module for Juicer.
//!
//! Settings come from the environment; the CLI may override single fields.

mod settings;

pub use settings::Settings;
