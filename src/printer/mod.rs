//! # Printer Configurations
//!
//! Hardware capability presets for supported printer models.

pub mod config;

pub use config::PrinterConfig;
