//! Data models for life configs, periods and colors.
//!
//! This module contains the core data structures used throughout the application.
//! Models are independent of UI and loading logic.

pub mod life;
pub mod rgb;

// Re-export all model types
pub use life::{LifeConfig, LifePeriod, YearlyEvent};
pub use rgb::RgbColor;
