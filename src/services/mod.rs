//! Domain services that sit between the data model and the UI.
//!
//! - `timeline`: maps a life config onto the lifetime and yearly grids

pub mod timeline;

pub use timeline::{map_lifetime, map_year, LifetimeGrid, YearCell, YearGrid};
