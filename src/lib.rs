//! Surveyscope - Survey Analysis & Population Statistics Dashboard
//!
//! Loads a survey-results export, reshapes response records into chart
//! series payloads, and renders survey and population charts.

pub mod analysis;
pub mod charts;
pub mod data;
pub mod gui;
