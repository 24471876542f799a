//! Fuzzy-inference sustainability scoring for rural properties.
//!
//! [`scoring`] turns survey answers into economic, social, and environmental
//! indices and fuses them into a composite score. [`survey`] holds the records,
//! the persistence seam, and the orchestrator that writes scores back.

pub mod config;
pub mod error;
pub mod scoring;
pub mod survey;
pub mod telemetry;
