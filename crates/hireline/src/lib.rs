//! Recruitment pipeline library: candidate tracking through a fixed eight-stage
//! pipeline, verification checks with evidence attachments, and offer-letter
//! generation behind explicit persistence and notification boundaries.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
