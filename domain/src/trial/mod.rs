//! Consistency trial domain.
//!
//! - [`entities::Session`] - the trial aggregate and its [`entities::TrialPhase`]
//! - [`reducer`] - every legal transition of a session
//! - [`turn_result::TurnResult`] - a validated result from the reasoning service
//! - [`request::TurnRequest`] - what is sent to the reasoning service
//! - [`records`] - principles, contradictions and transcript lines

pub mod entities;
pub mod rating;
pub mod records;
pub mod reducer;
pub mod request;
pub mod rules;
pub mod turn_result;
mod wire;
