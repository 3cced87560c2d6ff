//! Use cases (application services)

pub mod request_turn;
pub mod trial_controller;
