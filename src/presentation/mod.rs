//! Askama view models and template helpers.

pub mod admin;
pub mod views;
