//! Reelboard: server-synchronised list screens for a video catalog.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
