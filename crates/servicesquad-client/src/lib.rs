//! ServiceSquad client library
//!
//! This crate provides the core functionality for the ServiceSquad desktop client,
//! including the login/signup flow, networking, and state management.

pub mod config;
pub mod network;
pub mod session;
pub mod state;
pub mod ui;
