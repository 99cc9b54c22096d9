//! Battery sensor node decision core.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  Hardware stays behind the port traits in
//! [`app::ports`]; the adapters here are the host-side implementations.

#![deny(unused_must_use)]

pub mod app;
pub mod button;
pub mod config;
pub mod orientation;
pub mod poller;
pub mod publish;
pub mod scheduler;

pub mod error;

pub mod adapters;
