//! Application core: pure decision logic, zero I/O.
//!
//! This module contains the business rules for the node: button gesture
//! routing, poll dispatch, publish gating, and orientation reporting.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod service;
