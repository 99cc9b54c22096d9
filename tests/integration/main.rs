//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the node core against
//! mock adapters.  All tests run on the host with no real hardware
//! required.

mod button_flow_tests;
mod mock_hw;
mod node_flow_tests;
