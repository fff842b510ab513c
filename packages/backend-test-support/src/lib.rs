//! Backend test support utilities
//!
//! Shared by the backend's unit tests (through `ctor`) and its integration
//! test binaries.

pub mod logging;
