//! # Bor Test Suite
//!
//! Workspace-level tests for the Bor API backend.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Tracing init and backend fixtures
//! ├── conformance.rs    # Contract checks shared by full and light backends
//! └── integration/      # State-sync delivery and JSON-RPC flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bor-tests
//!
//! # With backend logs
//! RUST_LOG=bor_api_backend=debug cargo test -p bor-tests -- --nocapture
//! ```

pub mod conformance;
pub mod integration;
