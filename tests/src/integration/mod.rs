//! # Integration Flows
//!
//! End-to-end behaviour across the bus, the backends and the RPC layer.

pub mod rpc_flows;
pub mod state_sync;
