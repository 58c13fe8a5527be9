//! Account abstraction (ERC-4337) entry point contract interface
//!
//! Typed bindings for the v0.6 entry point, the revert-data decoder and a
//! thin wrapper around the simulation entry points.

pub mod entry_point;
mod error;
mod gen;
pub mod utils;

pub use entry_point::{EntryPoint, SimulateValidationResult};
pub use error::{decode_revert_error, decode_revert_string, EntryPointError};
pub use gen::{
    entry_point_api, DepositInfo, EntryPointAPI, ExecutionResult, FailedOp, SenderAddressResult,
    SignatureValidationFailed, ValidationResult, ValidationResultWithAggregation,
};
