//! Account abstraction (ERC-4337) primitive types
//!
//! This crate contains the primitive types and helper functions used by the
//! user operation gas estimation pipeline.

pub mod chain;
pub mod constants;
pub mod provider;
mod user_operation;
mod utils;

pub use user_operation::{
    UserOperation, UserOperationGasEstimation, UserOperationHash, UserOperationRequest,
};
pub use utils::get_address;
