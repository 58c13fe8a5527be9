//! Estimation error taxonomy
//!
//! Every failure surfaces as a distinguishable kind so that callers can
//! react differently (reject the operation, retry, report to the user).

use ethers::types::{Address, Bytes, U256};
use thiserror::Error;
use uopgas_contracts::EntryPointError;
use uopgas_primitives::constants::error_codes;

/// Gas estimation error
#[derive(Debug, Error, Clone)]
pub enum EstimationError {
    /// Malformed user operation fields, rejected before any RPC call
    #[error("invalid user operation: {message}")]
    Validation {
        /// What is wrong with the operation
        message: String,
    },

    /// Revert data did not match any known selector or shape
    #[error("decode error: {inner}")]
    Decode {
        /// The inner error message, carries the raw bytes for diagnosis
        inner: String,
    },

    /// The simulation call failed for reasons unrelated to validation logic
    #[error("simulation error: {inner}")]
    Simulation {
        /// The inner error message
        inner: String,
    },

    /// On-chain validation rejected the operation
    #[error("user operation {op_index} rejected: {reason}")]
    ValidationFailure {
        /// Index of the operation inside the simulated bundle
        op_index: U256,
        /// Revert reason reported by the entry point (AAxx-prefixed)
        reason: String,
        /// Stable numeric code, see [error_codes]
        code: i32,
    },

    /// Aggregated signature validation failed
    #[error("signature validation failed: aggregator {aggregator}")]
    SignatureValidationFailed {
        /// The aggregator that rejected the signatures
        aggregator: Address,
    },

    /// Target call inside simulateHandleOp did not succeed
    #[error("user operation call reverted: {target_result}")]
    CallExecutionFailed {
        /// Raw return data of the reverted call, for the caller to decode
        target_result: Bytes,
    },

    /// Provider or transport failure; the caller may retry
    #[error("provider error: {inner}")]
    Provider {
        /// The inner error message
        inner: String,
    },
}

impl EstimationError {
    /// Stable numeric code of this error (see [error_codes])
    pub fn code(&self) -> i32 {
        match self {
            EstimationError::Validation { .. } => error_codes::INVALID_USER_OP_FIELDS,
            EstimationError::Decode { .. } => error_codes::INTERNAL_WALLET_ERROR,
            EstimationError::Simulation { .. } => error_codes::SIMULATE_EXECUTION_FAILED,
            EstimationError::ValidationFailure { code, .. } => *code,
            EstimationError::SignatureValidationFailed { .. } => {
                error_codes::UNSUPPORTED_AGGREGATOR
            }
            EstimationError::CallExecutionFailed { .. } => {
                error_codes::WALLET_TRANSACTION_REVERTED
            }
            EstimationError::Provider { .. } => error_codes::INTERNAL_WALLET_ERROR,
        }
    }
}

/// Maps an AAxx revert reason to its validation error code
pub fn error_code_for_reason(reason: &str) -> i32 {
    if reason.starts_with("AA24") {
        error_codes::INVALID_WALLET_SIGNATURE
    } else if reason.starts_with("AA3") {
        error_codes::SIMULATE_PAYMASTER_VALIDATION_FAILED
    } else {
        error_codes::SIMULATE_VALIDATION_FAILED
    }
}

impl From<EntryPointError> for EstimationError {
    fn from(err: EntryPointError) -> Self {
        match err {
            EntryPointError::FailedOp(f) => EstimationError::ValidationFailure {
                op_index: f.op_index,
                code: error_code_for_reason(&f.reason),
                reason: f.reason,
            },
            EntryPointError::SignatureValidationFailed { aggregator } => {
                EstimationError::SignatureValidationFailed { aggregator }
            }
            EntryPointError::ExecutionReverted(reason) => {
                EstimationError::Simulation { inner: format!("execution reverted: {reason}") }
            }
            EntryPointError::NoRevert { .. } => {
                EstimationError::Simulation { inner: err.to_string() }
            }
            EntryPointError::Provider { inner } => EstimationError::Provider { inner },
            EntryPointError::ABI { inner } | EntryPointError::Decode { inner } => {
                EstimationError::Decode { inner }
            }
            EntryPointError::Other { inner } => EstimationError::Simulation { inner },
        }
    }
}
