//! User operation gas estimation for ERC-4337 entry points
//!
//! Estimates `callGasLimit`, `verificationGasLimit` and `preVerificationGas`
//! of a user operation by simulating it against the entry point contract
//! through read-only calls with state overrides, and decoding the structured
//! revert data the entry point uses as its return channel.

mod error;
mod estimator;
mod gas;
mod overrides;
mod sanity;
mod simulate;

pub use error::{error_code_for_reason, EstimationError};
pub use estimator::{create_gas_estimator, GasEstimator, VerificationGasEstimate};
pub use gas::{calculate_call_gas_limit, intrinsic_gas, Overhead};
pub use overrides::{build_state_override, SimulationFlags};
pub use sanity::validate_user_operation;
pub use simulate::SimulationResult;
