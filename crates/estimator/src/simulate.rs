//! Simulation invocation and revert classification
//!
//! A simulateHandleOp call has four terminal states: the diagnostic revert
//! decoded to an execution result, a validation failure (FailedOp), an
//! opaque failure (plain revert string or missing revert), or an
//! unclassifiable error. Each one is mapped explicitly here.

use crate::error::EstimationError;
use ethers::{
    providers::{spoof, Middleware},
    types::{Address, Bytes},
};
use tracing::trace;
use uopgas_contracts::{EntryPoint, EntryPointError, ExecutionResult};
use uopgas_primitives::UserOperation;

/// Outcome of a simulateHandleOp call
#[derive(Clone, Debug)]
pub enum SimulationResult {
    /// The simulation could not produce the diagnostic revert; carries the
    /// reason reported by the node or contract
    Failed(String),
    /// The decoded execution result
    Execution(ExecutionResult),
}

pub(crate) async fn simulate_handle_op<M: Middleware + 'static>(
    entry_point: &EntryPoint<M>,
    uo: &UserOperation,
    target: Address,
    target_call_data: Bytes,
    state: &spoof::State,
) -> Result<SimulationResult, EstimationError> {
    trace!("simulating user operation from {:?} with target {target:?}", uo.sender);

    match entry_point.simulate_handle_op(uo.clone(), target, target_call_data, state).await {
        Ok(res) => Ok(SimulationResult::Execution(res)),
        Err(err @ EntryPointError::NoRevert { .. }) => {
            Ok(SimulationResult::Failed(err.to_string()))
        }
        Err(EntryPointError::ExecutionReverted(reason)) => Ok(SimulationResult::Failed(reason)),
        Err(err) => Err(err.into()),
    }
}
