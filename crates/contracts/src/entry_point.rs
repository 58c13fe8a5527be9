pub use super::error::EntryPointError;
use super::gen::{
    entry_point_api::{
        EntryPointAPIErrors, SenderAddressResult, UserOperation, ValidationResult,
        ValidationResultWithAggregation,
    },
    DepositInfo, EntryPointAPI,
};
use crate::{error::decode_revert_error, gen::ExecutionResult};
use ethers::{
    prelude::ContractError,
    providers::{spoof, Middleware, RawCall},
    types::{Address, Bytes, U256},
};
use std::sync::Arc;

/// Result of a simulateValidation call, by aggregation flavour
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimulateValidationResult {
    ValidationResult(ValidationResult),
    ValidationResultWithAggregation(ValidationResultWithAggregation),
}

/// Thin wrapper around the entry point contract
///
/// The simulation entry points of the contract return their results by
/// reverting; every `simulate_*` method here issues a read-only call and
/// decodes the revert payload into the typed result.
#[derive(Clone)]
pub struct EntryPoint<M: Middleware + 'static> {
    eth_client: Arc<M>,
    address: Address,
    entry_point_api: EntryPointAPI<M>,
}

impl<M: Middleware + 'static> EntryPoint<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        let entry_point_api = EntryPointAPI::new(address, eth_client.clone());
        Self { eth_client, address, entry_point_api }
    }

    pub fn entry_point_api(&self) -> &EntryPointAPI<M> {
        &self.entry_point_api
    }

    pub fn eth_client(&self) -> Arc<M> {
        self.eth_client.clone()
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn deserialize_error_msg(
        err: ContractError<M>,
    ) -> Result<EntryPointAPIErrors, EntryPointError> {
        match err {
            ContractError::DecodingError(e) => {
                Err(EntryPointError::Decode { inner: e.to_string() })
            }
            ContractError::AbiError(e) => Err(EntryPointError::ABI { inner: e.to_string() }),
            ContractError::MiddlewareError { e } => EntryPointError::from_middleware_error::<M>(e),
            ContractError::ProviderError { e } => EntryPointError::from_provider_error(&e),
            ContractError::Revert(data) => decode_revert_error(data),
            _ => Err(EntryPointError::Other { inner: err.to_string() }),
        }
    }

    /// Runs simulateValidation and decodes the expected revert into the
    /// validation result, with or without aggregation info
    pub async fn simulate_validation<U: Into<UserOperation>>(
        &self,
        uo: U,
    ) -> Result<SimulateValidationResult, EntryPointError> {
        let res = self.entry_point_api.simulate_validation(uo.into()).await;

        match res {
            Ok(_) => Err(EntryPointError::NoRevert { function: "simulate_validation".into() }),
            Err(e) => Self::deserialize_error_msg(e).and_then(|op| match op {
                EntryPointAPIErrors::FailedOp(err) => Err(EntryPointError::FailedOp(err)),
                EntryPointAPIErrors::SignatureValidationFailed(err) => {
                    Err(EntryPointError::SignatureValidationFailed { aggregator: err.aggregator })
                }
                EntryPointAPIErrors::ValidationResult(res) => {
                    Ok(SimulateValidationResult::ValidationResult(res))
                }
                EntryPointAPIErrors::ValidationResultWithAggregation(res) => {
                    Ok(SimulateValidationResult::ValidationResultWithAggregation(res))
                }
                _ => Err(EntryPointError::Other {
                    inner: format!("simulate validation error: {op:?}"),
                }),
            }),
        }
    }

    /// Runs simulateHandleOp as a spoofed read-only call and decodes the
    /// expected revert into the execution result
    ///
    /// `target`/`target_call_data` select the optional post-simulation call
    /// whose success flag and return data the entry point records in the
    /// result; pass the zero address to skip it.
    pub async fn simulate_handle_op<U: Into<UserOperation>>(
        &self,
        uo: U,
        target: Address,
        target_call_data: Bytes,
        state: &spoof::State,
    ) -> Result<ExecutionResult, EntryPointError> {
        let call = self.entry_point_api.simulate_handle_op(uo.into(), target, target_call_data);
        let res = call.call_raw().state(state).await;

        match res {
            Ok(_) => Err(EntryPointError::NoRevert { function: "simulate_handle_op".into() }),
            Err(e) => Self::deserialize_error_msg(e).and_then(|op| match op {
                EntryPointAPIErrors::FailedOp(err) => Err(EntryPointError::FailedOp(err)),
                EntryPointAPIErrors::SignatureValidationFailed(err) => {
                    Err(EntryPointError::SignatureValidationFailed { aggregator: err.aggregator })
                }
                EntryPointAPIErrors::ExecutionResult(res) => Ok(res),
                EntryPointAPIErrors::RevertString(reason) => {
                    Err(EntryPointError::ExecutionReverted(reason))
                }
                _ => Err(EntryPointError::Other {
                    inner: format!("simulate handle op error: {op:?}"),
                }),
            }),
        }
    }

    /// Computes the counterfactual sender address for the given init code
    pub async fn get_sender_address(
        &self,
        init_code: Bytes,
    ) -> Result<SenderAddressResult, EntryPointError> {
        let res = self.entry_point_api.get_sender_address(init_code).call().await;

        match res {
            Ok(_) => Err(EntryPointError::NoRevert { function: "get_sender_address".into() }),
            Err(e) => Self::deserialize_error_msg(e).and_then(|op| match op {
                EntryPointAPIErrors::SenderAddressResult(res) => Ok(res),
                EntryPointAPIErrors::FailedOp(err) => Err(EntryPointError::FailedOp(err)),
                _ => Err(EntryPointError::Other {
                    inner: format!("get sender address error: {op:?}"),
                }),
            }),
        }
    }

    pub async fn get_deposit_info(&self, addr: &Address) -> Result<DepositInfo, EntryPointError> {
        let res = self.entry_point_api.get_deposit_info(*addr).call().await;

        match res {
            Ok((deposit, staked, stake, unstake_delay_sec, withdraw_time)) => Ok(DepositInfo {
                deposit,
                staked,
                stake,
                unstake_delay_sec,
                withdraw_time,
            }),
            Err(err) => {
                Err(EntryPointError::Other { inner: format!("get deposit info error: {err:?}") })
            }
        }
    }

    pub async fn balance_of(&self, addr: &Address) -> Result<U256, EntryPointError> {
        let res = self.entry_point_api.balance_of(*addr).call().await;

        match res {
            Ok(balance) => Ok(balance),
            Err(err) => Err(EntryPointError::Other { inner: format!("balance of error: {err:?}") }),
        }
    }

    pub async fn get_nonce(&self, address: &Address, key: U256) -> Result<U256, EntryPointError> {
        let res = self.entry_point_api.get_nonce(*address, key).call().await;

        match res {
            Ok(nonce) => Ok(nonce),
            Err(err) => Err(EntryPointError::Other { inner: format!("get nonce error: {err:?}") }),
        }
    }

    /// Fetches the bytecode deployed at the entry point address
    pub async fn get_code(&self) -> Result<Bytes, EntryPointError> {
        self.eth_client
            .get_code(self.address, None)
            .await
            .map_err(|err| EntryPointError::Provider { inner: format!("get code error: {err:?}") })
    }
}
