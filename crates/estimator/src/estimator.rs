//! User operation gas estimation orchestration

use crate::{
    error::EstimationError,
    gas::{calculate_call_gas_limit, increase_by_percent, intrinsic_gas, Overhead},
    overrides::{build_state_override, SimulationFlags},
    sanity::validate_user_operation,
    simulate::{self, SimulationResult},
};
use ethers::{
    providers::{Http, Middleware, Provider},
    types::{Address, Bytes, U256},
};
use std::sync::Arc;
use tracing::debug;
use uopgas_contracts::{EntryPoint, SimulateValidationResult};
use uopgas_primitives::{
    chain::rollup_calldata_markup_percent,
    constants::{entry_point::ADDRESS, estimation::VERIFICATION_GAS_MARGIN},
    provider::create_http_provider,
    UserOperation, UserOperationGasEstimation, UserOperationRequest,
};

/// Verification gas estimate together with the operation's validity window
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationGasEstimate {
    pub verification_gas_limit: U256,
    pub valid_after: u64,
    pub valid_until: u64,
}

/// Gas estimator for user operations against a single entry point
///
/// All estimations are read-only: the operation is simulated through
/// `eth_call` with state overrides, never submitted. The estimator holds no
/// mutable state and may be shared across concurrent estimations.
pub struct GasEstimator<M: Middleware + 'static> {
    entry_point: EntryPoint<M>,
    chain_id: u64,
}

/// Creates a gas estimator over an HTTP provider
///
/// Uses the canonical entry point address unless one is given.
pub async fn create_gas_estimator(
    rpc_url: &str,
    entry_point_address: Option<Address>,
) -> eyre::Result<GasEstimator<Provider<Http>>> {
    let eth_client = Arc::new(create_http_provider(rpc_url).await?);
    let chain_id = eth_client.get_chainid().await?.as_u64();
    let entry_point_address = entry_point_address
        .unwrap_or_else(|| ADDRESS.parse().expect("entry point address is valid"));
    Ok(GasEstimator::new(eth_client, entry_point_address, chain_id))
}

impl<M: Middleware + 'static> GasEstimator<M> {
    pub fn new(eth_client: Arc<M>, entry_point_address: Address, chain_id: u64) -> Self {
        Self { entry_point: EntryPoint::new(eth_client, entry_point_address), chain_id }
    }

    pub fn entry_point(&self) -> &EntryPoint<M> {
        &self.entry_point
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Estimates the verification gas limit by simulating the operation
    /// against the deployed entry point and reading the gas consumed before
    /// the execution phase
    pub async fn estimate_verification_gas_limit(
        &self,
        uo: &UserOperation,
        flags: &SimulationFlags,
    ) -> Result<VerificationGasEstimate, EstimationError> {
        validate_user_operation(uo)?;

        let state = build_state_override(uo.sender, self.entry_point.address(), None, flags);
        let res = simulate::simulate_handle_op(
            &self.entry_point,
            uo,
            Address::zero(),
            Bytes::default(),
            &state,
        )
        .await?;

        match res {
            SimulationResult::Execution(execution) => {
                let verification_gas_limit = execution
                    .pre_op_gas
                    .saturating_sub(intrinsic_gas(uo))
                    .saturating_add(VERIFICATION_GAS_MARGIN.into());
                Ok(VerificationGasEstimate {
                    verification_gas_limit,
                    valid_after: execution.valid_after,
                    valid_until: execution.valid_until,
                })
            }
            SimulationResult::Failed(reason) => Err(EstimationError::Simulation { inner: reason }),
        }
    }

    /// Estimates the call gas limit from a targeted simulation replaying the
    /// operation's call data and measuring the gas paid beyond verification
    pub async fn estimate_call_gas_limit(
        &self,
        uo: &UserOperation,
        flags: &SimulationFlags,
    ) -> Result<U256, EstimationError> {
        validate_user_operation(uo)?;

        let replacement_code = if flags.supports_eth_call_byte_code_override {
            match flags.replacement_code.clone() {
                Some(code) => Some(code),
                None => Some(self.entry_point.get_code().await?),
            }
        } else {
            None
        };
        let state = build_state_override(
            uo.sender,
            self.entry_point.address(),
            replacement_code,
            flags,
        );
        let res = simulate::simulate_handle_op(
            &self.entry_point,
            uo,
            uo.sender,
            uo.call_data.clone(),
            &state,
        )
        .await?;

        match res {
            SimulationResult::Execution(execution) => {
                if !execution.target_success {
                    return Err(EstimationError::CallExecutionFailed {
                        target_result: execution.target_result,
                    });
                }
                Ok(calculate_call_gas_limit(
                    execution.paid,
                    execution.pre_op_gas,
                    uo.max_fee_per_gas,
                ))
            }
            SimulationResult::Failed(reason) => Err(EstimationError::Simulation { inner: reason }),
        }
    }

    /// Calculates the pre-verification gas of the operation
    ///
    /// Pure formula over the packed operation; no RPC call is made. On
    /// rollup chains a calldata markup is applied when `base_fee_per_gas`
    /// signals that the caller prices calldata in an L2 context.
    pub fn calculate_pre_verification_gas(
        &self,
        uo: &UserOperation,
        base_fee_per_gas: Option<U256>,
    ) -> U256 {
        let static_gas = Overhead::default().calculate_pre_verification_gas(uo);
        match (rollup_calldata_markup_percent(self.chain_id), base_fee_per_gas) {
            (Some(percent), Some(_)) => increase_by_percent(static_gas, percent),
            _ => static_gas,
        }
    }

    /// Estimates all gas fields of the operation in one consistent snapshot
    ///
    /// The verification and call sub-estimations have no data dependency on
    /// each other and run concurrently, each with its own override set.
    pub async fn estimate_user_operation_gas(
        &self,
        request: UserOperationRequest,
        base_fee_per_gas: Option<U256>,
        flags: &SimulationFlags,
    ) -> Result<UserOperationGasEstimation, EstimationError> {
        let uo = request.fill();
        validate_user_operation(&uo)?;
        debug!(
            "estimating gas for user operation {:?}",
            uo.hash(&self.entry_point.address(), self.chain_id)
        );

        let (verification, call_gas_limit) = tokio::join!(
            self.estimate_verification_gas_limit(&uo, flags),
            self.estimate_call_gas_limit(&uo, flags),
        );
        let verification = verification?;
        let call_gas_limit = call_gas_limit?;
        let pre_verification_gas = self.calculate_pre_verification_gas(&uo, base_fee_per_gas);

        Ok(UserOperationGasEstimation {
            pre_verification_gas,
            verification_gas_limit: verification.verification_gas_limit,
            call_gas_limit,
            valid_after: verification.valid_after,
            valid_until: verification.valid_until,
        })
    }

    /// Runs simulateValidation and returns the decoded validation result
    /// (stake and return info, with aggregation info when an aggregator is
    /// involved)
    pub async fn estimate_verification_gas(
        &self,
        uo: &UserOperation,
    ) -> Result<SimulateValidationResult, EstimationError> {
        validate_user_operation(uo)?;
        self.entry_point.simulate_validation(uo.clone()).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{
        abi::AbiEncode,
        providers::{JsonRpcError, MockProvider, MockResponse, Provider},
        utils::hex,
    };
    use serde_json::json;
    use uopgas_contracts::{
        entry_point_api::ValidationResult,
        ExecutionResult, FailedOp,
    };

    fn mocked_estimator() -> (GasEstimator<Provider<MockProvider>>, MockProvider) {
        let (provider, mock) = Provider::mocked();
        let estimator = GasEstimator::new(
            Arc::new(provider),
            ADDRESS.parse().unwrap(),
            1,
        );
        (estimator, mock)
    }

    fn revert_with(data: Vec<u8>) -> MockResponse {
        MockResponse::Error(JsonRpcError {
            code: 3,
            message: "execution reverted".to_string(),
            data: Some(json!(format!("0x{}", hex::encode(data)))),
        })
    }

    fn execution_result(pre_op_gas: u64, paid: u64, target_success: bool) -> ExecutionResult {
        ExecutionResult {
            pre_op_gas: pre_op_gas.into(),
            paid: paid.into(),
            valid_after: 10,
            valid_until: 20,
            target_success,
            target_result: Bytes::default(),
        }
    }

    fn demo_user_operation() -> UserOperation {
        UserOperation::default()
            .sender(Address::random())
            .verification_gas_limit(10_000_000.into())
            .call_gas_limit(30_000_000.into())
            .max_fee_per_gas(2.into())
    }

    #[tokio::test]
    async fn verification_gas_limit_formula() {
        let (estimator, mock) = mocked_estimator();
        mock.push_response(revert_with(execution_result(50_000, 60_000, true).encode()));

        let uo = demo_user_operation();
        let estimate = estimator
            .estimate_verification_gas_limit(&uo, &SimulationFlags::default())
            .await
            .unwrap();

        // pre_op_gas - intrinsic gas (empty call data) + margin
        assert_eq!(
            estimate.verification_gas_limit,
            (50_000 - 21_000 + VERIFICATION_GAS_MARGIN).into()
        );
        assert_eq!(estimate.valid_after, 10);
        assert_eq!(estimate.valid_until, 20);
    }

    #[tokio::test]
    async fn call_gas_limit_from_paid_gas() {
        let (estimator, mock) = mocked_estimator();
        mock.push_response(revert_with(execution_result(60_000, 210_000, true).encode()));

        let uo = demo_user_operation();
        let flags = SimulationFlags {
            replacement_code: Some("0x60806040".parse().unwrap()),
            ..Default::default()
        };
        let call_gas_limit = estimator.estimate_call_gas_limit(&uo, &flags).await.unwrap();

        // ceil(paid / max_fee_per_gas) - pre_op_gas + fixed overhead
        assert_eq!(call_gas_limit, (210_000 / 2 - 60_000 + 21_000).into());
    }

    #[tokio::test]
    async fn call_gas_limit_fails_when_target_reverts() {
        let (estimator, mock) = mocked_estimator();
        let mut result = execution_result(60_000, 210_000, false);
        result.target_result = "0xdeadbeef".parse().unwrap();
        mock.push_response(revert_with(result.encode()));

        let uo = demo_user_operation();
        let flags = SimulationFlags {
            replacement_code: Some("0x60806040".parse().unwrap()),
            ..Default::default()
        };
        match estimator.estimate_call_gas_limit(&uo, &flags).await {
            Err(EstimationError::CallExecutionFailed { target_result }) => {
                assert_eq!(target_result, "0xdeadbeef".parse::<Bytes>().unwrap());
            }
            other => panic!("expected call execution failure, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn full_estimation_composes_all_fields() {
        let (estimator, mock) = mocked_estimator();
        // verification and call estimation run concurrently and consume one
        // response each
        mock.push_response(revert_with(execution_result(60_000, 210_000, true).encode()));
        mock.push_response(revert_with(execution_result(60_000, 210_000, true).encode()));

        let request: UserOperationRequest = demo_user_operation().into();
        let flags = SimulationFlags {
            replacement_code: Some("0x60806040".parse().unwrap()),
            ..Default::default()
        };
        let estimation = estimator
            .estimate_user_operation_gas(request.clone(), None, &flags)
            .await
            .unwrap();

        assert_eq!(
            estimation.verification_gas_limit,
            (60_000 - 21_000 + VERIFICATION_GAS_MARGIN).into()
        );
        assert_eq!(estimation.call_gas_limit, (210_000 / 2 - 60_000 + 21_000).into());
        assert_eq!(
            estimation.pre_verification_gas,
            Overhead::default().calculate_pre_verification_gas(&request.fill())
        );
        assert_eq!(estimation.valid_after, 10);
        assert_eq!(estimation.valid_until, 20);
    }

    #[tokio::test]
    async fn failed_op_surfaces_as_validation_failure() {
        let (estimator, mock) = mocked_estimator();
        let failed_op =
            FailedOp { op_index: 2.into(), reason: "AA21 didn't pay prefund".into() };
        mock.push_response(revert_with(failed_op.clone().encode()));
        mock.push_response(revert_with(failed_op.encode()));

        let request: UserOperationRequest = demo_user_operation().into();
        let flags = SimulationFlags {
            replacement_code: Some("0x60806040".parse().unwrap()),
            ..Default::default()
        };
        match estimator.estimate_user_operation_gas(request, None, &flags).await {
            Err(EstimationError::ValidationFailure { op_index, reason, .. }) => {
                assert_eq!(op_index, 2.into());
                assert_eq!(reason, "AA21 didn't pay prefund");
            }
            other => panic!("expected validation failure, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_revert_is_a_simulation_error() {
        let (estimator, mock) = mocked_estimator();
        // a simulation call that returns instead of reverting carries no
        // diagnostic data
        mock.push_response(MockResponse::Value(json!("0x")));

        let uo = demo_user_operation();
        let res = estimator
            .estimate_verification_gas_limit(&uo, &SimulationFlags::default())
            .await;
        assert!(matches!(res, Err(EstimationError::Simulation { .. })), "got: {res:?}");
    }

    #[tokio::test]
    async fn validation_result_decodes_from_simulate_validation() {
        let (estimator, mock) = mocked_estimator();
        let validation = ValidationResult {
            return_info: (50_000.into(), 0.into(), false, 0, 0, Bytes::default()),
            sender_info: (0.into(), 0.into()),
            factory_info: (0.into(), 0.into()),
            paymaster_info: (0.into(), 0.into()),
        };
        mock.push_response(revert_with(validation.clone().encode()));

        let uo = demo_user_operation();
        match estimator.estimate_verification_gas(&uo).await.unwrap() {
            SimulateValidationResult::ValidationResult(decoded) => {
                assert_eq!(decoded, validation)
            }
            other => panic!("expected validation result, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_operation_never_reaches_the_provider() {
        let (estimator, _mock) = mocked_estimator();
        // zero sender and no init code; no response is queued, so reaching
        // the provider would fail the test with a transport error instead
        let uo = UserOperation::default();
        let res = estimator
            .estimate_verification_gas_limit(&uo, &SimulationFlags::default())
            .await;
        assert!(matches!(res, Err(EstimationError::Validation { .. })), "got: {res:?}");
    }
}
