//! User operation request (optional fields)

use super::UserOperation;
use crate::{
    constants::estimation::{
        DUMMY_SIGNATURE, SIMULATION_CALL_GAS_LIMIT, SIMULATION_VERIFICATION_GAS_LIMIT,
    },
    utils::as_checksum_addr,
};
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User operation with all gas fields and the signature being optional
///
/// This is the input shape of gas estimation requests; missing fields are
/// substituted with simulation defaults by [fill](UserOperationRequest::fill).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationRequest {
    #[serde(default = "Address::zero", serialize_with = "as_checksum_addr")]
    pub sender: Address,
    #[serde(default)]
    pub nonce: U256,
    #[serde(default)]
    pub init_code: Bytes,
    #[serde(default)]
    pub call_data: Bytes,
    #[serde(default)]
    pub call_gas_limit: Option<U256>,
    #[serde(default)]
    pub verification_gas_limit: Option<U256>,
    #[serde(default)]
    pub pre_verification_gas: Option<U256>,
    #[serde(default)]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub max_priority_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub paymaster_and_data: Bytes,
    #[serde(default)]
    pub signature: Option<Bytes>,
}

impl UserOperationRequest {
    /// Fills the missing gas fields and signature with simulation defaults
    ///
    /// Gas limits the caller did not provide are raised to values high enough
    /// for the simulated execution to complete; an absent signature becomes
    /// the placeholder signature (simulation does not check its validity,
    /// only its calldata footprint).
    pub fn fill(self) -> UserOperation {
        UserOperation {
            sender: self.sender,
            nonce: self.nonce,
            init_code: self.init_code,
            call_data: self.call_data,
            call_gas_limit: self
                .call_gas_limit
                .unwrap_or_else(|| SIMULATION_CALL_GAS_LIMIT.into()),
            verification_gas_limit: self
                .verification_gas_limit
                .unwrap_or_else(|| SIMULATION_VERIFICATION_GAS_LIMIT.into()),
            pre_verification_gas: self.pre_verification_gas.unwrap_or_default(),
            max_fee_per_gas: self.max_fee_per_gas.unwrap_or_default(),
            max_priority_fee_per_gas: self.max_priority_fee_per_gas.unwrap_or_default(),
            paymaster_and_data: self.paymaster_and_data,
            signature: self.signature.unwrap_or_else(|| {
                Bytes::from_str(DUMMY_SIGNATURE).expect("placeholder signature is valid hex")
            }),
        }
    }
}

impl From<UserOperation> for UserOperationRequest {
    fn from(user_operation: UserOperation) -> Self {
        Self {
            sender: user_operation.sender,
            nonce: user_operation.nonce,
            init_code: user_operation.init_code,
            call_data: user_operation.call_data,
            call_gas_limit: Some(user_operation.call_gas_limit),
            verification_gas_limit: Some(user_operation.verification_gas_limit),
            pre_verification_gas: Some(user_operation.pre_verification_gas),
            max_fee_per_gas: Some(user_operation.max_fee_per_gas),
            max_priority_fee_per_gas: Some(user_operation.max_priority_fee_per_gas),
            paymaster_and_data: user_operation.paymaster_and_data,
            signature: Some(user_operation.signature),
        }
    }
}
