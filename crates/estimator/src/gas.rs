//! Gas accounting formulas for user operations

use ethers::types::U256;
use std::ops::Deref;
use uopgas_primitives::UserOperation;

/// Struct to calculate the pre-verification gas of a user operation
// https://github.com/eth-infinitism/bundler/blob/main/packages/sdk/src/calcPreVerificationGas.ts#L44-L51
pub struct Overhead {
    pub fixed: U256,
    pub per_user_op: U256,
    pub per_user_op_word: U256,
    pub zero_byte: U256,
    pub non_zero_byte: U256,
    pub bundle_size: U256,
    pub sig_size: U256,
}

impl Default for Overhead {
    fn default() -> Self {
        Self {
            fixed: U256::from(21000),
            per_user_op: U256::from(18300),
            per_user_op_word: U256::from(4),
            zero_byte: U256::from(4),
            non_zero_byte: U256::from(16),
            bundle_size: U256::from(1),
            sig_size: U256::from(65),
        }
    }
}

impl Overhead {
    /// Calculates the pre-verification gas of a [UserOperation](UserOperation)
    /// The function first packs the [UserOperation](UserOperation), then weighs the packed
    /// bytes for the calldata cost.
    pub fn calculate_pre_verification_gas(&self, uo: &UserOperation) -> U256 {
        let uo_pack = uo.pack();

        let call_data = uo_pack.deref().iter().fold(U256::zero(), |acc, &x| {
            let byte_cost = if x == 0 { &self.zero_byte } else { &self.non_zero_byte };
            acc.saturating_add(*byte_cost)
        });

        let word_cost = div_ceil(
            self.per_user_op_word.saturating_mul(U256::from(uo_pack.len() + 31)),
            U256::from(32),
        );

        let fixed_divided_by_bundle_size = div_ceil(self.fixed, self.bundle_size);

        fixed_divided_by_bundle_size
            .saturating_add(call_data)
            .saturating_add(self.per_user_op)
            .saturating_add(word_cost)
    }
}

/// Transaction intrinsic gas of a user operation: the fixed base cost plus the
/// calldata cost of the main execution call data (zero and non-zero bytes
/// weighed separately)
pub fn intrinsic_gas(uo: &UserOperation) -> U256 {
    let ov = Overhead::default();
    let call_data_cost = uo.call_data.deref().iter().fold(U256::zero(), |acc, &x| {
        acc.saturating_add(if x == 0 { ov.zero_byte } else { ov.non_zero_byte })
    });
    ov.fixed.saturating_add(call_data_cost)
}

/// Helper function to calculate the call gas limit of a user operation from
/// the amount paid during a simulated execution
///
/// # Arguments
/// `paid` - The paid gas
/// `pre_op_gas` - The pre-operation gas
/// `fee_per_gas` - The fee per gas
///
/// # Returns
/// The call gas limit of the user operation
pub fn calculate_call_gas_limit(paid: U256, pre_op_gas: U256, fee_per_gas: U256) -> U256 {
    // paid / fee_per_gas - pre_op_gas + Overhead::default().fixed
    div_ceil(paid, fee_per_gas).saturating_sub(pre_op_gas).saturating_add(Overhead::default().fixed)
}

/// Increases a value by the given percentage
pub fn increase_by_percent(n: U256, percent: u64) -> U256 {
    n.saturating_mul(U256::from(100 + percent)) / U256::from(100)
}

/// Performs division and rounds up to the nearest integer.
///
/// This function takes a numerator and a denominator of type `U256`,
/// performs the division, and rounds up if there is a remainder.
pub fn div_ceil(numerator: U256, denominator: U256) -> U256 {
    let rounding_const =
        U256::from(if numerator.checked_rem(denominator).unwrap_or_default() > U256::zero() {
            1
        } else {
            0
        });
    numerator.checked_div(denominator).unwrap_or_default().saturating_add(rounding_const)
}
