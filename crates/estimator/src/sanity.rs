//! Pre-flight checks on user operation fields
//!
//! Structural problems are rejected here, before any RPC call is made.

use crate::error::EstimationError;
use ethers::types::Address;
use uopgas_primitives::UserOperation;

fn invalid(message: impl Into<String>) -> EstimationError {
    EstimationError::Validation { message: message.into() }
}

/// Validates the structure of a user operation
pub fn validate_user_operation(uo: &UserOperation) -> Result<(), EstimationError> {
    if uo.sender == Address::zero() && uo.init_code.is_empty() {
        return Err(invalid("sender is the zero address and no init code is given"));
    }

    if !uo.init_code.is_empty() && uo.init_code.len() < 20 {
        return Err(invalid(format!(
            "init code {} is shorter than a factory address",
            uo.init_code
        )));
    }

    if !uo.paymaster_and_data.is_empty() && uo.paymaster_and_data.len() < 20 {
        return Err(invalid(format!(
            "paymaster and data {} is shorter than a paymaster address",
            uo.paymaster_and_data
        )));
    }

    if uo.max_priority_fee_per_gas > uo.max_fee_per_gas {
        return Err(invalid(format!(
            "max priority fee per gas {} is higher than max fee per gas {}",
            uo.max_priority_fee_per_gas, uo.max_fee_per_gas
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::Bytes;

    #[test]
    fn accepts_well_formed_operation() {
        let uo = UserOperation::default().sender(Address::random());
        assert!(validate_user_operation(&uo).is_ok());
    }

    #[test]
    fn rejects_zero_sender_without_init_code() {
        let uo = UserOperation::default();
        assert!(matches!(
            validate_user_operation(&uo),
            Err(EstimationError::Validation { .. })
        ));
    }

    #[test]
    fn rejects_truncated_init_code_and_paymaster() {
        let uo = UserOperation::default()
            .sender(Address::random())
            .init_code(Bytes::from(vec![0xaa; 10]));
        assert!(validate_user_operation(&uo).is_err());

        let uo = UserOperation::default()
            .sender(Address::random())
            .paymaster_and_data(Bytes::from(vec![0xaa; 10]));
        assert!(validate_user_operation(&uo).is_err());
    }

    #[test]
    fn rejects_inverted_fees() {
        let uo = UserOperation::default()
            .sender(Address::random())
            .max_fee_per_gas(1.into())
            .max_priority_fee_per_gas(2.into());
        assert!(validate_user_operation(&uo).is_err());
    }
}
