//! Account abstraction (ERC-4337)-related constants

/// Entry point smart contract
pub mod entry_point {
    /// Address of the entry point smart contract
    pub const ADDRESS: &str = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789";
    /// Version of the entry point smart contract
    pub const VERSION: &str = "0.6.0";
}

/// Gas estimation
pub mod estimation {
    /// Verification gas limit substituted into a request that does not provide one
    pub const SIMULATION_VERIFICATION_GAS_LIMIT: u64 = 10_000_000;
    /// Call gas limit substituted into a request that does not provide one
    pub const SIMULATION_CALL_GAS_LIMIT: u64 = 30_000_000;
    /// 65-byte placeholder ECDSA signature substituted into an unsigned request
    pub const DUMMY_SIGNATURE: &str = "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff1c";
    /// Safety margin added on top of the simulated verification gas
    pub const VERIFICATION_GAS_MARGIN: u64 = 10_000;
    /// Markup (percent) on the static pre-verification gas for OP stack rollups
    pub const OP_STACK_CALLDATA_MARKUP_PERCENT: u64 = 100;
    /// Markup (percent) on the static pre-verification gas for Arbitrum rollups
    pub const ARBITRUM_CALLDATA_MARKUP_PERCENT: u64 = 400;
}

/// JSON-RPC error codes for user operation validation failures
///
/// Stable public contract surface; callers match on these codes to classify
/// estimation failures programmatically.
pub mod error_codes {
    /// Malformed user operation fields (rejected before any RPC call)
    pub const INVALID_USER_OP_FIELDS: i32 = -32602;
    /// On-chain validation of the operation reverted
    pub const SIMULATE_VALIDATION_FAILED: i32 = -32500;
    /// On-chain validation of the paymaster reverted
    pub const SIMULATE_PAYMASTER_VALIDATION_FAILED: i32 = -32501;
    /// Entity used a banned opcode during validation
    pub const OPCODE_VALIDATION_FAILED: i32 = -32502;
    /// Operation expires too soon to be included
    pub const USER_OP_EXPIRES_SHORTLY: i32 = -32503;
    /// Entity is throttled
    pub const ENTITY_IS_THROTTLED: i32 = -32504;
    /// Entity stake or unstake delay is too low
    pub const ENTITY_INSUFFICIENT_STAKE: i32 = -32505;
    /// Aggregator is not supported
    pub const UNSUPPORTED_AGGREGATOR: i32 = -32506;
    /// Wallet signature check failed during simulation
    pub const INVALID_WALLET_SIGNATURE: i32 = -32507;
    /// The operation's inner call reverted
    pub const WALLET_TRANSACTION_REVERTED: i32 = -32000;
    /// Request rejected by policy
    pub const UNAUTHORIZED_REQUEST: i32 = -32001;
    /// Unclassified internal failure
    pub const INTERNAL_WALLET_ERROR: i32 = -32002;
    /// Execution simulation failed
    pub const SIMULATE_EXECUTION_FAILED: i32 = -32521;
}
