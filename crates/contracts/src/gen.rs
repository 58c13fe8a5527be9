use ethers::contract::abigen;

abigen!(
    EntryPointAPI,
    r#"[
        struct UserOperation {address sender;uint256 nonce;bytes initCode;bytes callData;uint256 callGasLimit;uint256 verificationGasLimit;uint256 preVerificationGas;uint256 maxFeePerGas;uint256 maxPriorityFeePerGas;bytes paymasterAndData;bytes signature;}
        struct ReturnInfo {uint256 preOpGas;uint256 prefund;bool sigFailed;uint48 validAfter;uint48 validUntil;bytes paymasterContext;}
        struct StakeInfo {uint256 stake;uint256 unstakeDelaySec;}
        struct AggregatorStakeInfo {address aggregator;StakeInfo stakeInfo;}
        struct DepositInfo {uint112 deposit;bool staked;uint112 stake;uint32 unstakeDelaySec;uint48 withdrawTime;}
        function handleOps(UserOperation[] calldata ops,address payable beneficiary) external
        function simulateValidation(UserOperation calldata userOp) external
        function simulateHandleOp(UserOperation calldata op,address target,bytes calldata targetCallData) external
        function getSenderAddress(bytes memory initCode) external
        function getUserOpHash(UserOperation calldata userOp) external view returns (bytes32)
        function getNonce(address sender, uint192 key) external view returns (uint256 nonce)
        function balanceOf(address account) external view returns (uint256)
        function getDepositInfo(address account) external view returns (DepositInfo memory info)
        function depositTo(address account) external payable
        error FailedOp(uint256 opIndex, string reason)
        error SenderAddressResult(address sender)
        error SignatureValidationFailed(address aggregator)
        error ExecutionResult(uint256 preOpGas, uint256 paid, uint48 validAfter, uint48 validUntil, bool targetSuccess, bytes targetResult)
        error ValidationResult(ReturnInfo returnInfo, StakeInfo senderInfo, StakeInfo factoryInfo, StakeInfo paymasterInfo)
        error ValidationResultWithAggregation(ReturnInfo returnInfo, StakeInfo senderInfo, StakeInfo factoryInfo, StakeInfo paymasterInfo, AggregatorStakeInfo aggregatorInfo)
        event UserOperationEvent(bytes32 indexed userOpHash,address indexed sender,address indexed paymaster,uint256 nonce,bool success,uint256 actualGasCost,uint256 actualGasUsed)
        event UserOperationRevertReason(bytes32 indexed userOpHash,address indexed sender,uint256 nonce,bytes revertReason)
    ]"#
);
