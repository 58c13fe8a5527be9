//! State overrides for simulating unfunded and unsigned operations

use ethers::{
    providers::spoof,
    types::{Address, Bytes, U256},
};

const UINT96_MAX: u128 = 5192296858534827628530496329220095;

/// Capabilities of the underlying `eth_call` endpoint
///
/// Not every RPC endpoint accepts state overrides; callers declare what
/// theirs supports and the estimator degrades accordingly (simulation of
/// underfunded senders may then fail with a prefund error).
#[derive(Clone, Debug)]
pub struct SimulationFlags {
    /// The endpoint accepts a state override set on `eth_call`
    pub supports_eth_call_state_override: bool,
    /// The endpoint accepts `code` entries in the override set
    pub supports_eth_call_byte_code_override: bool,
    /// Bytecode to install at the entry point address for targeted
    /// simulations; when absent, the deployed entry point code is reused
    pub replacement_code: Option<Bytes>,
}

impl Default for SimulationFlags {
    fn default() -> Self {
        Self {
            supports_eth_call_state_override: true,
            supports_eth_call_byte_code_override: true,
            replacement_code: None,
        }
    }
}

/// Builds the per-call state override set for a simulation
///
/// The sender balance is raised to the maximum deposit the entry point can
/// account (max uint96) so that a missing prefund does not abort the
/// simulation; when byte code overrides are supported and a replacement is
/// given, it is installed at the entry point address. Without state override
/// support the set stays empty.
pub fn build_state_override(
    sender: Address,
    entry_point: Address,
    replacement_code: Option<Bytes>,
    flags: &SimulationFlags,
) -> spoof::State {
    let mut state = spoof::state();

    if !flags.supports_eth_call_state_override {
        return state;
    }

    state.account(sender).balance(U256::from(UINT96_MAX));

    if flags.supports_eth_call_byte_code_override {
        if let Some(code) = replacement_code {
            state.account(entry_point).code(code);
        }
    }

    state
}
