//! Chain-family helpers for gas accounting

use crate::constants::estimation::{
    ARBITRUM_CALLDATA_MARKUP_PERCENT, OP_STACK_CALLDATA_MARKUP_PERCENT,
};
use alloy_chains::NamedChain;

/// Returns true for OP stack rollups, where the L1 data fee is charged
/// through the pre-verification gas
pub fn is_op_stack(chain_id: u64) -> bool {
    matches!(
        NamedChain::try_from(chain_id),
        Ok(NamedChain::Optimism |
            NamedChain::OptimismGoerli |
            NamedChain::OptimismSepolia |
            NamedChain::Base |
            NamedChain::BaseGoerli |
            NamedChain::BaseSepolia)
    )
}

/// Returns true for Arbitrum rollups
pub fn is_arbitrum(chain_id: u64) -> bool {
    matches!(
        NamedChain::try_from(chain_id),
        Ok(NamedChain::Arbitrum |
            NamedChain::ArbitrumNova |
            NamedChain::ArbitrumGoerli |
            NamedChain::ArbitrumSepolia)
    )
}

/// Calldata markup (percent) applied to the static pre-verification gas when
/// the chain charges an L1 data fee on top of the L2 execution fee
pub fn rollup_calldata_markup_percent(chain_id: u64) -> Option<u64> {
    if is_op_stack(chain_id) {
        Some(OP_STACK_CALLDATA_MARKUP_PERCENT)
    } else if is_arbitrum(chain_id) {
        Some(ARBITRUM_CALLDATA_MARKUP_PERCENT)
    } else {
        None
    }
}
