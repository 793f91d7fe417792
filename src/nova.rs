//! Nova feature activation gate

use crate::consensus_params::NOVA_MAINNET_ACTIVATION_HEIGHT;
use crate::store::ChainSettings;

/// True when nova-gated consensus rules are active: always on testnet,
/// active on mainnet once the confirmed chain height passes the activation
/// height.
pub fn is_nova_active(settings: ChainSettings, last_block_height: u64) -> bool {
    settings.use_testnet_rules || last_block_height > NOVA_MAINNET_ACTIVATION_HEIGHT
}
