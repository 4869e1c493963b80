use serde::{Deserialize, Serialize};

use crate::primitives::Satoshis;

/// Split policy for a self-send: a fixed miner fee and a cap on the "send"
/// portion so most of the input value returns as change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConfig {
    #[serde(default = "default_miner_fee")]
    pub miner_fee: Satoshis,
    #[serde(default = "default_send_cap")]
    pub send_cap: Satoshis,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            miner_fee: default_miner_fee(),
            send_cap: default_send_cap(),
        }
    }
}

fn default_miner_fee() -> Satoshis {
    Satoshis::from(300)
}

fn default_send_cap() -> Satoshis {
    Satoshis::from(3000)
}
