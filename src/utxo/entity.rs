use serde::Deserialize;

use crate::primitives::Satoshis;

/// One unspent output as reported by the indexer for an address. The value
/// is the exact spendable amount; no further lookup is performed before it
/// is attached to a transaction input.
#[derive(Debug, Clone, Deserialize)]
pub struct UnspentOutput {
    pub txid: bitcoin::Txid,
    pub vout: u32,
    pub status: ConfirmationStatus,
    pub value: Satoshis,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmationStatus {
    pub confirmed: bool,
    pub block_height: Option<u32>,
    pub block_hash: Option<bitcoin::BlockHash>,
    pub block_time: Option<u64>,
}

impl UnspentOutput {
    pub fn outpoint(&self) -> bitcoin::OutPoint {
        bitcoin::OutPoint {
            txid: self.txid,
            vout: self.vout,
        }
    }
}
