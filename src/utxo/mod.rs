mod entity;
mod mempool_space;

pub mod error;

pub use entity::*;
pub use mempool_space::*;

use error::UtxoSourceError;

/// Spend policy of the original demo: always the first output as returned
/// by the indexer, no confirmation or value filtering. A production coin
/// selector would replace this wholesale.
pub fn select_spendable(utxos: &[UnspentOutput]) -> Result<&UnspentOutput, UtxoSourceError> {
    utxos.first().ok_or(UtxoSourceError::NoSpendableOutput)
}
