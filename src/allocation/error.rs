use thiserror::Error;

use crate::primitives::Satoshis;

#[derive(Debug, Error)]
pub enum AllocationError {
    #[error(
        "AllocationError - InsufficientFunds: input of {input_value} sats cannot cover the {miner_fee} sats miner fee"
    )]
    InsufficientFunds {
        input_value: Satoshis,
        miner_fee: Satoshis,
    },
}
