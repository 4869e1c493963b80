mod config;

pub mod error;

pub use config::*;

use error::AllocationError;

use crate::primitives::Satoshis;

/// Fee/change split for a single-input self-send. Invariant:
/// `recipient + change + miner_fee == input_value`, exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleAllocation {
    pub recipient: Satoshis,
    pub change: Satoshis,
    pub miner_fee: Satoshis,
}

/// Split for the dual-input (payment + ordinals) build. Invariant:
/// `primary_recipient + secondary_recipient + change + miner_fee ==
/// primary_value + secondary_value`, exactly. Change goes back to the
/// secondary (ordinals) recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualAllocation {
    pub primary_recipient: Satoshis,
    pub secondary_recipient: Satoshis,
    pub change: Satoshis,
    pub miner_fee: Satoshis,
}

/// The recipient gets the capped portion of the input less the fee; the
/// rest is change. Inputs worth no more than the fee are rejected rather
/// than letting a negative amount reach the encoder.
pub fn allocate_single(
    input_value: Satoshis,
    config: &AllocationConfig,
) -> Result<SingleAllocation, AllocationError> {
    let miner_fee = config.miner_fee;
    let recipient = input_value
        .min(config.send_cap)
        .checked_sub(miner_fee)
        .filter(|amount| !amount.is_zero())
        .ok_or(AllocationError::InsufficientFunds {
            input_value,
            miner_fee,
        })?;
    let change = input_value - recipient - miner_fee;
    Ok(SingleAllocation {
        recipient,
        change,
        miner_fee,
    })
}

/// The fee is borne entirely by the primary (payment) input; the secondary
/// recipient gets its capped value undiminished and also receives the
/// change.
pub fn allocate_dual(
    primary_value: Satoshis,
    secondary_value: Satoshis,
    config: &AllocationConfig,
) -> Result<DualAllocation, AllocationError> {
    let miner_fee = config.miner_fee;
    let primary_recipient = primary_value
        .min(config.send_cap)
        .checked_sub(miner_fee)
        .filter(|amount| !amount.is_zero())
        .ok_or(AllocationError::InsufficientFunds {
            input_value: primary_value,
            miner_fee,
        })?;
    let secondary_recipient = secondary_value.min(config.send_cap);
    let change =
        primary_value + secondary_value - primary_recipient - secondary_recipient - miner_fee;
    Ok(DualAllocation {
        primary_recipient,
        secondary_recipient,
        change,
        miner_fee,
    })
}
