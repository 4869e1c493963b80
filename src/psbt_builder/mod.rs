mod config;
mod script_source;

pub mod error;

pub use config::*;
pub use script_source::*;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bitcoin::{
    absolute::LockTime,
    psbt::PartiallySignedTransaction,
    secp256k1::{Secp256k1, VerifyOnly},
    Address, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness,
};

use error::PsbtBuildError;

use crate::{
    allocation::{self, AllocationConfig},
    primitives::{BitcoinNetwork, Satoshis, SighashFlag},
    utxo::{self, UnspentOutput},
};

/// Assembles unsigned self-send transactions and serializes them to
/// creator-stage (version 0, unsigned) PSBTs. Each build is an independent
/// synchronous computation over already-fetched UTXO data; the draft is
/// serialized once and never mutated afterwards.
///
/// The secp verification context taproot output derivation needs is owned
/// here explicitly instead of living in process-global state.
pub struct PsbtBuilder {
    secp: Secp256k1<VerifyOnly>,
    network: BitcoinNetwork,
    config: PsbtBuilderConfig,
}

impl PsbtBuilder {
    pub fn new(network: BitcoinNetwork, config: PsbtBuilderConfig) -> Self {
        Self {
            secp: Secp256k1::verification_only(),
            network,
            config,
        }
    }

    pub fn network(&self) -> BitcoinNetwork {
        self.network
    }

    pub fn sighash_flag(&self) -> SighashFlag {
        self.config.sighash_flag
    }

    pub fn allocation_config(&self) -> &AllocationConfig {
        &self.config.allocation
    }

    /// Self-send spending one nested-segwit UTXO: recipient amount and
    /// change are both paid to `recipient`.
    pub fn segwit_self_send(
        &self,
        public_key: &str,
        utxos: &[UnspentOutput],
        recipient: &str,
    ) -> Result<String, PsbtBuildError> {
        let utxo = utxo::select_spendable(utxos)?;
        let source = ScriptSource::segwit_from_hex(public_key)?;
        self.self_send(source, utxo, recipient)
    }

    /// Self-send spending one key-path taproot UTXO.
    pub fn taproot_self_send(
        &self,
        public_key: &str,
        utxos: &[UnspentOutput],
        recipient: &str,
    ) -> Result<String, PsbtBuildError> {
        let utxo = utxo::select_spendable(utxos)?;
        let source = ScriptSource::taproot_from_hex(public_key)?;
        self.self_send(source, utxo, recipient)
    }

    fn self_send(
        &self,
        source: ScriptSource,
        utxo: &UnspentOutput,
        recipient: &str,
    ) -> Result<String, PsbtBuildError> {
        let recipient = self.recipient_address(recipient)?;
        let allocation = allocation::allocate_single(utxo.value, &self.config.allocation)?;
        let psbt = self.assemble(
            vec![(source, utxo)],
            vec![
                (recipient.clone(), allocation.recipient),
                (recipient, allocation.change),
            ],
        )?;
        Ok(BASE64.encode(psbt.serialize()))
    }

    /// Spends one segwit UTXO (input 0) and one taproot UTXO (input 1)
    /// together, paying the payment recipient, the ordinals recipient, and
    /// change back to the ordinals recipient, in that output order.
    #[allow(clippy::too_many_arguments)]
    pub fn combined_send(
        &self,
        payment_public_key: &str,
        ordinals_public_key: &str,
        payment_utxos: &[UnspentOutput],
        ordinals_utxos: &[UnspentOutput],
        payment_recipient: &str,
        ordinals_recipient: &str,
    ) -> Result<String, PsbtBuildError> {
        let payment_utxo = utxo::select_spendable(payment_utxos)?;
        let ordinals_utxo = utxo::select_spendable(ordinals_utxos)?;
        let payment_source = ScriptSource::segwit_from_hex(payment_public_key)?;
        let ordinals_source = ScriptSource::taproot_from_hex(ordinals_public_key)?;
        let payment_recipient = self.recipient_address(payment_recipient)?;
        let ordinals_recipient = self.recipient_address(ordinals_recipient)?;

        let allocation = allocation::allocate_dual(
            payment_utxo.value,
            ordinals_utxo.value,
            &self.config.allocation,
        )?;
        let psbt = self.assemble(
            vec![
                (payment_source, payment_utxo),
                (ordinals_source, ordinals_utxo),
            ],
            vec![
                (payment_recipient, allocation.primary_recipient),
                (ordinals_recipient.clone(), allocation.secondary_recipient),
                (ordinals_recipient, allocation.change),
            ],
        )?;
        Ok(BASE64.encode(psbt.serialize()))
    }

    fn recipient_address(&self, address: &str) -> Result<Address, PsbtBuildError> {
        let parsed = address
            .parse::<Address<bitcoin::address::NetworkUnchecked>>()
            .map_err(PsbtBuildError::InvalidRecipient)?;
        parsed
            .require_network(self.network.into())
            .map_err(|_| PsbtBuildError::NetworkMismatch {
                address: address.to_string(),
                network: self.network,
            })
    }

    fn assemble(
        &self,
        inputs: Vec<(ScriptSource, &UnspentOutput)>,
        outputs: Vec<(Address, Satoshis)>,
    ) -> Result<PartiallySignedTransaction, PsbtBuildError> {
        let unsigned_tx = Transaction {
            version: 2,
            lock_time: LockTime::ZERO,
            input: inputs
                .iter()
                .map(|(_, utxo)| TxIn {
                    previous_output: utxo.outpoint(),
                    script_sig: ScriptBuf::new(),
                    sequence: Sequence::MAX,
                    witness: Witness::new(),
                })
                .collect(),
            output: outputs
                .into_iter()
                .map(|(address, value)| TxOut {
                    value: u64::from(value),
                    script_pubkey: address.script_pubkey(),
                })
                .collect(),
        };
        let mut psbt = PartiallySignedTransaction::from_unsigned_tx(unsigned_tx)?;
        for (psbt_input, (source, utxo)) in psbt.inputs.iter_mut().zip(inputs) {
            source.populate_input(
                &self.secp,
                psbt_input,
                utxo.value,
                self.config.sighash_flag,
            )?;
        }
        Ok(psbt)
    }
}
