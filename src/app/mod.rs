mod config;

pub mod error;

pub use config::*;

use tracing::instrument;

use error::ApplicationError;

use crate::{
    primitives::BitcoinNetwork,
    psbt_builder::PsbtBuilder,
    signer::{InputToSign, RemoteSigningClient, SignPsbtRequest},
    utxo::MempoolSpaceClient,
};

const SIGNING_MESSAGE: &str = "Sign Transaction";

/// Wires the UTXO source to the PSBT builder and produces the payloads the
/// external wallet signer consumes. Holds no mutable state; every
/// operation is an independent fetch-select-build pass.
pub struct App {
    utxo_source: MempoolSpaceClient,
    psbt_builder: PsbtBuilder,
    network: BitcoinNetwork,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            utxo_source: MempoolSpaceClient::new(config.mempool_space),
            psbt_builder: PsbtBuilder::new(config.network, config.psbt_builder),
            network: config.network,
        }
    }

    /// Self-send from a nested-segwit payment address back to itself.
    #[instrument(name = "app.create_self_send_psbt", skip(self, public_key), err)]
    pub async fn create_self_send_psbt(
        &self,
        address: &str,
        public_key: &str,
    ) -> Result<String, ApplicationError> {
        let utxos = self
            .utxo_source
            .fetch_unspent_outputs(self.network, address)
            .await?;
        Ok(self
            .psbt_builder
            .segwit_self_send(public_key, &utxos, address)?)
    }

    /// Self-send from a taproot ordinals address back to itself.
    #[instrument(
        name = "app.create_ordinals_self_send_psbt",
        skip(self, public_key),
        err
    )]
    pub async fn create_ordinals_self_send_psbt(
        &self,
        address: &str,
        public_key: &str,
    ) -> Result<String, ApplicationError> {
        let utxos = self
            .utxo_source
            .fetch_unspent_outputs(self.network, address)
            .await?;
        Ok(self
            .psbt_builder
            .taproot_self_send(public_key, &utxos, address)?)
    }

    /// One transaction spending a payment UTXO and an ordinals UTXO
    /// together, each fetched from its own address.
    #[instrument(
        name = "app.create_combined_psbt",
        skip(self, payment_public_key, ordinals_public_key),
        err
    )]
    pub async fn create_combined_psbt(
        &self,
        payment_address: &str,
        ordinals_address: &str,
        payment_public_key: &str,
        ordinals_public_key: &str,
    ) -> Result<String, ApplicationError> {
        let payment_utxos = self
            .utxo_source
            .fetch_unspent_outputs(self.network, payment_address)
            .await?;
        let ordinals_utxos = self
            .utxo_source
            .fetch_unspent_outputs(self.network, ordinals_address)
            .await?;
        Ok(self.psbt_builder.combined_send(
            payment_public_key,
            ordinals_public_key,
            &payment_utxos,
            &ordinals_utxos,
            payment_address,
            ordinals_address,
        )?)
    }

    /// Builds the signer payload for a produced PSBT. `broadcast` stays
    /// false; the signed result is returned to the caller, never relayed
    /// to the network by this crate.
    pub fn signing_request(
        &self,
        psbt_base64: String,
        inputs_to_sign: Vec<InputToSign>,
    ) -> SignPsbtRequest {
        SignPsbtRequest {
            network: self.network,
            message: SIGNING_MESSAGE.to_string(),
            psbt_base64,
            broadcast: false,
            inputs_to_sign,
        }
    }

    /// Signer directive for the input indexes controlled by one address,
    /// carrying the sighash value the builder encoded into those inputs.
    pub fn input_to_sign(&self, address: &str, signing_indexes: Vec<u32>) -> InputToSign {
        InputToSign {
            address: address.to_string(),
            signing_indexes,
            sig_hash: self.psbt_builder.sighash_flag().ecdsa().to_u32(),
        }
    }

    /// Drives an injected remote signer. Cancellation propagates as a
    /// typed failure; an already-produced PSBT is simply discarded.
    #[instrument(name = "app.sign_with", skip_all, err)]
    pub async fn sign_with(
        &self,
        signer: &mut impl RemoteSigningClient,
        request: SignPsbtRequest,
    ) -> Result<String, ApplicationError> {
        let response = signer.sign_psbt(request).await?;
        Ok(response.psbt_base64)
    }
}
