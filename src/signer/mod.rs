pub mod error;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use error::SigningClientError;

use crate::primitives::BitcoinNetwork;

/// Payload handed to the external wallet signer. Field names follow the
/// connector wire format, which is camelCase JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignPsbtRequest {
    pub network: BitcoinNetwork,
    pub message: String,
    pub psbt_base64: String,
    pub broadcast: bool,
    pub inputs_to_sign: Vec<InputToSign>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputToSign {
    pub address: String,
    pub signing_indexes: Vec<u32>,
    pub sig_hash: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignPsbtResponse {
    pub psbt_base64: String,
}

/// Seam for the external signer. Signing happens entirely outside this
/// crate; a cancelled prompt surfaces as `UserCancelled`.
#[async_trait]
pub trait RemoteSigningClient {
    async fn sign_psbt(
        &mut self,
        request: SignPsbtRequest,
    ) -> Result<SignPsbtResponse, SigningClientError>;
}
