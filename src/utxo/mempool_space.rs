use serde::{Deserialize, Serialize};

use super::{entity::UnspentOutput, error::UtxoSourceError};
use crate::primitives::BitcoinNetwork;

#[derive(Clone, Debug)]
pub struct MempoolSpaceClient {
    config: MempoolSpaceConfig,
}

impl MempoolSpaceClient {
    pub fn new(config: MempoolSpaceConfig) -> Self {
        Self { config }
    }

    /// Returns the ordered UTXO list for an address. An address with no
    /// funds yields an empty list, not an error.
    pub async fn fetch_unspent_outputs(
        &self,
        network: BitcoinNetwork,
        address: &str,
    ) -> Result<Vec<UnspentOutput>, UtxoSourceError> {
        let client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .expect("Could not build reqwest client");

        let url = format!(
            "{}{}/api/address/{}/utxo",
            self.config.url,
            network_subpath(network),
            address
        );
        let resp = client
            .get(&url)
            .send()
            .await
            .map_err(UtxoSourceError::Transport)?;
        resp.json::<Vec<UnspentOutput>>()
            .await
            .map_err(UtxoSourceError::CouldNotDecodeResponseBody)
    }
}

fn network_subpath(network: BitcoinNetwork) -> &'static str {
    match network {
        BitcoinNetwork::Mainnet => "",
        BitcoinNetwork::Testnet => "/testnet",
    }
}

#[serde_with::serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MempoolSpaceConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_timeout")]
    pub timeout: std::time::Duration,
}

impl Default for MempoolSpaceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "https://mempool.space".to_string()
}

fn default_timeout() -> std::time::Duration {
    std::time::Duration::from_secs(10)
}
