use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    primitives::BitcoinNetwork, psbt_builder::PsbtBuilderConfig, utxo::MempoolSpaceConfig,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub network: BitcoinNetwork,
    #[serde(default)]
    pub mempool_space: MempoolSpaceConfig,
    #[serde(default)]
    pub psbt_builder: PsbtBuilderConfig,
}

impl AppConfig {
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_file = std::fs::read_to_string(path).context("Couldn't read config file")?;
        let config: AppConfig =
            serde_yaml::from_str(&config_file).context("Couldn't parse config file")?;
        Ok(config)
    }
}
