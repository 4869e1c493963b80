use serde::{Deserialize, Serialize};

use crate::{allocation::AllocationConfig, primitives::SighashFlag};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PsbtBuilderConfig {
    #[serde(default)]
    pub allocation: AllocationConfig,
    /// Applied to every input of a build. The demo default leaves room for
    /// other parties to attach further inputs and outputs before signing.
    #[serde(default)]
    pub sighash_flag: SighashFlag,
}
