use serde::{Deserialize, Serialize};

use nfp_rs::io::ext_repr::{ExtInstance, ExtSolution};

use crate::config::BLFConfig;

#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct BLFOutput {
    #[serde(flatten)]
    pub instance: ExtInstance,
    pub solution: ExtSolution,
    pub config: BLFConfig,
}
