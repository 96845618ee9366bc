/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use serde::{Deserialize, Serialize};

/* Config */

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HostConfig {
    #[serde(default = "default_community")]
    pub community: String,
    pub port: Option<u16>,
    pub timing: Option<TimingConfig>,
}

fn default_community() -> String {
    String::from("public")
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            community: default_community(),
            port: None,
            timing: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TimingConfig {
    pub retries: u32,
    pub timeout: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            retries: 5,
            timeout: 1.0,
        }
    }
}
