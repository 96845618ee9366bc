/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

mod collector;
mod config;
mod counters;
mod error;
mod report;

pub use collector::{
    enabled_ports, enc_out_per_mframe, link_states, port_values, PortData,
    PortMap, WalkSource,
};
pub use config::{Mode, PluginConfig};
pub use counters::{Counter, GraphKind};
pub use error::{Error, Result};
pub use report::{write_config, write_fetch};
