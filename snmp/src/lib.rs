/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

mod client;
mod config;
mod error;
mod oid;

pub use client::{Session, VarBind};
pub use config::{HostConfig, TimingConfig};
pub use error::{Error, Result};
pub use oid::Oid;
