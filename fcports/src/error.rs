/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Usage error: {0}")]
    Usage(String),
    #[error(
        "Unparseable program name '{0}': expected snmp_<host>_fcports"
    )]
    ProgramName(String),
    #[error("Environment variable {0} is required")]
    Environment(&'static str),
    #[error("SNMP error: {0}")]
    Snmp(#[from] snmp_query::Error),
    #[error("Port {port} has no {counter} reading")]
    MissingCounter { port: u32, counter: &'static str },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Exit code reported back to the monitoring daemon.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) | Error::ProgramName(_) => 2,
            Error::Environment(_) => 3,
            Error::Snmp(_) | Error::MissingCounter { .. } | Error::Io(_) => 1,
        }
    }
}
