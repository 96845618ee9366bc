/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use thiserror::Error;

use super::oid::Oid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to connect: {0}")]
    Connection(async_snmp::Error),
    #[error("Query failed for {0}: {1}")]
    Query(Oid, async_snmp::Error),
    #[error("Empty response for {0}")]
    EmptyResponse(Oid),
    #[error("Unexpected value type for {oid}: {value}")]
    UnexpectedType { oid: Oid, value: String },
    #[error("Invalid OID: {0}")]
    InvalidOid(String),
    #[error("No IP found for {0}")]
    NoIP(String),
    #[error("Failed to lookup IP: {0}")]
    Dns(#[from] trust_dns_resolver::error::ResolveError),
}
