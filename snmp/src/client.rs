/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::net::IpAddr;
use std::time::Duration;

use async_snmp::Auth;
use log::debug;
use trust_dns_resolver::AsyncResolver;

use super::config::HostConfig;
use super::error::{Error, Result};
use super::oid::Oid;

const SNMP_PORT: u16 = 161;

/// One row returned by a subtree walk, in agent response order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarBind {
    pub oid: Oid,
    pub value: u64,
}

/// An open SNMP v2c session to a single host.
pub struct Session {
    client: async_snmp::UdpClient,
}

impl Session {
    /// Resolve the host name and open a session.
    pub async fn connect(host: &str, config: &HostConfig) -> Result<Self> {
        let ip_addr = match host.parse::<IpAddr>() {
            Ok(ip_addr) => ip_addr,
            Err(_) => ip_lookup_one(host).await?,
        };
        let peer =
            format!("{}:{}", ip_addr, config.port.unwrap_or(SNMP_PORT));
        let timing = config.timing.clone().unwrap_or_default();

        debug!("SNMP: connecting to {}", peer);
        let client =
            async_snmp::Client::builder(peer, Auth::v2c(&config.community))
                .timeout(Duration::from_secs_f64(timing.timeout))
                .retry(async_snmp::Retry {
                    max_attempts: timing.retries,
                    ..Default::default()
                })
                .connect()
                .await
                .map_err(|e| Error::Connection(*e))?;

        Ok(Self { client })
    }

    /// Walk the subtree rooted at the given oid. Rows are returned in
    /// response order; values must be integral.
    pub async fn walk(&self, oid: &Oid) -> Result<Vec<VarBind>> {
        debug!("SNMP: walking {}", oid);

        let root: async_snmp::Oid = oid
            .to_string()
            .parse()
            .map_err(|_| Error::InvalidOid(oid.to_string()))?;
        let vars = self
            .client
            .walk(root)
            .map_err(|e| Error::Query(oid.clone(), *e))?
            .collect()
            .await
            .map_err(|e| Error::Query(oid.clone(), *e))?;

        debug!("SNMP: walk {}: {} rows", oid, vars.len());
        vars.into_iter()
            .map(|var| {
                let oid: Oid = var.oid.to_string().parse()?;
                let value =
                    int_value(&var.value).ok_or_else(|| {
                        Error::UnexpectedType {
                            oid: oid.clone(),
                            value: format!("{:?}", var.value),
                        }
                    })?;
                Ok(VarBind { oid, value })
            })
            .collect()
    }
}

fn int_value(value: &async_snmp::Value) -> Option<u64> {
    match value {
        async_snmp::Value::Integer(v) => u64::try_from(*v).ok(),
        async_snmp::Value::Counter32(v) => Some(u64::from(*v)),
        async_snmp::Value::Gauge32(v) => Some(u64::from(*v)),
        async_snmp::Value::Counter64(v) => Some(*v),
        _ => None,
    }
}

async fn ip_lookup_one(hostname: &str) -> Result<IpAddr> {
    AsyncResolver::tokio_from_system_conf()?
        .lookup_ip(hostname)
        .await?
        .iter()
        .next()
        .ok_or_else(|| Error::NoIP(hostname.to_string()))
}
