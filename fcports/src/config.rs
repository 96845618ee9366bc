/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::env;

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Environment variable set by a daemon that understands multigraph
/// output.
const CAP_MULTIGRAPH: &str = "MUNIN_CAP_MULTIGRAPH";

/// Environment variable carrying the SNMP community string.
const COMMUNITY: &str = "community";

/// Invocation mode, selected by the daemon through the plugin argument.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Fetch,
    Config,
}

impl Mode {
    pub fn from_arg(arg: Option<&str>) -> Result<Self> {
        match arg {
            None => Ok(Mode::Fetch),
            Some("config") => Ok(Mode::Config),
            Some(other) => {
                Err(Error::Usage(format!("unknown mode '{}'", other)))
            }
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PluginConfig {
    pub host: String,
    pub community: String,
    pub mode: Mode,
}

impl PluginConfig {
    /// Build the configuration from the process environment: the link
    /// name carries the target host, the `community` variable the
    /// credential, and the daemon passes the mode word as the only
    /// argument.
    pub fn from_invocation(
        program: &str,
        mode: Option<&str>,
    ) -> Result<Self> {
        require_multigraph()?;
        Ok(Self {
            host: host_from_program_name(program)?,
            community: env::var(COMMUNITY)
                .unwrap_or_else(|_| String::from("public")),
            mode: Mode::from_arg(mode)?,
        })
    }
}

/// The graph set is only expressible with multigraph support.
fn require_multigraph() -> Result<()> {
    match env::var(CAP_MULTIGRAPH) {
        Ok(val) if val == "1" => Ok(()),
        _ => Err(Error::Environment(CAP_MULTIGRAPH)),
    }
}

/// The target host, taken from a link name of the form
/// `snmp_<host>_fcports`.
fn host_from_program_name(program: &str) -> Result<String> {
    let name = program.rsplit('/').next().unwrap_or(program);
    name.strip_prefix("snmp_")
        .and_then(|rest| rest.strip_suffix("_fcports"))
        .filter(|host| !host.is_empty())
        .map(String::from)
        .ok_or_else(|| Error::ProgramName(name.to_string()))
}

#[cfg(test)]
mod tests {

    use super::super::error::Error;
    use super::{host_from_program_name, Mode};

    #[test]
    fn host_comes_from_the_link_name() {
        assert_eq!(
            host_from_program_name("snmp_switch1_fcports").unwrap(),
            "switch1"
        );
        assert_eq!(
            host_from_program_name(
                "/etc/munin/plugins/snmp_san-sw2_fcports"
            )
            .unwrap(),
            "san-sw2"
        );
    }

    #[test]
    fn unparseable_link_names_are_rejected() {
        for name in [
            "fcports",
            "snmp__fcports",
            "snmp_switch1",
            "snmp_switch1_ports",
        ] {
            assert!(matches!(
                host_from_program_name(name),
                Err(Error::ProgramName(_))
            ));
        }
    }

    #[test]
    fn mode_defaults_to_fetch() {
        assert_eq!(Mode::from_arg(None).unwrap(), Mode::Fetch);
        assert_eq!(Mode::from_arg(Some("config")).unwrap(), Mode::Config);
        assert!(matches!(
            Mode::from_arg(Some("autoconf")),
            Err(Error::Usage(_))
        ));
    }
}
