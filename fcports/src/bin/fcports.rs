/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::io::{self, Write};

use clap::Parser;

use fcports_plugin::{
    enabled_ports, write_config, write_fetch, Mode, PluginConfig, PortData,
    Result,
};
use snmp_query::{HostConfig, Session};

/// Report Fibre Channel port error counters and traffic for a Brocade
/// switch, in the munin plugin protocol. The target host is taken from
/// the name the plugin is linked as (snmp_<host>_fcports).
#[derive(Parser)]
#[clap(version, author)]
struct Args {
    /// Mode word passed by the daemon ("config"), if any.
    mode: Option<String>,
    /// Increase logging verbosity.
    #[clap(long = "verbose", short = 'v', parse(from_occurrences))]
    verbose: u8,
}

impl Args {
    fn verbosity(&self) -> simplelog::LevelFilter {
        match self.verbose {
            0 => simplelog::LevelFilter::Warn,
            1 => simplelog::LevelFilter::Info,
            2 => simplelog::LevelFilter::Debug,
            3.. => simplelog::LevelFilter::Trace,
        }
    }
}

#[tokio::main]
async fn main() {
    let program = std::env::args().next().unwrap_or_default();
    let args = Args::parse();

    if let Err(e) = simplelog::TermLogger::init(
        args.verbosity(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&program, args.mode.as_deref()).await {
        log::error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(program: &str, mode: Option<&str>) -> Result<()> {
    let config = PluginConfig::from_invocation(program, mode)?;
    let host_config = HostConfig {
        community: config.community.clone(),
        ..HostConfig::default()
    };

    let session = Session::connect(&config.host, &host_config).await?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::with_capacity(16384, stdout.lock());
    match config.mode {
        Mode::Config => {
            let ports = enabled_ports(&session).await?;
            write_config(&mut out, &config, &ports)?;
        }
        Mode::Fetch => {
            let data = PortData::collect(&session).await?;
            write_fetch(&mut out, &data)?;
        }
    }
    Ok(out.flush()?)
}
