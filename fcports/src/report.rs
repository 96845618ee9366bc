/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use super::collector::{per_mframe, PortData};
use super::config::PluginConfig;
use super::counters::{
    Counter, GraphKind, BITS_FIELD_MAX, BITS_PER_WORD, GRAPH_KINDS, MAX_PORTS,
};
use super::error::Result;

/// Host-wide running sums, keyed by counter or aggregate name.
#[derive(Default)]
struct Totals(BTreeMap<&'static str, u64>);

impl Totals {
    fn add(&mut self, name: &'static str, value: u64) {
        *self.0.entry(name).or_default() += value;
    }

    fn get(&self, name: &str) -> u64 {
        self.0.get(name).copied().unwrap_or(0)
    }
}

/// The port number shown to the daemon: the switch numbers its ports
/// from 0, the agent's table rows from 1.
fn external(port: u32) -> u32 {
    port.saturating_sub(1)
}

/// Print the graph declarations: one section per graph kind and enabled
/// port, then one host-wide aggregate section per graph kind.
pub fn write_config<W: Write>(
    out: &mut W,
    config: &PluginConfig,
    ports: &BTreeSet<u32>,
) -> Result<()> {
    writeln!(out, "host_name {}", config.host)?;
    for &kind in GRAPH_KINDS {
        for &port in ports {
            writeln!(out, "multigraph {}.port_{}", kind.name(), external(port))?;
            writeln!(out, "graph_title Port {} {}", external(port), kind.title())?;
            write_graph_meta(out, kind)?;
            write_fields(out, kind, BITS_FIELD_MAX)?;
        }
    }
    for &kind in GRAPH_KINDS {
        writeln!(out, "multigraph {}", kind.name())?;
        writeln!(out, "graph_title {} {}", config.host, kind.title())?;
        write_graph_meta(out, kind)?;
        write_fields(out, kind, MAX_PORTS * BITS_FIELD_MAX)?;
    }
    Ok(())
}

fn write_graph_meta<W: Write>(out: &mut W, kind: GraphKind) -> Result<()> {
    writeln!(out, "graph_args --base 1000 -l 0")?;
    writeln!(out, "graph_category san")?;
    writeln!(out, "graph_info {}", kind.info())?;
    writeln!(out, "graph_vlabel {}", kind.vlabel())?;
    Ok(())
}

fn write_fields<W: Write>(out: &mut W, kind: GraphKind, max: u64) -> Result<()> {
    match kind {
        GraphKind::Bits => {
            writeln!(out, "graph_order rx tx")?;
            writeln!(out, "rx.label received")?;
            writeln!(out, "rx.type COUNTER")?;
            writeln!(out, "rx.graph no")?;
            writeln!(out, "rx.max {}", max)?;
            writeln!(out, "tx.label bps")?;
            writeln!(out, "tx.type COUNTER")?;
            writeln!(out, "tx.negative rx")?;
            writeln!(out, "tx.max {}", max)?;
        }
        kind => {
            writeln!(out, "count.label {}", kind.name())?;
            writeln!(out, "count.type GAUGE")?;
        }
    }
    Ok(())
}

/// Print the current values: one section per enabled port and graph
/// kind, then the host-wide totals per graph kind.
pub fn write_fetch<W: Write>(out: &mut W, data: &PortData) -> Result<()> {
    let mut totals = Totals::default();

    for &port in data.enabled() {
        for &kind in GRAPH_KINDS {
            writeln!(out, "multigraph {}.port_{}", kind.name(), external(port))?;
            match kind {
                GraphKind::RxCrcs => {
                    let value = data.value(Counter::RxCrcs, port)?;
                    writeln!(out, "count.value {}", value)?;
                    totals.add("rx_crcs", value);
                }
                GraphKind::EncOut => {
                    let value = data.value(Counter::EncOut, port)?;
                    writeln!(out, "count.value {}", value)?;
                    totals.add("enc_out", value);
                }
                GraphKind::EncOutPerMframe => {
                    writeln!(out, "count.value {}", data.rate(port)?)?;
                }
                GraphKind::Bits => {
                    let rx =
                        data.value(Counter::RxWords, port)? * BITS_PER_WORD;
                    let tx =
                        data.value(Counter::TxWords, port)? * BITS_PER_WORD;
                    writeln!(out, "rx.value {}", rx)?;
                    writeln!(out, "tx.value {}", tx)?;
                    totals.add("rx_bits", rx);
                    totals.add("tx_bits", tx);
                }
            }
        }
        totals.add("rx_frames", data.value(Counter::RxFrames, port)?);
        totals.add("tx_frames", data.value(Counter::TxFrames, port)?);
    }

    // The aggregate error rate is recomputed from the summed counters,
    // not summed over the per-port rates.
    totals.add(
        "enc_out_per_mframe",
        per_mframe(
            totals.get("enc_out"),
            totals.get("rx_frames") + totals.get("tx_frames"),
        ),
    );

    for &kind in GRAPH_KINDS {
        writeln!(out, "multigraph {}", kind.name())?;
        match kind {
            GraphKind::Bits => {
                writeln!(out, "rx.value {}", totals.get("rx_bits"))?;
                writeln!(out, "tx.value {}", totals.get("tx_bits"))?;
            }
            kind => {
                writeln!(out, "count.value {}", totals.get(kind.name()))?;
            }
        }
    }

    Ok(())
}
