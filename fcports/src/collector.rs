/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use log::debug;

use snmp_query::{Oid, Session, VarBind};

use super::counters::{link_state_oid, Counter, LINK_STATE_ENABLED};
use super::error::{Error, Result};

/// Per-port readings of one counter, keyed by the agent's 1-based
/// port index.
pub type PortMap = BTreeMap<u32, u64>;

/// The counter query collaborator: walk the subtree at the given
/// locator and return the rows in response order.
#[async_trait]
pub trait WalkSource {
    async fn walk(&self, oid: &Oid) -> snmp_query::Result<Vec<VarBind>>;
}

#[async_trait]
impl WalkSource for Session {
    async fn walk(&self, oid: &Oid) -> snmp_query::Result<Vec<VarBind>> {
        Session::walk(self, oid).await
    }
}

/// Rows lying directly under the reference path, keyed by their final
/// sub-identifier.
pub fn in_subtree(rows: &[VarBind], parent: &Oid) -> PortMap {
    rows.iter()
        .filter(|row| {
            parent.contains(&row.oid) && row.oid.len() == parent.len() + 1
        })
        .filter_map(|row| row.oid.last().map(|index| (index, row.value)))
        .collect()
}

/// Index the rows of a single-column walk by port. The column boundary
/// is the parent path of the first row; rows past it are overrun from a
/// bulk walk and are dropped.
pub fn subtree_values(rows: &[VarBind]) -> PortMap {
    match rows.first().and_then(|row| row.oid.parent()) {
        Some(parent) => in_subtree(rows, &parent),
        None => PortMap::new(),
    }
}

/// Walk the link-state column, giving the state of every known port.
pub async fn link_states<W: WalkSource + Sync>(walker: &W) -> Result<PortMap> {
    let oid = link_state_oid();
    let rows = walker.walk(&oid).await?;
    let states = subtree_values(&rows);
    match states.is_empty() {
        true => Err(snmp_query::Error::EmptyResponse(oid).into()),
        false => Ok(states),
    }
}

/// The set of ports whose link state equals the enabled sentinel.
pub async fn enabled_ports<W: WalkSource + Sync>(
    walker: &W,
) -> Result<BTreeSet<u32>> {
    Ok(enabled_in(&link_states(walker).await?))
}

fn enabled_in(states: &PortMap) -> BTreeSet<u32> {
    states
        .iter()
        .filter(|(_, &state)| state == LINK_STATE_ENABLED)
        .map(|(&port, _)| port)
        .collect()
}

/// Walk one counter column.
pub async fn port_values<W: WalkSource + Sync>(
    walker: &W,
    oid: &Oid,
) -> Result<PortMap> {
    let rows = walker.walk(oid).await?;
    let values = subtree_values(&rows);
    match values.is_empty() {
        true => Err(snmp_query::Error::EmptyResponse(oid.clone()).into()),
        false => Ok(values),
    }
}

/// Encoding errors per million frames, computed independently per port
/// over the ports present in the rx frame map.
pub fn enc_out_per_mframe(
    rx_frames: &PortMap,
    tx_frames: &PortMap,
    enc_out: &PortMap,
) -> Result<PortMap> {
    rx_frames
        .iter()
        .map(|(&port, &rx)| {
            let tx = lookup(tx_frames, Counter::TxFrames, port)?;
            let enc = lookup(enc_out, Counter::EncOut, port)?;
            Ok((port, per_mframe(enc, rx + tx)))
        })
        .collect()
}

/// Errors per million frames, in integer division. A frame count of
/// zero gives zero.
pub fn per_mframe(errors: u64, frames: u64) -> u64 {
    match frames {
        0 => 0,
        frames => 1_000_000 * errors / frames,
    }
}

fn lookup(values: &PortMap, counter: Counter, port: u32) -> Result<u64> {
    values.get(&port).copied().ok_or(Error::MissingCounter {
        port,
        counter: counter.name(),
    })
}

/// One snapshot of the port counters. Only ports in the enabled set
/// are reported and summed.
pub struct PortData {
    enabled: BTreeSet<u32>,
    rx_crcs: PortMap,
    enc_out: PortMap,
    tx_words: PortMap,
    rx_words: PortMap,
    tx_frames: PortMap,
    rx_frames: PortMap,
    enc_out_per_mframe: PortMap,
}

impl PortData {
    /// Retrieve one snapshot: the link-state walk first, then one walk
    /// per counter column.
    pub async fn collect<W: WalkSource + Sync>(walker: &W) -> Result<Self> {
        let states = link_states(walker).await?;
        let enabled = enabled_in(&states);
        debug!(
            "SNMP: {} of {} ports enabled",
            enabled.len(),
            states.len()
        );

        let rx_crcs = counter_values(walker, &states, Counter::RxCrcs).await?;
        let enc_out = counter_values(walker, &states, Counter::EncOut).await?;
        let tx_words =
            counter_values(walker, &states, Counter::TxWords).await?;
        let rx_words =
            counter_values(walker, &states, Counter::RxWords).await?;
        let tx_frames =
            counter_values(walker, &states, Counter::TxFrames).await?;
        let rx_frames =
            counter_values(walker, &states, Counter::RxFrames).await?;
        let rates = enc_out_per_mframe(&rx_frames, &tx_frames, &enc_out)?;

        Ok(Self {
            enabled,
            rx_crcs,
            enc_out,
            tx_words,
            rx_words,
            tx_frames,
            rx_frames,
            enc_out_per_mframe: rates,
        })
    }

    pub fn enabled(&self) -> &BTreeSet<u32> {
        &self.enabled
    }

    pub fn value(&self, counter: Counter, port: u32) -> Result<u64> {
        lookup(self.map(counter), counter, port)
    }

    /// The derived errors-per-million-frames reading.
    pub fn rate(&self, port: u32) -> Result<u64> {
        self.enc_out_per_mframe.get(&port).copied().ok_or(
            Error::MissingCounter {
                port,
                counter: "enc_out_per_mframe",
            },
        )
    }

    fn map(&self, counter: Counter) -> &PortMap {
        match counter {
            Counter::RxCrcs => &self.rx_crcs,
            Counter::EncOut => &self.enc_out,
            Counter::TxWords => &self.tx_words,
            Counter::RxWords => &self.rx_words,
            Counter::TxFrames => &self.tx_frames,
            Counter::RxFrames => &self.rx_frames,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        enabled: BTreeSet<u32>,
        values: BTreeMap<Counter, PortMap>,
        enc_out_per_mframe: PortMap,
    ) -> Self {
        let map = |counter: Counter| {
            values.get(&counter).cloned().unwrap_or_default()
        };
        Self {
            enabled,
            rx_crcs: map(Counter::RxCrcs),
            enc_out: map(Counter::EncOut),
            tx_words: map(Counter::TxWords),
            rx_words: map(Counter::RxWords),
            tx_frames: map(Counter::TxFrames),
            rx_frames: map(Counter::RxFrames),
            enc_out_per_mframe,
        }
    }
}

/// Walk one counter column and check that it covers every port the
/// link-state table reported.
async fn counter_values<W: WalkSource + Sync>(
    walker: &W,
    states: &PortMap,
    counter: Counter,
) -> Result<PortMap> {
    let values = port_values(walker, &counter.oid()).await?;
    for &port in states.keys() {
        if !values.contains_key(&port) {
            return Err(Error::MissingCounter {
                port,
                counter: counter.name(),
            });
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {

    use std::collections::{BTreeSet, HashMap};

    use async_trait::async_trait;
    use snmp_query::{Oid, VarBind};

    use super::super::counters::{link_state_oid, Counter};
    use super::super::error::Error;
    use super::{
        enabled_ports, enc_out_per_mframe, per_mframe, subtree_values,
        PortData, WalkSource,
    };

    struct FakeWalker(HashMap<Oid, Vec<VarBind>>);

    #[async_trait]
    impl WalkSource for FakeWalker {
        async fn walk(
            &self,
            oid: &Oid,
        ) -> snmp_query::Result<Vec<VarBind>> {
            Ok(self.0.get(oid).cloned().unwrap_or_default())
        }
    }

    fn column(oid: &Oid, values: &[(u32, u64)]) -> Vec<VarBind> {
        values
            .iter()
            .map(|&(port, value)| VarBind {
                oid: oid.child(port),
                value,
            })
            .collect()
    }

    fn switch(link: &[(u32, u64)], counters: &[(u32, u64)]) -> FakeWalker {
        let mut walks = HashMap::new();
        walks.insert(link_state_oid(), column(&link_state_oid(), link));
        for counter in [
            Counter::RxCrcs,
            Counter::EncOut,
            Counter::TxWords,
            Counter::RxWords,
            Counter::TxFrames,
            Counter::RxFrames,
        ] {
            walks
                .insert(counter.oid(), column(&counter.oid(), counters));
        }
        FakeWalker(walks)
    }

    #[tokio::test]
    async fn enabled_ports_filter_link_state() {
        let walker = switch(&[(1, 1), (2, 0), (3, 1)], &[]);
        let enabled = enabled_ports(&walker).await.unwrap();
        assert_eq!(enabled, BTreeSet::from([1, 3]));
    }

    #[tokio::test]
    async fn empty_link_state_walk_fails() {
        let walker = FakeWalker(HashMap::new());
        assert!(matches!(
            enabled_ports(&walker).await,
            Err(Error::Snmp(snmp_query::Error::EmptyResponse(_)))
        ));
    }

    #[test]
    fn walk_overrun_is_dropped() {
        let table = link_state_oid();
        let mut rows = column(&table, &[(1, 1), (2, 0)]);
        rows.push(VarBind {
            oid: table.parent().unwrap().child(7).child(1),
            value: 99,
        });
        let values = subtree_values(&rows);
        assert_eq!(values.len(), 2);
        assert_eq!(values.get(&1), Some(&1));
        assert_eq!(values.get(&2), Some(&0));
    }

    #[test]
    fn rate_is_zero_without_frames() {
        assert_eq!(per_mframe(7, 0), 0);
    }

    #[test]
    fn rate_truncates() {
        // 1.666... per million
        assert_eq!(per_mframe(5, 3_000_000), 1);
        assert_eq!(per_mframe(10, 5_000_000), 2);
    }

    #[test]
    fn rates_are_computed_per_port() {
        let rx_frames = [(1, 4_000_000), (2, 100)].into();
        let tx_frames = [(1, 1_000_000), (2, 0)].into();
        let enc_out = [(1, 10), (2, 1)].into();
        let rates =
            enc_out_per_mframe(&rx_frames, &tx_frames, &enc_out).unwrap();
        assert_eq!(rates.get(&1), Some(&2));
        assert_eq!(rates.get(&2), Some(&10_000));
    }

    #[test]
    fn rates_need_matching_entries() {
        let rx_frames = [(1, 100)].into();
        let tx_frames = [(1, 100)].into();
        let enc_out = [(2, 1)].into();
        assert!(matches!(
            enc_out_per_mframe(&rx_frames, &tx_frames, &enc_out),
            Err(Error::MissingCounter { port: 1, .. })
        ));
    }

    #[tokio::test]
    async fn collect_covers_enabled_ports() {
        let walker =
            switch(&[(1, 1), (2, 0), (3, 1)], &[(1, 10), (2, 20), (3, 30)]);
        let data = PortData::collect(&walker).await.unwrap();
        assert_eq!(data.enabled(), &BTreeSet::from([1, 3]));
        assert_eq!(data.value(Counter::RxCrcs, 3).unwrap(), 30);
        assert_eq!(data.rate(1).unwrap(), per_mframe(10, 20));
    }

    #[tokio::test]
    async fn collect_fails_on_missing_counter_row() {
        let mut walker =
            switch(&[(1, 1), (2, 0)], &[(1, 10), (2, 20)]);
        let oid = Counter::RxFrames.oid();
        walker.0.insert(oid.clone(), column(&oid, &[(1, 10)]));
        assert!(matches!(
            PortData::collect(&walker).await,
            Err(Error::MissingCounter { port: 2, .. })
        ));
    }
}
