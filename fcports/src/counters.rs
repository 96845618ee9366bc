/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use snmp_query::Oid;

/* Wire locators (SW-MIB swFCPortTable). */

/// Per-port counter table on Brocade FC switches.
pub const PORT_TABLE: &[u32] = &[1, 3, 6, 1, 4, 1, 1588, 2, 1, 1, 1, 6, 2, 1];

/// swFCPortLinkState column.
const LINK_STATE_COLUMN: u32 = 6;

/// swFCPortLinkState value denoting an enabled port.
pub const LINK_STATE_ENABLED: u64 = 1;

pub fn link_state_oid() -> Oid {
    Oid::from(PORT_TABLE).child(LINK_STATE_COLUMN)
}

/// Directly queried per-port counters.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Counter {
    RxCrcs,
    EncOut,
    TxWords,
    RxWords,
    TxFrames,
    RxFrames,
}

impl Counter {
    pub fn name(self) -> &'static str {
        match self {
            Counter::RxCrcs => "rx_crcs",
            Counter::EncOut => "enc_out",
            Counter::TxWords => "tx_words",
            Counter::RxWords => "rx_words",
            Counter::TxFrames => "tx_frames",
            Counter::RxFrames => "rx_frames",
        }
    }

    fn column(self) -> u32 {
        match self {
            Counter::TxWords => 8,
            Counter::RxWords => 9,
            Counter::TxFrames => 10,
            Counter::RxFrames => 11,
            Counter::RxCrcs => 19,
            Counter::EncOut => 23,
        }
    }

    pub fn oid(self) -> Oid {
        Oid::from(PORT_TABLE).child(self.column())
    }
}

/* Reported graphs. */

/// Graph kinds reported to the monitoring daemon. Table order is the
/// section order in both config and fetch output.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GraphKind {
    RxCrcs,
    EncOut,
    EncOutPerMframe,
    Bits,
}

pub const GRAPH_KINDS: &[GraphKind] = &[
    GraphKind::RxCrcs,
    GraphKind::EncOut,
    GraphKind::EncOutPerMframe,
    GraphKind::Bits,
];

impl GraphKind {
    pub fn name(self) -> &'static str {
        match self {
            GraphKind::RxCrcs => "rx_crcs",
            GraphKind::EncOut => "enc_out",
            GraphKind::EncOutPerMframe => "enc_out_per_mframe",
            GraphKind::Bits => "bits",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            GraphKind::RxCrcs => "RX CRC errors",
            GraphKind::EncOut => "encoding errors outside frames",
            GraphKind::EncOutPerMframe => "encoding errors per million frames",
            GraphKind::Bits => "traffic",
        }
    }

    pub fn info(self) -> &'static str {
        match self {
            GraphKind::RxCrcs => "CRC errors detected in received frames",
            GraphKind::EncOut => {
                "Encoding errors detected outside frame boundaries"
            }
            GraphKind::EncOutPerMframe => {
                "Encoding errors outside frames per million frames"
            }
            GraphKind::Bits => "Bits received and transmitted on the port",
        }
    }

    pub fn vlabel(self) -> &'static str {
        match self {
            GraphKind::RxCrcs | GraphKind::EncOut => "errors",
            GraphKind::EncOutPerMframe => "errors / Mframe",
            GraphKind::Bits => "bits in (-) / out (+) per ${graph_period}",
        }
    }
}

/* Unit conversions and display limits. */

/// One FC word is 4 transmission units of 10 bits.
pub const BITS_PER_WORD: u64 = 40;

/// Counter ceiling at the 20 Gbit/s theoretical link speed; filters
/// startup-spike artifacts.
pub const BITS_FIELD_MAX: u64 = 20_000_000_000;

/// Assumed maximum port count, scaling the ceiling of host-wide graphs.
pub const MAX_PORTS: u64 = 40;
