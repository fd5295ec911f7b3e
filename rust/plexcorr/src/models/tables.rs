//! Reagent purity tables for every supported plex mode.
//!
//! Each channel is declared as a `(label, grid position, five percentages)`
//! row. The grid position places the channel on an integer mass grid so a
//! single placement routine can build every matrix: an isotope offset of
//! `k` Daltons from a channel lands at `position + k * da_step`, and is
//! dropped when no channel sits there.
//!
//! iTRAQ grids use 1 position per Dalton (positions are the nominal
//! reporter masses). TMT grids use 2 positions per Dalton: the N and C
//! channels of one nominal mass are ~6 mDa apart, so a +1 Da isotope of an
//! N channel lands on the next N channel, skipping the interleaved C slot.
//!
//! Percentages are `[minus2, minus1, zero, plus1, plus2]`; a `zero` of 0.0
//! is derived by the [`IsotopeContribution`](super::contribution::IsotopeContribution)
//! factory as `100 - (sum of the other four)`.

use super::plex_mode::{
    FactorSource,
    PlexMode,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelDef {
    pub label: &'static str,
    pub position: i32,
    /// `[minus2, minus1, zero, plus1, plus2]`, in percent.
    pub percentages: [f64; 5],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeTable {
    /// Grid positions per Dalton (1 for iTRAQ, 2 for TMT).
    pub da_step: i32,
    /// Channels in ascending nominal reporter mass, index-aligned with the
    /// intensity vectors the caller passes.
    pub channels: &'static [ChannelDef],
}

impl ModeTable {
    /// Index of the channel at `position`, if one exists in this plex.
    pub fn index_at(&self, position: i32) -> Option<usize> {
        self.channels.iter().position(|c| c.position == position)
    }
}

const fn ch(label: &'static str, position: i32, percentages: [f64; 5]) -> ChannelDef {
    ChannelDef {
        label,
        position,
        percentages,
    }
}

// 4-plex iTRAQ, vendor (AB Sciex) certificate values.
static ITRAQ4_AB_SCIEX: [ChannelDef; 4] = [
    ch("114", 114, [0.0, 1.0, 92.9, 5.9, 0.2]),
    ch("115", 115, [0.0, 2.0, 92.3, 5.6, 0.1]),
    ch("116", 116, [0.0, 3.0, 92.4, 4.5, 0.1]),
    ch("117", 117, [0.1, 4.0, 92.3, 3.5, 0.1]),
];

// 4-plex iTRAQ, alternate laboratory-measured values.
static ITRAQ4_BROAD: [ChannelDef; 4] = [
    ch("114", 114, [0.0, 0.0, 0.0, 5.9, 0.2]),
    ch("115", 115, [0.0, 0.9, 0.0, 4.5, 0.0]),
    ch("116", 116, [0.0, 1.8, 0.0, 4.0, 0.0]),
    ch("117", 117, [0.1, 2.7, 0.0, 3.4, 0.1]),
];

// 8-plex iTRAQ. No reporter exists at 120 (2 Da gap between 119 and 121),
// so 119's +1 and 121's -1 isotopes have nowhere to land.
static ITRAQ8_HIGH_RES: [ChannelDef; 8] = [
    ch("113", 113, [0.0, 0.0, 0.0, 6.89, 0.22]),
    ch("114", 114, [0.0, 0.94, 0.0, 5.90, 0.16]),
    ch("115", 115, [0.0, 1.88, 0.0, 4.90, 0.10]),
    ch("116", 116, [0.0, 2.82, 0.0, 3.90, 0.07]),
    ch("117", 117, [0.06, 3.76, 0.0, 2.99, 0.0]),
    ch("118", 118, [0.09, 4.71, 0.0, 1.88, 0.0]),
    ch("119", 119, [0.14, 5.66, 0.0, 0.87, 0.0]),
    ch("121", 121, [0.27, 7.44, 0.0, 0.18, 0.0]),
];

// Low-res MS/MS cannot resolve the phenylalanine immonium ion (120.08)
// from a reporter at 120, so this mode carries a synthetic 120 channel to
// absorb it, along with the isotope spill from 119 and 121.
static ITRAQ8_LOW_RES: [ChannelDef; 9] = [
    ch("113", 113, [0.0, 0.0, 0.0, 6.89, 0.22]),
    ch("114", 114, [0.0, 0.94, 0.0, 5.90, 0.16]),
    ch("115", 115, [0.0, 1.88, 0.0, 4.90, 0.10]),
    ch("116", 116, [0.0, 2.82, 0.0, 3.90, 0.07]),
    ch("117", 117, [0.06, 3.76, 0.0, 2.99, 0.0]),
    ch("118", 118, [0.09, 4.71, 0.0, 1.88, 0.0]),
    ch("119", 119, [0.14, 5.66, 0.0, 0.87, 0.0]),
    ch("120", 120, [0.0, 0.0, 100.0, 0.0, 0.0]),
    ch("121", 121, [0.27, 7.44, 0.0, 0.18, 0.0]),
];

// TMT 11-plex; the 10-plex table is the first ten rows.
static TMT11: [ChannelDef; 11] = [
    ch("126", 0, [0.0, 0.0, 0.0, 5.0, 0.0]),
    ch("127N", 1, [0.0, 0.2, 0.0, 5.8, 0.0]),
    ch("127C", 2, [0.0, 0.3, 0.0, 4.8, 0.0]),
    ch("128N", 3, [0.0, 0.4, 0.0, 4.1, 0.0]),
    ch("128C", 4, [0.0, 0.6, 0.0, 3.6, 0.0]),
    ch("129N", 5, [0.0, 0.8, 0.0, 3.1, 0.0]),
    ch("129C", 6, [0.0, 1.4, 0.0, 2.4, 0.0]),
    ch("130N", 7, [0.0, 1.5, 0.0, 2.4, 0.0]),
    ch("130C", 8, [0.0, 1.8, 0.0, 2.1, 0.0]),
    ch("131", 9, [0.0, 2.0, 0.0, 1.7, 0.0]),
    ch("131C", 10, [0.0, 2.2, 0.0, 1.5, 0.0]),
];

// TMTpro 18-plex; the 16-plex table is the first sixteen rows.
static TMT18: [ChannelDef; 18] = [
    ch("126", 0, [0.0, 0.0, 0.0, 8.0, 0.3]),
    ch("127N", 1, [0.0, 0.0, 0.0, 7.9, 0.5]),
    ch("127C", 2, [0.0, 0.6, 0.0, 7.0, 0.4]),
    ch("128N", 3, [0.0, 0.4, 0.0, 6.9, 0.3]),
    ch("128C", 4, [0.0, 1.1, 0.0, 5.6, 0.3]),
    ch("129N", 5, [0.0, 0.9, 0.0, 5.8, 0.2]),
    ch("129C", 6, [0.0, 1.7, 0.0, 5.3, 0.2]),
    ch("130N", 7, [0.0, 1.4, 0.0, 5.1, 0.2]),
    ch("130C", 8, [0.1, 2.3, 0.0, 4.5, 0.1]),
    ch("131N", 9, [0.1, 1.9, 0.0, 4.6, 0.1]),
    ch("131C", 10, [0.1, 3.0, 0.0, 3.7, 0.1]),
    ch("132N", 11, [0.1, 2.6, 0.0, 3.7, 0.1]),
    ch("132C", 12, [0.2, 3.5, 0.0, 2.9, 0.0]),
    ch("133N", 13, [0.2, 3.1, 0.0, 2.8, 0.0]),
    ch("133C", 14, [0.2, 4.1, 0.0, 2.1, 0.0]),
    ch("134N", 15, [0.2, 3.7, 0.0, 2.0, 0.0]),
    ch("134C", 16, [0.3, 4.5, 0.0, 1.5, 0.0]),
    ch("135N", 17, [0.3, 4.1, 0.0, 1.4, 0.0]),
];

/// The channel table for a mode, `None` for `CustomOrNone`.
///
/// `source` only differentiates the 4-plex tables; every other mode has a
/// single published table.
pub fn mode_table(mode: PlexMode, source: FactorSource) -> Option<ModeTable> {
    let table = match mode {
        PlexMode::FourPlex => match source {
            FactorSource::AbSciex => ModeTable {
                da_step: 1,
                channels: &ITRAQ4_AB_SCIEX,
            },
            FactorSource::BroadInstitute => ModeTable {
                da_step: 1,
                channels: &ITRAQ4_BROAD,
            },
        },
        PlexMode::EightPlexHighRes => ModeTable {
            da_step: 1,
            channels: &ITRAQ8_HIGH_RES,
        },
        PlexMode::EightPlexLowRes => ModeTable {
            da_step: 1,
            channels: &ITRAQ8_LOW_RES,
        },
        PlexMode::TenPlexTmt => ModeTable {
            da_step: 2,
            channels: &TMT11[..10],
        },
        PlexMode::ElevenPlexTmt => ModeTable {
            da_step: 2,
            channels: &TMT11,
        },
        PlexMode::SixteenPlexTmt => ModeTable {
            da_step: 2,
            channels: &TMT18[..16],
        },
        PlexMode::EighteenPlexTmt => ModeTable {
            da_step: 2,
            channels: &TMT18,
        },
        PlexMode::CustomOrNone => return None,
    };
    Some(table)
}
