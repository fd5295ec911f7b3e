use serde::{
    Deserialize,
    Serialize,
};

/// The supported isobaric labeling schemes.
///
/// `CustomOrNone` means "no correction configured": no channel table is
/// registered for it and no crosstalk matrix can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlexMode {
    #[serde(rename = "itraq_4plex")]
    FourPlex,
    #[serde(rename = "itraq_8plex_high_res")]
    EightPlexHighRes,
    #[serde(rename = "itraq_8plex_low_res")]
    EightPlexLowRes,
    #[serde(rename = "tmt_10plex")]
    TenPlexTmt,
    #[serde(rename = "tmt_11plex")]
    ElevenPlexTmt,
    #[serde(rename = "tmt_16plex")]
    SixteenPlexTmt,
    #[serde(rename = "tmt_18plex")]
    EighteenPlexTmt,
    #[serde(rename = "custom_or_none")]
    #[default]
    CustomOrNone,
}

impl PlexMode {
    /// Every mode with a registered channel table, i.e. everything but
    /// `CustomOrNone`.
    pub const SUPPORTED: [PlexMode; 7] = [
        PlexMode::FourPlex,
        PlexMode::EightPlexHighRes,
        PlexMode::EightPlexLowRes,
        PlexMode::TenPlexTmt,
        PlexMode::ElevenPlexTmt,
        PlexMode::SixteenPlexTmt,
        PlexMode::EighteenPlexTmt,
    ];

    /// Number of reporter channels, `None` for `CustomOrNone`.
    ///
    /// The low-res 8-plex count is 9: the synthetic channel at 120 absorbs
    /// the phenylalanine immonium ion artifact between 119 and 121.
    pub fn channel_count(&self) -> Option<usize> {
        match self {
            Self::FourPlex => Some(4),
            Self::EightPlexHighRes => Some(8),
            Self::EightPlexLowRes => Some(9),
            Self::TenPlexTmt => Some(10),
            Self::ElevenPlexTmt => Some(11),
            Self::SixteenPlexTmt => Some(16),
            Self::EighteenPlexTmt => Some(18),
            Self::CustomOrNone => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FourPlex => "iTRAQ 4-plex",
            Self::EightPlexHighRes => "iTRAQ 8-plex (high res MS/MS)",
            Self::EightPlexLowRes => "iTRAQ 8-plex (low res MS/MS)",
            Self::TenPlexTmt => "TMT 10-plex",
            Self::ElevenPlexTmt => "TMT 11-plex",
            Self::SixteenPlexTmt => "TMTpro 16-plex",
            Self::EighteenPlexTmt => "TMTpro 18-plex",
            Self::CustomOrNone => "custom / no correction",
        }
    }
}

/// Which published correction-factor table to use for 4-plex iTRAQ.
///
/// Both sources share the 4-plex topology; only the literal percentages
/// differ. Every other mode has a single table and ignores this selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FactorSource {
    #[serde(rename = "ab_sciex")]
    #[default]
    AbSciex,
    #[serde(rename = "broad_institute")]
    BroadInstitute,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_counts() {
        assert_eq!(PlexMode::FourPlex.channel_count(), Some(4));
        assert_eq!(PlexMode::EightPlexHighRes.channel_count(), Some(8));
        assert_eq!(PlexMode::EightPlexLowRes.channel_count(), Some(9));
        assert_eq!(PlexMode::TenPlexTmt.channel_count(), Some(10));
        assert_eq!(PlexMode::ElevenPlexTmt.channel_count(), Some(11));
        assert_eq!(PlexMode::SixteenPlexTmt.channel_count(), Some(16));
        assert_eq!(PlexMode::EighteenPlexTmt.channel_count(), Some(18));
        assert_eq!(PlexMode::CustomOrNone.channel_count(), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let serialized = serde_json::to_string(&PlexMode::SixteenPlexTmt).unwrap();
        assert_eq!(serialized, "\"tmt_16plex\"");
        let back: PlexMode = serde_json::from_str(&serialized).unwrap();
        assert_eq!(back, PlexMode::SixteenPlexTmt);

        let source: FactorSource = serde_json::from_str("\"broad_institute\"").unwrap();
        assert_eq!(source, FactorSource::BroadInstitute);
    }
}
