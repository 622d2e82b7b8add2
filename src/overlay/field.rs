use std::collections::BTreeSet;

use crate::models::PlayerRecord;

pub(crate) const NOT_AVAILABLE: &str = "N/A";

/// Toggleable extra stats, declared in canonical display order. The
/// rating itself always shows and is not part of this universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatField {
    Name,
    MaxMmr,
    OverallRank,
    EventsPlayed,
    WinRate,
    WinLossLastTen,
    GainLossLastTen,
    LargestGain,
    AverageScore,
    AverageLastTen,
    PartnerAvg,
    LastDiff,
}

impl StatField {
    pub const ALL: [StatField; 12] = [
        StatField::Name,
        StatField::MaxMmr,
        StatField::OverallRank,
        StatField::EventsPlayed,
        StatField::WinRate,
        StatField::WinLossLastTen,
        StatField::GainLossLastTen,
        StatField::LargestGain,
        StatField::AverageScore,
        StatField::AverageLastTen,
        StatField::PartnerAvg,
        StatField::LastDiff,
    ];

    /// Key used in overlay URLs, matching the wire casing.
    pub fn key(self) -> &'static str {
        match self {
            StatField::Name => "name",
            StatField::MaxMmr => "maxMmr",
            StatField::OverallRank => "overallRank",
            StatField::EventsPlayed => "eventsPlayed",
            StatField::WinRate => "winRate",
            StatField::WinLossLastTen => "winLossLastTen",
            StatField::GainLossLastTen => "gainLossLastTen",
            StatField::LargestGain => "largestGain",
            StatField::AverageScore => "averageScore",
            StatField::AverageLastTen => "averageLastTen",
            StatField::PartnerAvg => "partnerAvg",
            StatField::LastDiff => "lastDiff",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().find(|field| field.key() == key).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            StatField::Name => "Name",
            StatField::MaxMmr => "Peak",
            StatField::OverallRank => "Rank",
            StatField::EventsPlayed => "Events",
            StatField::WinRate => "Win Rate",
            StatField::WinLossLastTen => "W/L (10)",
            StatField::GainLossLastTen => "+/- (10)",
            StatField::LargestGain => "Lg. Gain",
            StatField::AverageScore => "Avg",
            StatField::AverageLastTen => "Avg (10)",
            StatField::PartnerAvg => "P. Avg",
            StatField::LastDiff => "Last Diff",
        }
    }

    /// Raw signed value backing the gain/loss tint, for fields that
    /// have one.
    pub fn signed_raw(self, record: &PlayerRecord) -> Option<i64> {
        match self {
            StatField::GainLossLastTen => record.gain_loss_last_ten,
            StatField::LastDiff => record.last_diff,
            _ => None,
        }
    }

    /// Display string for this field on `record`. Absent values render
    /// "N/A", except the peak rating which falls back to the current
    /// rating.
    pub fn format(self, record: &PlayerRecord) -> String {
        match self {
            StatField::Name => record.name.clone(),
            StatField::MaxMmr => match record.max_mmr.or(record.mmr) {
                Some(v) => display_number(v),
                None => NOT_AVAILABLE.to_string(),
            },
            StatField::OverallRank => match record.overall_rank {
                Some(v) => format!("#{v}"),
                None => NOT_AVAILABLE.to_string(),
            },
            StatField::EventsPlayed => match record.events_played {
                Some(v) => v.to_string(),
                None => NOT_AVAILABLE.to_string(),
            },
            StatField::WinRate => match record.win_rate {
                Some(v) => format!("{}%", trim_trailing(format!("{:.1}", v * 100.0))),
                None => NOT_AVAILABLE.to_string(),
            },
            StatField::WinLossLastTen => record
                .win_loss_last_ten
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            StatField::GainLossLastTen => match record.gain_loss_last_ten {
                Some(v) => format_signed(v),
                None => NOT_AVAILABLE.to_string(),
            },
            StatField::LargestGain => match record.largest_gain {
                Some(v) => v.to_string(),
                None => NOT_AVAILABLE.to_string(),
            },
            StatField::AverageScore => format_average(record.average_score),
            StatField::AverageLastTen => format_average(record.average_last_ten),
            StatField::PartnerAvg => format_average(record.partner_average),
            StatField::LastDiff => match record.last_diff {
                Some(v) => format_signed(v),
                None => NOT_AVAILABLE.to_string(),
            },
        }
    }
}

/// Signed integers always carry an explicit sign for non-negative
/// values.
pub(crate) fn format_signed(v: i64) -> String {
    if v >= 0 {
        format!("+{v}")
    } else {
        v.to_string()
    }
}

fn format_average(v: Option<f64>) -> String {
    match v {
        Some(v) => trim_trailing(format!("{v:.2}")),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn trim_trailing(s: String) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn display_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

/// The set of extra stats the user ticked for the overlay. Iteration
/// follows the canonical field order, never selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection {
    selected: BTreeSet<StatField>,
}

impl FieldSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: StatField) {
        self.selected.insert(field);
    }

    pub fn remove(&mut self, field: StatField) {
        self.selected.remove(&field);
    }

    pub fn contains(&self, field: StatField) -> bool {
        self.selected.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = StatField> + '_ {
        self.selected.iter().copied()
    }

    /// Fields that get a slide of their own. The last-diff field never
    /// does; it only annotates rating slides.
    pub fn cycle_fields(&self) -> impl Iterator<Item = StatField> + '_ {
        self.iter().filter(|&field| field != StatField::LastDiff)
    }

    pub fn shows_last_diff(&self) -> bool {
        self.contains(StatField::LastDiff)
    }

    /// Comma-separated keys, in canonical order.
    pub fn to_keys(&self) -> String {
        self.iter().map(StatField::key).collect::<Vec<_>>().join(",")
    }

    /// Parse a comma-separated key list, silently skipping unknown
    /// keys.
    pub fn parse_keys(keys: &str) -> Self {
        keys.split(',')
            .filter_map(|key| StatField::from_key(key.trim()))
            .collect()
    }
}

impl FromIterator<StatField> for FieldSelection {
    fn from_iter<I: IntoIterator<Item = StatField>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}
