use serde::Serialize;

use super::field::{format_signed, FieldSelection, StatField, NOT_AVAILABLE};
use crate::models::{GameMode, ModeSelection, PlayerRecord};

/// Gain/loss tint for signed stat values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffColor {
    GainPositive,
    GainNegative,
}

fn diff_color(v: i64) -> DiffColor {
    if v >= 0 {
        DiffColor::GainPositive
    } else {
        DiffColor::GainNegative
    }
}

/// One unit of rotating badge content: the rating for a queue, or a
/// single extra stat. Rebuilt from scratch whenever the inputs change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub value: String,
    pub extra: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<DiffColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    pub source: GameMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_diff: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_diff_color: Option<DiffColor>,
}

/// Build the ordered slide rotation for the current inputs. Pure:
/// identical inputs produce identical output.
///
/// Each active queue contributes its rating slide followed by one slide
/// per selected field, in canonical field order; under "both" the 24p
/// group precedes the 12p group and the name slide only appears in the
/// first group. A queue whose record has not resolved still gets its
/// group, rendered as "N/A", so one slow lookup never hides the other.
pub fn compose(
    primary: Option<&PlayerRecord>,
    secondary: Option<&PlayerRecord>,
    selection: ModeSelection,
    fields: &FieldSelection,
) -> Vec<Slide> {
    let mut slides = Vec::new();
    match selection {
        ModeSelection::Single(mode) => {
            let Some(record) = primary else {
                return slides;
            };
            build_group(&mut slides, Some(record), mode, fields, true);
        }
        ModeSelection::Both => {
            if primary.is_none() && secondary.is_none() {
                return slides;
            }
            build_group(&mut slides, primary, GameMode::TwentyFour, fields, true);
            build_group(&mut slides, secondary, GameMode::Twelve, fields, false);
        }
    }
    slides
}

fn build_group(
    out: &mut Vec<Slide>,
    record: Option<&PlayerRecord>,
    source: GameMode,
    fields: &FieldSelection,
    include_name: bool,
) {
    let rank_icon_url = record.and_then(|r| r.rank_icon_url.clone());
    let mmr_value = match record.and_then(|r| r.mmr) {
        Some(mmr) => (mmr.round() as i64).to_string(),
        None => NOT_AVAILABLE.to_string(),
    };
    let diff = if fields.shows_last_diff() {
        record.and_then(|r| r.last_diff)
    } else {
        None
    };

    out.push(Slide {
        key: format!("mmr-{}", source.tag()),
        label: None,
        value: mmr_value,
        extra: false,
        color: None,
        country_code: None,
        source,
        rank_icon_url: rank_icon_url.clone(),
        last_diff: diff.map(format_signed),
        last_diff_color: diff.map(diff_color),
    });

    for field in fields.cycle_fields() {
        // The name is only meaningful once; under "both" it stays with
        // the first group.
        if field == StatField::Name && !include_name {
            continue;
        }

        let value = match record {
            Some(record) => field.format(record),
            None => NOT_AVAILABLE.to_string(),
        };
        let color = record
            .and_then(|r| field.signed_raw(r))
            .map(diff_color);
        let country_code = if field == StatField::Name {
            record.and_then(|r| r.country_code.clone())
        } else {
            None
        };

        out.push(Slide {
            key: format!("{}-{}", field.key(), source.tag()),
            label: (field != StatField::Name).then(|| field.label()),
            value,
            extra: true,
            color,
            country_code,
            source,
            rank_icon_url: rank_icon_url.clone(),
            last_diff: None,
            last_diff_color: None,
        });
    }
}
