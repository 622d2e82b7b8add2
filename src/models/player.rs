use serde::{Deserialize, Serialize};

/// One player's lounge stats for a single queue, as returned by
/// `/api/player/details`. An absent optional field means the lounge has
/// no data for it, not zero. Records are never mutated; a fresh lookup
/// produces a fresh record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country_code: Option<String>,
    pub mmr: Option<f64>,
    #[serde(default)]
    pub max_mmr: Option<f64>,
    pub rank: String,
    #[serde(default)]
    pub rank_icon_url: Option<String>,
    #[serde(default)]
    pub overall_rank: Option<u32>,
    #[serde(default)]
    pub events_played: Option<u32>,
    #[serde(default)]
    pub win_rate: Option<f64>,
    #[serde(default)]
    pub win_loss_last_ten: Option<String>,
    #[serde(default)]
    pub gain_loss_last_ten: Option<i64>,
    #[serde(default)]
    pub largest_gain: Option<i64>,
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub average_last_ten: Option<f64>,
    #[serde(default, rename = "partnerAvg")]
    pub partner_average: Option<f64>,
    #[serde(default)]
    pub last_diff: Option<i64>,
}
