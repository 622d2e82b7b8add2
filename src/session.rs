use url::form_urlencoded;

use crate::models::{GameMode, ModeSelection};
use crate::overlay::field::FieldSelection;

/// Externally visible overlay state: everything a browser-source URL
/// carries, and everything needed to reconstruct the badge from one.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySession {
    pub name: String,
    pub mode: ModeSelection,
    pub fields: FieldSelection,
}

impl OverlaySession {
    pub fn new(name: impl Into<String>, mode: ModeSelection, fields: FieldSelection) -> Self {
        Self {
            name: name.into(),
            mode,
            fields,
        }
    }

    /// Encode as a browser-source query string
    /// (`name=...&game=...&fields=a,b`). The default queue and an empty
    /// field set are omitted, matching the URLs the picker hands out.
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("name", &self.name);
        if self.mode != ModeSelection::Single(GameMode::DEFAULT) {
            query.append_pair("game", self.mode.tag());
        }
        if !self.fields.is_empty() {
            query.append_pair("fields", &self.fields.to_keys());
        }
        query.finish()
    }

    /// Rebuild a session from a query string. Needs at least a
    /// non-blank player name; unknown game tags fall back to the
    /// default queue and unknown field keys are dropped.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut name = None;
        let mut mode = ModeSelection::Single(GameMode::DEFAULT);
        let mut fields = FieldSelection::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "name" => name = Some(value.into_owned()),
                "game" => {
                    if let Some(parsed) = ModeSelection::from_tag(&value) {
                        mode = parsed;
                    }
                }
                "fields" => fields = FieldSelection::parse_keys(&value),
                _ => {}
            }
        }

        let name = name?;
        if name.trim().is_empty() {
            return None;
        }
        Some(Self { name, mode, fields })
    }
}
