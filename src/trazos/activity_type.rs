use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};
use tracing::warn;

/// The closed set of activity categories a member can submit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityType {
    Narrativa,
    Microcuento,
    Drabble,
    Hilo,
    Rol,
    Encuesta,
    Collage,
    Poemas,
    Pinturas,
    Interpretacion,
    Otro,
}

impl ActivityType {
    /// Parses a free-form category label.
    ///
    /// Unknown labels are not an error: they are scored as `Otro`. A warning is
    /// traced so that misspelled categories show up in the logs.
    pub fn from_label(label: &str) -> Self {
        match Self::from_str(label.trim()) {
            Ok(activity_type) => activity_type,
            Err(_) => {
                warn!(label = %label, "Unrecognized activity type, scoring as otro");
                ActivityType::Otro
            }
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_label_round_trip_for_every_category() {
        for activity_type in ActivityType::iter() {
            let label = activity_type.to_string();
            assert_eq!(ActivityType::from_label(&label), activity_type);
        }
    }

    #[test]
    fn test_unknown_label_falls_back_to_otro() {
        assert_eq!(ActivityType::from_label("novela"), ActivityType::Otro);
        assert_eq!(ActivityType::from_label(""), ActivityType::Otro);
        // Labels are case sensitive, like the stored enum values
        assert_eq!(ActivityType::from_label("Narrativa"), ActivityType::Otro);
    }

    #[test]
    fn test_label_is_trimmed() {
        assert_eq!(ActivityType::from_label("  rol "), ActivityType::Rol);
    }

    #[test]
    fn test_serde_uses_snake_case_labels() {
        let json = serde_json::to_string(&ActivityType::Interpretacion).unwrap();
        assert_eq!(json, "\"interpretacion\"");

        let parsed: ActivityType = serde_json::from_str("\"microcuento\"").unwrap();
        assert_eq!(parsed, ActivityType::Microcuento);

        assert!(serde_json::from_str::<ActivityType>("\"novela\"").is_err());
    }

    #[test]
    fn test_eleven_categories() {
        assert_eq!(ActivityType::iter().count(), 11);
    }
}
