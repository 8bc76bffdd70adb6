use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::albums::Arista;
use crate::trazos::ActivityType;

/// A submitted activity. `trazos` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityModel {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub date: NaiveDate,
    pub words: u32,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub responses: u32,
    pub link: Option<String>,
    pub description: Option<String>,
    pub arista: Arista,
    pub album: String,
    pub trazos: u32,
    pub created_at: DateTime<Utc>,
}

impl ActivityModel {
    pub fn from_new(id: i32, new_activity: NewActivity, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new_activity.user_id,
            name: new_activity.name,
            date: new_activity.date,
            words: new_activity.words,
            activity_type: new_activity.activity_type,
            responses: new_activity.responses,
            link: new_activity.link,
            description: new_activity.description,
            arista: new_activity.arista,
            album: new_activity.album,
            trazos: new_activity.trazos,
            created_at,
        }
    }
}

/// Validated and scored activity ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub user_id: i32,
    pub name: String,
    pub date: NaiveDate,
    pub words: u32,
    pub activity_type: ActivityType,
    pub responses: u32,
    pub link: Option<String>,
    pub description: Option<String>,
    pub arista: Arista,
    pub album: String,
    pub trazos: u32,
}

#[cfg(test)]
impl NewActivity {
    pub fn sample(user_id: i32) -> Self {
        Self {
            user_id,
            name: "Bitácora de lluvia".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
            words: 0,
            activity_type: ActivityType::Microcuento,
            responses: 0,
            link: None,
            description: None,
            arista: Arista::EcosDelCorazon,
            album: "Cicatrices invisibles".to_string(),
            trazos: 100,
        }
    }
}
