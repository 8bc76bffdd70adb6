use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::albums::Arista;
use crate::trazos::ActivityType;

/// POST /api/activities body. Unknown `type` or `arista` labels fail to deserialize.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub name: String,
    pub date: NaiveDate,
    pub words: i64,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub responses: Option<i64>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub arista: Arista,
    pub album: String,
}

/// POST /api/calculate-trazos body. `type` is a free label; unknown labels score as "otro".
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateTrazosRequest {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub words: i64,
    pub responses: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalculateTrazosResponse {
    pub trazos: u32,
}

#[derive(Debug, Deserialize)]
pub struct ActivityListQuery {
    pub limit: Option<usize>,
}
