use serde::{Deserialize, Serialize};

use crate::activity::models::ActivityModel;

/// Cumulative totals over one member's activity set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_trazos: i64,
    pub total_words: i64,
    pub total_activities: i64,
}

impl UserStats {
    pub fn from_activities<'a, I>(activities: I) -> Self
    where
        I: IntoIterator<Item = &'a ActivityModel>,
    {
        activities
            .into_iter()
            .fold(UserStats::default(), |mut stats, activity| {
                stats.total_trazos += i64::from(activity.trazos);
                stats.total_words += i64::from(activity.words);
                stats.total_activities += 1;
                stats
            })
    }
}
