use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::user::models::{Rank, UserModel};

/// Which cumulative total a leaderboard is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    Trazos,
    Words,
}

impl RankingMetric {
    pub fn value(&self, user: &UserModel) -> i64 {
        match self {
            RankingMetric::Trazos => user.total_trazos,
            RankingMetric::Words => user.total_words,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            RankingMetric::Trazos => "total_trazos",
            RankingMetric::Words => "total_words",
        }
    }
}

/// Sorts users by `metric` descending, earlier registrations first on ties, and keeps
/// at most `limit` of them. Repeated ids collapse to the last record given.
pub fn order_users<I>(users: I, metric: RankingMetric, limit: usize) -> Vec<UserModel>
where
    I: IntoIterator<Item = UserModel>,
{
    let by_id: BTreeMap<i32, UserModel> = users.into_iter().map(|user| (user.id, user)).collect();
    let mut users: Vec<UserModel> = by_id.into_values().collect();
    users.sort_by(|a, b| {
        metric
            .value(b)
            .cmp(&metric.value(a))
            .then_with(|| a.id.cmp(&b.id))
    });
    users.truncate(limit);
    users
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    /// 1-based
    pub position: usize,
    pub user_id: i32,
    pub signature: String,
    pub full_name: String,
    pub rank: Rank,
    pub total_trazos: i64,
    pub total_words: i64,
    pub total_activities: i64,
}

/// A finished leaderboard snapshot. Iterating does not consume it.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    metric: RankingMetric,
    entries: Vec<RankingEntry>,
}

impl Leaderboard {
    /// `users` must already be in leaderboard order
    pub fn from_ordered(metric: RankingMetric, users: Vec<UserModel>) -> Self {
        let entries = users
            .into_iter()
            .enumerate()
            .map(|(index, user)| RankingEntry {
                position: index + 1,
                user_id: user.id,
                signature: user.signature,
                full_name: user.full_name,
                rank: user.rank,
                total_trazos: user.total_trazos,
                total_words: user.total_words,
                total_activities: user.total_activities,
            })
            .collect();

        Self { metric, entries }
    }

    pub fn metric(&self) -> RankingMetric {
        self.metric
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankingEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<RankingEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::sample_new_user;
    use chrono::Utc;

    fn user(id: i32, trazos: i64, words: i64) -> UserModel {
        let mut user = UserModel::from_new(id, sample_new_user(&format!("#u{}", id)), Utc::now());
        user.total_trazos = trazos;
        user.total_words = words;
        user
    }

    #[test]
    fn test_orders_descending_with_id_tie_break() {
        let users = vec![user(3, 400, 10), user(1, 400, 20), user(2, 900, 5), user(4, 0, 0)];

        let ids: Vec<i32> = order_users(users, RankingMetric::Trazos, 10)
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_orders_by_words() {
        let users = vec![user(1, 900, 10), user(2, 100, 30), user(3, 500, 20)];

        let ids: Vec<i32> = order_users(users, RankingMetric::Words, 10)
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_limit_caps_the_result() {
        let users = (1..=30).map(|id| user(id, id as i64 * 10, 0));
        let ordered = order_users(users, RankingMetric::Trazos, 20);
        assert_eq!(ordered.len(), 20);
        assert_eq!(ordered[0].id, 30);
    }

    #[test]
    fn test_a_user_never_appears_twice() {
        let users = vec![user(1, 300, 0), user(1, 300, 0), user(2, 100, 0)];
        let ordered = order_users(users, RankingMetric::Trazos, 10);
        assert_eq!(ordered.len(), 2);
    }

    #[test]
    fn test_duplicates_with_different_totals_collapse() {
        let users = vec![user(1, 300, 0), user(2, 200, 0), user(1, 100, 0)];

        let ordered = order_users(users, RankingMetric::Trazos, 10);
        let ids: Vec<i32> = ordered.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(ordered[1].total_trazos, 100);
    }

    #[test]
    fn test_leaderboard_positions_and_restartable_iteration() {
        let ordered = order_users(
            vec![user(1, 100, 0), user(2, 300, 0)],
            RankingMetric::Trazos,
            20,
        );
        let leaderboard = Leaderboard::from_ordered(RankingMetric::Trazos, ordered);

        let first_pass: Vec<(usize, i32)> =
            leaderboard.iter().map(|e| (e.position, e.user_id)).collect();
        let second_pass: Vec<(usize, i32)> =
            leaderboard.iter().map(|e| (e.position, e.user_id)).collect();

        assert_eq!(first_pass, vec![(1, 2), (2, 1)]);
        assert_eq!(first_pass, second_pass);
        assert_eq!(leaderboard.metric(), RankingMetric::Trazos);
    }
}
