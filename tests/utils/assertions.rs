use serde_json::Value;

/// Fluent checks over a leaderboard response body
pub struct LeaderboardAssertion<'a> {
    entries: &'a [Value],
    field: &'static str,
}

impl<'a> LeaderboardAssertion<'a> {
    pub fn by_trazos(body: &'a Value) -> Self {
        Self::new(body, "totalTrazos")
    }

    pub fn by_words(body: &'a Value) -> Self {
        Self::new(body, "totalWords")
    }

    fn new(body: &'a Value, field: &'static str) -> Self {
        let entries = body.as_array().expect("leaderboard is a JSON array");
        Self { entries, field }
    }

    pub fn has_len(self, len: usize) -> Self {
        assert_eq!(self.entries.len(), len, "leaderboard length");
        self
    }

    pub fn is_non_increasing(self) -> Self {
        let values: Vec<i64> = self
            .entries
            .iter()
            .map(|e| e[self.field].as_i64().unwrap())
            .collect();
        assert!(
            values.windows(2).all(|pair| pair[0] >= pair[1]),
            "{} not ordered: {:?}",
            self.field,
            values
        );
        self
    }

    pub fn has_no_duplicates(self) -> Self {
        let mut ids: Vec<i64> = self
            .entries
            .iter()
            .map(|e| e["userId"].as_i64().unwrap())
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total, "a member appears twice");
        self
    }

    pub fn user_order(self, expected: &[i64]) -> Self {
        let ids: Vec<i64> = self
            .entries
            .iter()
            .map(|e| e["userId"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, expected);
        self
    }
}
