//! Ordered, heterogeneous player rows.

use crate::fields;
use crate::model::{MatchMetadata, Side};

/// A single player's row: identity fields first, then whatever statistic
/// columns that page's table happened to expose.
///
/// Field names are unique within a record and keep insertion order. Records
/// from different pages may carry different statistic sets; reconciling them
/// is the writer's job, not the record's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    fields: Vec<(String, String)>,
}

impl PlayerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a record with the identity prefix filled from the page metadata.
    pub fn with_identity(
        sequence_number: usize,
        meta: &MatchMetadata,
        side: Side,
        player: impl Into<String>,
    ) -> Self {
        let mut record = Self {
            fields: Vec::with_capacity(fields::PRIORITY.len() + 16),
        };
        record.set(fields::SEQ, sequence_number.to_string());
        record.set(fields::DATE, meta.date.clone());
        record.set(fields::ROUND, meta.round.clone());
        record.set(fields::MATCH_ID, meta.match_id.clone());
        record.set(fields::REFEREE, meta.referee.clone());
        record.set(fields::HOME_TEAM, meta.home_team.clone());
        record.set(fields::AWAY_TEAM, meta.away_team.clone());
        record.set(fields::PLAYER_TEAM, meta.team(side).to_string());
        record.set(fields::PLAYER, player.into());
        record
    }

    /// Insert or overwrite a field. Overwriting keeps the original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Insert a field without clobbering an existing one.
    ///
    /// If `name` is taken, `name_2`, `name_3`, ... is tried instead. Returns
    /// the name actually used.
    pub fn push_unique(&mut self, name: &str, value: impl Into<String>) -> String {
        let mut candidate = name.to_string();
        let mut n = 2;
        while self.contains(&candidate) {
            candidate = format!("{name}_{n}");
            n += 1;
        }
        self.fields.push((candidate.clone(), value.into()));
        candidate
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == name)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The originating sequence number, if the identity prefix is present.
    pub fn sequence_number(&self) -> Option<usize> {
        self.get(fields::SEQ).and_then(|s| s.parse().ok())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlayerRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
