use super::*;

fn meta() -> MatchMetadata {
    MatchMetadata {
        match_id: "abc123".into(),
        referee: "J. Smith".into(),
        home_team: "Real Madrid CF".into(),
        away_team: "FC Barcelona".into(),
        date: "15 Aug 2025".into(),
        round: "1".into(),
    }
}

#[test]
fn identity_prefix_is_in_priority_order() {
    let record = PlayerRecord::with_identity(7, &meta(), Side::Away, "Pedri");
    let keys: Vec<&str> = record.keys().collect();
    assert_eq!(keys, fields::PRIORITY.to_vec());
    assert_eq!(record.get(fields::SEQ), Some("7"));
    assert_eq!(record.get(fields::PLAYER_TEAM), Some("FC Barcelona"));
    assert_eq!(record.get(fields::PLAYER), Some("Pedri"));
    assert_eq!(record.sequence_number(), Some(7));
}

#[test]
fn set_overwrites_in_place() {
    let mut record = PlayerRecord::new();
    record.set("a", "1");
    record.set("b", "2");
    record.set("a", "3");
    let pairs: Vec<(&str, &str)> = record.iter().collect();
    assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
}

#[test]
fn push_unique_suffixes_duplicates() {
    let mut record = PlayerRecord::with_identity(1, &meta(), Side::Home, "Vinicius");
    assert_eq!(record.push_unique("Goals", "1"), "Goals");
    assert_eq!(record.push_unique("Goals", "0"), "Goals_2");
    assert_eq!(record.push_unique("Goals", "4"), "Goals_3");
    assert_eq!(record.push_unique("player", "x"), "player_2");
    assert_eq!(record.get("Goals_2"), Some("0"));
    assert_eq!(record.get("player"), Some("Vinicius"));
}

#[test]
fn from_iterator_builds_record() {
    let record: PlayerRecord = [("a", "1"), ("c", "4")].into_iter().collect();
    assert_eq!(record.len(), 2);
    assert!(record.contains("c"));
    assert!(!record.contains("b"));
    assert_eq!(record.sequence_number(), None);
}
