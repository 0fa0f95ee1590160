//! Names of the identity fields every [`PlayerRecord`](crate::PlayerRecord) starts with.

pub const SEQ: &str = "seq";
pub const DATE: &str = "date";
pub const ROUND: &str = "round";
pub const MATCH_ID: &str = "match_id";
pub const REFEREE: &str = "referee";
pub const HOME_TEAM: &str = "home_team";
pub const AWAY_TEAM: &str = "away_team";
pub const PLAYER_TEAM: &str = "player_team";
pub const PLAYER: &str = "player";

/// Column order for the identity prefix of the output table.
pub const PRIORITY: [&str; 9] = [
    SEQ,
    DATE,
    ROUND,
    MATCH_ID,
    REFEREE,
    HOME_TEAM,
    AWAY_TEAM,
    PLAYER_TEAM,
    PLAYER,
];

/// Returns true if `name` is one of the identity fields.
pub fn is_priority(name: &str) -> bool {
    PRIORITY.contains(&name)
}
