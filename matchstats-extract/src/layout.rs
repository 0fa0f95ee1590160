//! Markup conventions of the match pages.
//!
//! Defaults follow the Opta player-stats widgets. Every field can be
//! overridden from the `[layout]` table of the settings file.

use serde::{Deserialize, Serialize};

/// CSS selectors and word lists describing where things live on a match page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Element present on every rendered match page
    pub match_header: String,
    /// Elements whose text is a team name, in home/away order
    pub team_name: String,
    /// Body cell holding the player name; its presence makes a table a candidate
    pub player_cell: String,
    /// Body cells holding statistic values
    pub stat_cell: String,
    /// Label element of a label/value pair (value is the next `dd` sibling)
    pub label: String,
    /// Label texts that introduce the referee
    pub referee_labels: Vec<String>,
    /// Lowercase fragments that mark an image alt text as a club name
    pub club_tokens: Vec<String>,
    /// Alt texts containing any of these are never team names
    pub alt_exclude: Vec<String>,
    /// Player-cell texts (case-insensitive) of aggregate rows to skip
    pub aggregate_rows: Vec<String>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            match_header: ".Opta-MatchHeader, .match-header".to_string(),
            team_name: ".Opta-TeamName, .team-name, .match-team-name".to_string(),
            player_cell: "th.Opta-Player".to_string(),
            stat_cell: "td.Opta-Stat".to_string(),
            label: "dt".to_string(),
            referee_labels: strings(&["Referee", "Árbitro", "Arbitro"]),
            club_tokens: strings(&[
                "cf",
                "fc",
                "club",
                "madrid",
                "barcelona",
                "athletic",
                "atlético",
                "real",
                "sevilla",
                "valencia",
                "villarreal",
                "betis",
                "celta",
                "osasuna",
                "getafe",
                "girona",
                "mallorca",
                "alavés",
                "espanyol",
                "levante",
                "elche",
                "oviedo",
                "rayo",
            ]),
            alt_exclude: strings(&["Opta"]),
            aggregate_rows: strings(&["total", "team total", "equipo"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
