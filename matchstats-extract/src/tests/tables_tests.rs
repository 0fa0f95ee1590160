use super::*;

fn table(players: &[&str]) -> CandidateTable {
    CandidateTable {
        headers: vec!["Player".to_string(), "Goals".to_string()],
        rows: players
            .iter()
            .map(|p| BodyRow {
                player: p.to_string(),
                stats: vec!["0".to_string()],
            })
            .collect(),
    }
}

fn selectors() -> TableSelectors {
    let s = |x: &str| Selector::parse(x).unwrap();
    TableSelectors {
        table: s("table"),
        header_row: s("thead tr"),
        header_cell: s("th"),
        header_abbr: s("abbr[title]"),
        body_row: s("tbody tr"),
        player_cell: s("th.Opta-Player"),
        stat_cell: s("td.Opta-Stat"),
        any_cell: s("td"),
    }
}

#[test]
fn no_candidates_no_tables() {
    assert!(disambiguate(Vec::new()).is_empty());
}

#[test]
fn single_candidate_is_home() {
    let finals = disambiguate(vec![table(&["Courtois"])]);
    assert_eq!(finals.len(), 1);
    assert_eq!(finals[0].side, Side::Home);
}

#[test]
fn disjoint_first_players_give_home_and_away_in_order() {
    let finals = disambiguate(vec![table(&["Courtois", "Carvajal"]), table(&["Ter Stegen", "Koundé"])]);
    assert_eq!(finals.len(), 2);
    assert_eq!(finals[0].side, Side::Home);
    assert_eq!(finals[0].table.first_player(), Some("Courtois"));
    assert_eq!(finals[1].side, Side::Away);
    assert_eq!(finals[1].table.first_player(), Some("Ter Stegen"));
}

#[test]
fn coinciding_first_player_is_dropped_as_duplicate() {
    let finals = disambiguate(vec![table(&["Courtois", "Carvajal"]), table(&["Courtois", "Rüdiger"])]);
    assert_eq!(finals.len(), 1);
    assert_eq!(finals[0].side, Side::Home);
}

#[test]
fn summary_and_detail_views_collapse_to_two_tables() {
    // home summary, home detail, away summary, away detail
    let finals = disambiguate(vec![
        table(&["Courtois", "Carvajal"]),
        table(&["Carvajal", "Courtois"]),
        table(&["Ter Stegen", "Koundé"]),
        table(&["Ter Stegen", "Koundé"]),
    ]);
    assert_eq!(finals.len(), 2);
    assert_eq!(finals[1].side, Side::Away);
    assert_eq!(finals[1].table.first_player(), Some("Ter Stegen"));
}

#[test]
fn only_first_row_is_compared() {
    // Second row overlaps with home but the first does not: accepted as away.
    let finals = disambiguate(vec![table(&["Courtois", "Modrić"]), table(&["Oblak", "Modrić"])]);
    assert_eq!(finals.len(), 2);
}

#[test]
fn stat_names_are_offset_by_player_column() {
    let t = CandidateTable {
        headers: vec!["Player".into(), "Goals".into(), "".into()],
        rows: Vec::new(),
    };
    assert_eq!(t.stat_name(0), "Goals");
    assert_eq!(t.stat_name(1), "stat_1");
    assert_eq!(t.stat_name(5), "stat_5");
}

#[test]
fn reads_headers_rows_and_sort_values() {
    let doc = Html::parse_document(
        r#"<table>
            <thead><tr>
                <th>Player</th>
                <th><abbr title="Minutes Played">Mins</abbr></th>
                <th title="Pass Accuracy">Pass%</th>
                <th>Shots</th>
            </tr></thead>
            <tbody>
                <tr><th class="Opta-Player"> Pedri </th>
                    <td class="Opta-Stat" data-srt="90">90'</td>
                    <td class="Opta-Stat">92%</td>
                    <td class="Opta-Stat">1/3</td></tr>
                <tr><td>spacer row</td></tr>
            </tbody>
        </table>"#,
    );
    let tables = candidate_tables(&doc, &selectors());
    assert_eq!(tables.len(), 1);
    let t = &tables[0];
    assert_eq!(t.headers, vec!["Player", "Minutes Played", "Pass Accuracy", "Shots"]);
    assert_eq!(t.rows.len(), 1);
    assert_eq!(t.rows[0].player, "Pedri");
    assert_eq!(t.rows[0].stats, vec!["90", "92%", "1/3"]);
}

#[test]
fn tables_without_player_rows_are_not_candidates() {
    let doc = Html::parse_document(
        "<table><thead><tr><th>Team</th><th>Pts</th></tr></thead>\
         <tbody><tr><td>Girona</td><td>3</td></tr></tbody></table>",
    );
    assert!(candidate_tables(&doc, &selectors()).is_empty());
}

#[test]
fn rows_without_stat_class_fall_back_to_plain_cells() {
    let doc = Html::parse_document(
        "<table><tbody><tr><th class='Opta-Player'>Isco</th><td>1</td><td>2</td></tr></tbody></table>",
    );
    let tables = candidate_tables(&doc, &selectors());
    assert!(tables[0].headers.is_empty());
    assert_eq!(tables[0].rows[0].stats, vec!["1", "2"]);
}
