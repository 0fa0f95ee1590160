use super::*;

fn sel(s: &str) -> Selector {
    Selector::parse(s).unwrap()
}

fn labels() -> Vec<String> {
    vec!["Referee".to_string(), "Árbitro".to_string()]
}

fn tokens() -> Vec<String> {
    ["cf", "fc", "club", "madrid", "barcelona", "athletic"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn exclude() -> Vec<String> {
    vec!["Opta".to_string()]
}

#[test]
fn referee_from_definition_list() {
    let doc = Html::parse_document(
        "<dl><dt>Venue</dt><dd>Metropolitano</dd><dt>Referee</dt><dd> J. Smith </dd></dl>",
    );
    assert_eq!(
        referee_from_labels(&doc, &sel("dt"), &labels()).as_deref(),
        Some("J. Smith")
    );
}

#[test]
fn referee_label_is_case_insensitive_and_localized() {
    let doc = Html::parse_document("<dl><dt>ÁRBITRO:</dt><dd>Mateu Lahoz</dd></dl>");
    assert_eq!(
        referee_from_labels(&doc, &sel("dt"), &labels()).as_deref(),
        Some("Mateu Lahoz")
    );
}

#[test]
fn missing_referee_label_gives_none() {
    let doc = Html::parse_document("<dl><dt>Venue</dt><dd>Mestalla</dd></dl>");
    assert_eq!(referee_from_labels(&doc, &sel("dt"), &labels()), None);
}

#[test]
fn label_without_value_gives_none() {
    let doc = Html::parse_document("<dl><dt>Referee</dt></dl>");
    assert_eq!(referee_from_labels(&doc, &sel("dt"), &labels()), None);
}

#[test]
fn referee_from_inline_text() {
    let doc = Html::parse_document("<div class='officials'>Referee: José Sánchez</div>");
    let pattern = inline_label_pattern(&labels()).unwrap();
    assert_eq!(
        referee_from_text(&doc, &pattern).as_deref(),
        Some("José Sánchez")
    );
}

#[test]
fn team_names_from_class() {
    let doc = Html::parse_document(
        "<div><span class='team-name'>Sevilla</span><span class='team-name'>Getafe</span></div>",
    );
    let names = team_names(&doc, &sel(".team-name"), &sel("img[alt]"), &tokens(), &exclude());
    assert_eq!(names, vec!["Sevilla", "Getafe"]);
}

#[test]
fn team_names_fall_back_to_filtered_alt_text() {
    let doc = Html::parse_document(
        r#"<div>
            <img alt="Opta logo FC">
            <img alt="LaLiga">
            <img alt="Real Madrid CF">
            <img alt="Real Madrid CF">
            <img alt="FC">
            <img alt="Athletic Club">
            <img alt="Villarreal CF">
        </div>"#,
    );
    let names = team_names(&doc, &sel(".team-name"), &sel("img[alt]"), &tokens(), &exclude());
    assert_eq!(names, vec!["Real Madrid CF", "Athletic Club"]);
}

#[test]
fn single_class_name_is_completed_from_alt_text() {
    let doc = Html::parse_document(
        r#"<span class="team-name">Girona FC</span><img alt="Girona FC"><img alt="RC Celta Club">"#,
    );
    let names = team_names(&doc, &sel(".team-name"), &sel("img[alt]"), &tokens(), &exclude());
    assert_eq!(names, vec!["Girona FC", "RC Celta Club"]);
}

#[test]
fn no_team_names_found() {
    let doc = Html::parse_document("<p>nothing here</p>");
    assert!(team_names(&doc, &sel(".team-name"), &sel("img[alt]"), &tokens(), &exclude()).is_empty());
}
