use dues::model::*;
use dues::queries::roster_queries::{self, RosterView, PAGE_SIZE};
use dues::queries::stats_queries;

fn person(name: &str, whatsapp: &str, weeks: [bool; WEEK_COUNT]) -> Participant {
    let mut p = Participant::create(name.into(), whatsapp.into());
    p.weeks = weeks;
    p
}

fn sample_roster() -> Vec<Participant> {
    let names = ["Ana", "Bia", "ANDRE", "Carla", "", "Mariana", "bianca", ""];
    let phones = ["11911112222", "", "21999998888", "99", "5511", "", "", ""];
    names
        .iter()
        .zip(phones.iter())
        .map(|(n, w)| person(n, w, [false; WEEK_COUNT]))
        .collect()
}

fn numbered(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| person(&format!("Row {}", i), "", [false; WEEK_COUNT]))
        .collect()
}

// ==========================================================================
// FILTER
// ==========================================================================

#[test]
fn empty_term_returns_everything_in_order() {
    let roster = sample_roster();
    let result = roster_queries::filter(&roster, "");
    assert_eq!(result.len(), roster.len());
    for (a, b) in result.iter().zip(&roster) {
        assert_eq!(a.id, b.id);
    }
}

#[test]
fn filter_matches_exactly_the_expected_participants() {
    let roster = sample_roster();
    for term in ["an", "AN", "bi", "99", "55", "x", "Carla", "1"] {
        let lower = term.to_lowercase();
        let expected: Vec<&ParticipantId> = roster
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&lower) || p.whatsapp.contains(term))
            .map(|p| &p.id)
            .collect();
        let actual: Vec<&ParticipantId> = roster_queries::filter(&roster, term)
            .into_iter()
            .map(|p| &p.id)
            .collect();
        assert_eq!(actual, expected, "term {:?}", term);
    }
}

#[test]
fn name_match_ignores_case() {
    let roster = sample_roster();
    let names: Vec<&str> = roster_queries::filter(&roster, "an")
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Ana", "ANDRE", "Mariana", "bianca"]);
}

#[test]
fn whatsapp_match_is_case_sensitive() {
    let roster = vec![
        person("", "abc-Contact", [false; WEEK_COUNT]),
        person("", "abc-contact", [false; WEEK_COUNT]),
    ];
    let result = roster_queries::filter(&roster, "Contact");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].whatsapp, "abc-Contact");
}

#[test]
fn search_99_finds_the_single_phone_match() {
    let roster = vec![
        person("Ana", "11911112222", [false; WEEK_COUNT]),
        person("Bia", "11999998888", [false; WEEK_COUNT]),
        person("Carla", "", [false; WEEK_COUNT]),
    ];
    let result = roster_queries::filter(&roster, "99");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Bia");
}

// ==========================================================================
// PAGINATION
// ==========================================================================

#[test]
fn pages_concatenate_to_the_filtered_sequence() {
    for n in [0usize, 1, 19, 20, 21, 40, 41, 57] {
        let roster = numbered(n);
        let filtered = roster_queries::filter(&roster, "");
        let pages = roster_queries::page_count(filtered.len());
        assert_eq!(pages, std::cmp::max(1, n.div_ceil(PAGE_SIZE)));

        let mut joined = Vec::new();
        for p in 1..=pages {
            let chunk = roster_queries::page(&filtered, p);
            assert!(chunk.len() <= PAGE_SIZE);
            joined.extend(chunk);
        }
        let joined_ids: Vec<&ParticipantId> = joined.iter().map(|p| &p.id).collect();
        let filtered_ids: Vec<&ParticipantId> = filtered.iter().map(|p| &p.id).collect();
        assert_eq!(joined_ids, filtered_ids, "n = {}", n);
    }
}

#[test]
fn page_past_the_end_is_empty() {
    let roster = numbered(5);
    let filtered = roster_queries::filter(&roster, "");
    assert!(roster_queries::page(&filtered, 2).is_empty());
}

#[test]
fn adding_jumps_to_last_page() {
    let mut roster = Roster::seeded();
    let mut view = RosterView::default();
    assert_eq!(view.current_page(), 1);

    dues::ops::participant_ops::add_participant(&mut roster);
    view.jump_to_last(roster.participants());

    // 51 rows -> 3 pages, rows 41..=51 on the last one
    assert_eq!(view.current_page(), 3);
    let page = view.render(roster.participants());
    assert_eq!(page.rows.len(), 11);
    let (row, newest) = page.rows.last().unwrap();
    assert_eq!(*row, 51);
    assert_eq!(newest.id, roster.participants()[50].id);
}

#[test]
fn adding_during_search_shows_the_new_row() {
    let rows: Vec<Participant> = (0..30)
        .map(|i| person(&format!("Ana{}", i), "", [false; WEEK_COUNT]))
        .collect();
    let mut roster = Roster::new(rows);
    let mut view = RosterView::default();
    view.set_search("Ana");

    let id = dues::ops::participant_ops::add_participant(&mut roster);
    view.jump_to_last(roster.participants());

    assert_eq!(view.search(), "");
    let page = view.render(roster.participants());
    assert_eq!(page.page, 2);
    assert!(page.rows.iter().any(|(_, p)| p.id == id));
}

#[test]
fn adding_a_matching_row_keeps_the_search() {
    let rows: Vec<Participant> = (0..30)
        .map(|i| person(&format!("Ana{}", i), "", [false; WEEK_COUNT]))
        .collect();
    let mut roster = Roster::new(rows);
    let id = dues::ops::participant_ops::add_participant(&mut roster);
    dues::ops::participant_ops::update_field(&mut roster, &id, ParticipantField::Name, "Anabel");

    let mut view = RosterView::default();
    view.set_search("ana");
    view.jump_to_last(roster.participants());

    assert_eq!(view.search(), "ana");
    let page = view.render(roster.participants());
    let (row, newest) = page.rows.last().unwrap();
    assert_eq!(*row, 31);
    assert_eq!(newest.name, "Anabel");
}

#[test]
fn empty_filter_result_still_has_one_page() {
    let roster = numbered(30);
    let mut view = RosterView::default();
    view.set_search("nobody");
    let page = view.render(&roster);
    assert_eq!(page.page_count, 1);
    assert_eq!(page.page, 1);
    assert!(page.rows.is_empty());
}

#[test]
fn render_is_deterministic() {
    let roster = numbered(45);
    let mut view = RosterView::default();
    view.set_search("Row 1");
    let first: Vec<usize> = view.render(&roster).rows.iter().map(|(n, _)| *n).collect();
    let second: Vec<usize> = view.render(&roster).rows.iter().map(|(n, _)| *n).collect();
    assert_eq!(first, second);
}

// ==========================================================================
// STATS
// ==========================================================================

#[test]
fn stats_scenario_two_active_sixty_percent() {
    let roster = vec![
        person("Ana", "", [true; WEEK_COUNT]),
        person("Bia", "", [true, false, false, false, false]),
        person("", "", [false; WEEK_COUNT]),
    ];
    let stats = stats_queries::roster_stats(&roster);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.paid_slots, 6);
    assert_eq!(stats.paid_percent, 60);
}

#[test]
fn stats_ignore_inactive_weeks() {
    let roster = vec![
        person("", "", [true; WEEK_COUNT]),
        person(" ", "", [true; WEEK_COUNT]),
    ];
    let stats = stats_queries::roster_stats(&roster);
    assert_eq!(stats.active, 0);
    assert_eq!(stats.paid_percent, 0);
}

#[test]
fn stats_percent_stays_within_bounds() {
    let patterns: [[bool; WEEK_COUNT]; 4] = [
        [false; WEEK_COUNT],
        [true; WEEK_COUNT],
        [true, false, true, false, true],
        [false, false, false, false, true],
    ];
    for size in 1..12 {
        let roster: Vec<Participant> = (0..size)
            .map(|i| person(&format!("P{}", i), "", patterns[i % patterns.len()]))
            .collect();
        let stats = stats_queries::roster_stats(&roster);
        assert!(stats.paid_percent <= 100);
    }

    let all_paid = vec![person("A", "", [true; WEEK_COUNT])];
    assert_eq!(stats_queries::roster_stats(&all_paid).paid_percent, 100);
}

#[test]
fn stats_on_empty_roster() {
    let stats = stats_queries::roster_stats(&[]);
    assert_eq!(stats.total_rows, 0);
    assert_eq!(stats.active, 0);
    assert_eq!(stats.paid_percent, 0);
}
