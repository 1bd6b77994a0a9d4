use crate::model::Participant;

pub const PAGE_SIZE: usize = 20;

/// Participants matching `term`, in roster order. The name match ignores
/// case, the whatsapp match does not. An empty term matches everything.
pub fn filter<'a>(participants: &'a [Participant], term: &str) -> Vec<&'a Participant> {
    if term.is_empty() {
        return participants.iter().collect();
    }

    let lower = term.to_lowercase();
    participants
        .iter()
        .filter(|p| matches_term(p, term, &lower))
        .collect()
}

fn matches_term(p: &Participant, term: &str, lower: &str) -> bool {
    term.is_empty() || p.name.to_lowercase().contains(lower) || p.whatsapp.contains(term)
}

/// Number of pages for `count` items; never less than one.
pub fn page_count(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

/// The 1-based `page` of `items`. Pages past the end are empty.
pub fn page<T: Copy>(items: &[T], page: usize) -> Vec<T> {
    let start = page.saturating_sub(1) * PAGE_SIZE;
    items.iter().skip(start).take(PAGE_SIZE).copied().collect()
}

/// Search term and current page for the roster listing.
#[derive(Debug, Clone)]
pub struct RosterView {
    search: String,
    current_page: usize,
}

/// One rendered page of the roster.
#[derive(Debug)]
pub struct PageView<'a> {
    pub rows: Vec<(usize, &'a Participant)>,
    pub page: usize,
    pub page_count: usize,
    pub matched: usize,
}

impl Default for RosterView {
    fn default() -> Self {
        Self {
            search: String::new(),
            current_page: 1,
        }
    }
}

impl RosterView {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.current_page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn next_page(&mut self, participants: &[Participant]) {
        let last = self.last_page(participants);
        self.current_page = self.current_page.saturating_add(1).min(last);
    }

    pub fn prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Moves to the last page so a freshly appended row is visible. A search
    /// the newest row does not match is cleared first.
    pub fn jump_to_last(&mut self, participants: &[Participant]) {
        if let Some(newest) = participants.last() {
            if !matches_term(newest, &self.search, &self.search.to_lowercase()) {
                self.search.clear();
            }
        }
        self.current_page = self.last_page(participants);
    }

    pub fn last_page(&self, participants: &[Participant]) -> usize {
        page_count(filter(participants, &self.search).len())
    }

    /// Filtered participants with their 1-based row numbers.
    pub fn matches<'a>(&self, participants: &'a [Participant]) -> Vec<(usize, &'a Participant)> {
        filter(participants, &self.search)
            .into_iter()
            .enumerate()
            .map(|(i, p)| (i + 1, p))
            .collect()
    }

    /// Resolves a row number shown in the listing back to its participant.
    pub fn row<'a>(&self, participants: &'a [Participant], row: usize) -> Option<&'a Participant> {
        filter(participants, &self.search).get(row.checked_sub(1)?).copied()
    }

    /// Renders the current page, clamping the page into range first.
    pub fn render<'a>(&mut self, participants: &'a [Participant]) -> PageView<'a> {
        let matches = self.matches(participants);
        let pages = page_count(matches.len());
        self.current_page = self.current_page.clamp(1, pages);

        PageView {
            rows: page(&matches, self.current_page),
            page: self.current_page,
            page_count: pages,
            matched: matches.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| Participant::create(format!("P{}", i), String::new()))
            .collect()
    }

    #[test]
    fn page_count_minimum_is_one() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(20), 1);
        assert_eq!(page_count(21), 2);
    }

    #[test]
    fn set_search_resets_page() {
        let people = roster(45);
        let mut view = RosterView::default();
        view.next_page(&people);
        view.next_page(&people);
        assert_eq!(view.current_page(), 3);

        view.set_search("P1");
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn next_page_stops_at_last() {
        let people = roster(25);
        let mut view = RosterView::default();
        view.next_page(&people);
        view.next_page(&people);
        assert_eq!(view.current_page(), 2);
    }

    #[test]
    fn next_page_from_huge_page_does_not_overflow() {
        let people = roster(25);
        let mut view = RosterView::default();
        view.set_page(usize::MAX);
        view.next_page(&people);
        assert_eq!(view.current_page(), 2);
    }

    #[test]
    fn render_clamps_stale_page() {
        let people = roster(5);
        let mut view = RosterView::default();
        view.set_page(9);
        let rendered = view.render(&people);
        assert_eq!(rendered.page, 1);
        assert_eq!(rendered.rows.len(), 5);
    }

    #[test]
    fn row_numbers_follow_filtered_order() {
        let people = roster(30);
        let mut view = RosterView::default();
        view.set_search("P2");
        // P2, P20..P29
        assert_eq!(view.row(&people, 1).unwrap().name, "P2");
        assert_eq!(view.row(&people, 2).unwrap().name, "P20");
        assert!(view.row(&people, 12).is_none());
        assert!(view.row(&people, 0).is_none());
    }
}
