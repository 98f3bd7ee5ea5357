use serde::Serialize;

use crate::backend::TextSearch;
use crate::error::AppResult;

pub trait SearchMatcher {
    fn prepare_query(&self, raw_query: &str) -> String;
    /// Number of occurrences of `prepared_query` in `page_text`.
    fn count_matches(&self, page_text: &str, prepared_query: &str) -> usize;
}

#[derive(Debug, Clone, Copy)]
pub struct ContainsMatcher {
    pub case_sensitive: bool,
}

impl SearchMatcher for ContainsMatcher {
    fn prepare_query(&self, raw_query: &str) -> String {
        if self.case_sensitive {
            raw_query.to_string()
        } else {
            raw_query.to_lowercase()
        }
    }

    fn count_matches(&self, page_text: &str, prepared_query: &str) -> usize {
        if prepared_query.is_empty() {
            return 0;
        }
        let prepared_page = if self.case_sensitive {
            page_text.to_string()
        } else {
            page_text.to_lowercase()
        };

        let direct = prepared_page.matches(prepared_query).count();
        if direct > 0 {
            return direct;
        }

        // extracted text often splits or drops spaces between glyph runs
        let compact_query = remove_whitespace(prepared_query);
        if compact_query.is_empty() {
            return 0;
        }
        remove_whitespace(&prepared_page)
            .matches(compact_query.as_str())
            .count()
    }
}

fn remove_whitespace(input: &str) -> String {
    input.chars().filter(|ch| !ch.is_whitespace()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageHits {
    pub page: usize,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindState {
    pub visible: bool,
    pub query: String,
    pub case_sensitive: bool,
    pub hits: Vec<PageHits>,
    /// Index into `hits`.
    pub current: Option<usize>,
    pub status: String,
}

impl FindState {
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn total_matches(&self) -> usize {
        self.hits.iter().map(|hit| hit.count).sum()
    }

    pub fn current_page(&self) -> Option<usize> {
        self.current
            .and_then(|index| self.hits.get(index))
            .map(|hit| hit.page)
    }

    pub(crate) fn cancel(&mut self) {
        self.query.clear();
        self.hits.clear();
        self.current = None;
        self.status.clear();
    }

    /// Scans every page, stores the hits and selects the first one at or after `from_page`.
    pub(crate) fn run(
        &mut self,
        search: &dyn TextSearch,
        page_count: usize,
        query: &str,
        case_sensitive: bool,
        from_page: usize,
    ) -> AppResult<Option<usize>> {
        let matcher = ContainsMatcher { case_sensitive };
        let prepared = matcher.prepare_query(query);

        let mut hits = Vec::new();
        for page in 0..page_count {
            let text = search.page_text(page)?;
            let count = matcher.count_matches(&text, &prepared);
            if count > 0 {
                hits.push(PageHits { page, count });
            }
        }

        self.query = query.to_string();
        self.case_sensitive = case_sensitive;
        self.hits = hits;
        self.current = if self.hits.is_empty() {
            None
        } else {
            Some(
                self.hits
                    .iter()
                    .position(|hit| hit.page >= from_page)
                    .unwrap_or(0),
            )
        };
        self.status = if self.hits.is_empty() {
            "not found".to_string()
        } else {
            format!(
                "{} found on {} pages",
                self.total_matches(),
                self.hits.len()
            )
        };

        Ok(self.current_page())
    }

    pub(crate) fn step(&mut self, forward: bool) -> Option<usize> {
        if self.hits.is_empty() {
            return None;
        }
        let len = self.hits.len();
        self.current = Some(match (self.current, forward) {
            (Some(index), true) => (index + 1) % len,
            (None, true) => 0,
            (Some(0) | None, false) => len - 1,
            (Some(index), false) => index - 1,
        });
        self.current_page()
    }
}
