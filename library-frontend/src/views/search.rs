use crate::models::book::Book;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Clear,
    Query(String),
}

// `results` stays `None` until a search has run; an empty match is `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    query: String,
    submitted: Option<String>,
    results: Option<Vec<Book>>,
}

impl SearchView {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// A blank query clears the results locally; anything else is sent
    /// as typed.
    pub fn submit(&mut self) -> SearchRequest {
        if self.query.trim().is_empty() {
            self.submitted = None;
            self.results = None;
            SearchRequest::Clear
        } else {
            self.submitted = Some(self.query.clone());
            SearchRequest::Query(self.query.clone())
        }
    }

    pub fn active_query(&self) -> Option<&str> {
        self.submitted.as_deref()
    }

    pub fn apply_results(&mut self, books: Vec<Book>) {
        self.results = Some(books);
    }

    pub fn results(&self) -> Option<&[Book]> {
        self.results.as_deref()
    }

    pub(crate) fn results_mut(&mut self) -> Option<&mut Vec<Book>> {
        self.results.as_mut()
    }

    pub fn has_searched(&self) -> bool {
        self.results.is_some()
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.submitted = None;
        self.results = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::book;

    #[test]
    fn blank_query_clears_results() {
        let mut view = SearchView::default();
        view.set_query("dune");
        assert_eq!(view.submit(), SearchRequest::Query("dune".to_string()));
        view.apply_results(vec![book("Dune", "Herbert", "123456789", 3)]);
        assert!(view.has_searched());

        view.set_query("   ");
        assert_eq!(view.submit(), SearchRequest::Clear);
        assert!(view.results().is_none());
        assert!(view.active_query().is_none());
    }

    #[test]
    fn empty_results_differ_from_no_search() {
        let mut view = SearchView::default();
        assert!(view.results().is_none());

        view.set_query("nothing");
        view.submit();
        view.apply_results(Vec::new());
        assert_eq!(view.results(), Some(&[][..]));
    }

    #[test]
    fn query_is_sent_verbatim() {
        let mut view = SearchView::default();
        view.set_query(" 1234567 ");
        assert_eq!(view.submit(), SearchRequest::Query(" 1234567 ".to_string()));
        assert_eq!(view.active_query(), Some(" 1234567 "));
    }
}
