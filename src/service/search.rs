//! Book search: optional criteria combined with AND.

use crate::sql::Filter;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query string of `GET /books/search`. An absent parameter adds no predicate;
/// a present one always does, even when empty (`title=` matches every title).
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookSearch {
    /// Substring of the title.
    pub title: Option<String>,
    /// Exact author id.
    pub author_id: Option<i64>,
    /// Exact publication year.
    pub published_year: Option<i64>,
}

impl BookSearch {
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(title) = &self.title {
            filters.push(Filter::Contains("title", title.clone()));
        }
        if let Some(author_id) = self.author_id {
            filters.push(Filter::Equals("author_id", author_id));
        }
        if let Some(year) = self.published_year {
            filters.push(Filter::Equals("published_year", year));
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_criteria_no_filters() {
        assert!(BookSearch::default().filters().is_empty());
    }

    #[test]
    fn every_supplied_criterion_becomes_a_filter() {
        let search = BookSearch {
            title: Some("Book".into()),
            author_id: Some(1),
            published_year: Some(2024),
        };
        assert_eq!(
            search.filters(),
            vec![
                Filter::Contains("title", "Book".into()),
                Filter::Equals("author_id", 1),
                Filter::Equals("published_year", 2024),
            ]
        );
    }

    #[test]
    fn empty_title_is_present_not_absent() {
        let search = BookSearch {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(search.filters(), vec![Filter::Contains("title", String::new())]);
    }

    #[test]
    fn zero_is_a_real_value() {
        let search = BookSearch {
            author_id: Some(0),
            ..Default::default()
        };
        assert_eq!(search.filters(), vec![Filter::Equals("author_id", 0)]);
    }
}
