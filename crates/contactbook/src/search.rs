//! Name search over records.
//!
//! [`filter`] is a stateless, case-insensitive substring match against the
//! first or last name. [`SearchView`] keeps the result of one search together
//! with the query so that 1-based positions shown to the user can be turned
//! back into record ids.

use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::record::{Record, RecordId};

/// Whether `record` matches `query`.
///
/// The query is matched case-insensitively as a substring of the first name
/// or the last name. The empty query matches every record.
#[must_use]
pub fn matches(record: &Record, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record.first_name.to_lowercase().contains(&needle)
        || record.last_name.to_lowercase().contains(&needle)
}

/// Records matching `query`, in stored order.
pub fn filter<'a, I>(records: I, query: &str) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|record| matches(record, query))
        .collect()
}

/// How a user points at a record: by listing position or by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// 1-based position in the displayed listing.
    Position(usize),
    /// Stable record id.
    Id(RecordId),
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if let Ok(position) = s.parse::<usize>() {
            return Ok(Self::Position(position));
        }
        s.parse::<RecordId>()
            .map(Self::Id)
            .map_err(|_| Error::InvalidSelector(s.to_string()))
    }
}

/// One row of a search listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entry<'a> {
    /// 1-based position in the listing.
    pub position: usize,
    /// The matching record.
    pub record: &'a Record,
}

/// The displayed result of a search.
#[derive(Debug, Clone)]
pub struct SearchView<'a> {
    query: String,
    matches: Vec<&'a Record>,
}

impl<'a> SearchView<'a> {
    /// Run `query` over `records`.
    #[must_use]
    pub fn new(records: &'a [Record], query: impl Into<String>) -> Self {
        let query = query.into();
        let matches = filter(records, &query);
        Self { query, matches }
    }

    /// The query this view was built from.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of listed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The matching records in order.
    #[must_use]
    pub fn records(&self) -> &[&'a Record] {
        &self.matches
    }

    /// Rows with their 1-based positions.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'a>> + '_ {
        self.matches
            .iter()
            .copied()
            .enumerate()
            .map(|(index, record)| Entry {
                position: index + 1,
                record,
            })
    }

    /// Id of the record shown at 1-based `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionOutOfRange`] if nothing is shown at `position`.
    pub fn resolve(&self, position: usize) -> Result<RecordId> {
        position
            .checked_sub(1)
            .and_then(|index| self.matches.get(index))
            .map(|record| record.id)
            .ok_or(Error::PositionOutOfRange {
                position,
                len: self.matches.len(),
            })
    }

    /// Id of the record a selector points at.
    ///
    /// Positions are resolved against this view. Ids are passed through
    /// unchecked; the store reports ids it doesn't hold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionOutOfRange`] for a position outside the view.
    pub fn select(&self, selector: Selector) -> Result<RecordId> {
        match selector {
            Selector::Position(position) => self.resolve(position),
            Selector::Id(id) => Ok(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Vec<Record> {
        vec![
            Record::new("Ann", "Lee", "555"),
            Record::new("Bo", "Ng", "000"),
            Record::new("Dana", "Anders", "123"),
        ]
    }

    #[test]
    fn test_filter_scenario() {
        let records = vec![
            Record::new("Ann", "Lee", "555"),
            Record::new("Bo", "Ng", "000"),
        ];
        let result = filter(&records, "an");
        assert_eq!(result, vec![&records[0]]);
    }

    #[test]
    fn test_filter_matches_last_name() {
        let records = people();
        let result = filter(&records, "NG");
        assert_eq!(result, vec![&records[1]]);
    }

    #[test]
    fn test_filter_either_name_keeps_order() {
        let records = people();
        let result = filter(&records, "an");
        assert_eq!(result, vec![&records[0], &records[2]]);
    }

    #[test]
    fn test_empty_query_matches_all() {
        let records = people();
        assert_eq!(filter(&records, "").len(), records.len());
    }

    #[test]
    fn test_phone_is_not_searched() {
        let records = people();
        assert!(filter(&records, "555").is_empty());
    }

    #[test]
    fn test_filter_idempotent_under_empty_query() {
        let records = people();
        for query in ["", "a", "an", "lee", "zz"] {
            let once = filter(&records, query);
            let twice = filter(once.iter().copied(), "");
            assert_eq!(once, twice, "query {query:?}");
        }
    }

    #[test]
    fn test_unicode_case_folding() {
        let records = vec![Record::new("Émile", "Zola", "1")];
        assert_eq!(filter(&records, "émi").len(), 1);
    }

    #[test]
    fn test_view_entries() {
        let records = people();
        let view = SearchView::new(&records, "an");
        let positions: Vec<_> = view.entries().map(|e| e.position).collect();

        assert_eq!(view.query(), "an");
        assert_eq!(view.len(), 2);
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn test_resolve_uses_filtered_positions() {
        let records = people();
        let view = SearchView::new(&records, "anders");

        // Position 1 of the filtered listing is the third stored record.
        assert_eq!(view.resolve(1).unwrap(), records[2].id);
    }

    #[test]
    fn test_resolve_out_of_range() {
        let records = people();
        let view = SearchView::new(&records, "");

        assert!(matches!(
            view.resolve(0),
            Err(Error::PositionOutOfRange { position: 0, len: 3 })
        ));
        assert!(matches!(
            view.resolve(4),
            Err(Error::PositionOutOfRange { position: 4, len: 3 })
        ));
    }

    #[test]
    fn test_selector_parse() {
        let id = RecordId::new();
        assert_eq!("3".parse::<Selector>().unwrap(), Selector::Position(3));
        assert_eq!("#2".parse::<Selector>().unwrap(), Selector::Position(2));
        assert_eq!(
            id.to_string().parse::<Selector>().unwrap(),
            Selector::Id(id)
        );
        assert!(matches!(
            "bob".parse::<Selector>(),
            Err(Error::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_select() {
        let records = people();
        let view = SearchView::new(&records, "bo");
        let stray = RecordId::new();

        assert_eq!(view.select(Selector::Position(1)).unwrap(), records[1].id);
        assert_eq!(view.select(Selector::Id(stray)).unwrap(), stray);
        assert!(view.select(Selector::Position(2)).is_err());
    }

    #[test]
    fn test_empty_view() {
        let records: Vec<Record> = Vec::new();
        let view = SearchView::new(&records, "x");
        assert!(view.is_empty());
        assert!(view.resolve(1).is_err());
    }
}
