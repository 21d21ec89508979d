//! Selection expression parsing
//!
//! Users pick catalog items either with a space-separated id list (`1 3 5`)
//! or with a single inclusive range (`2-4`). Any `-` in the input selects the
//! range grammar; only the two tokens around the first `-` are read.

use crate::app::models::CatalogItem;
use crate::errors::{SelectionError, SelectionResult};

/// Parsed selection expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Explicit ids in input order, duplicates kept
    List(Vec<u32>),
    /// Inclusive range, `start <= end`
    Range { start: u32, end: u32 },
}

impl Selection {
    /// Parse a selection expression
    ///
    /// # Errors
    ///
    /// Returns `SelectionError` if a token is not an integer, a range bound is
    /// missing, or a range is reversed
    pub fn parse(input: &str) -> SelectionResult<Self> {
        if input.contains('-') {
            let mut bounds = input.split('-');
            let start = parse_bound(bounds.next(), input)?;
            let end = parse_bound(bounds.next(), input)?;

            if start > end {
                return Err(SelectionError::ReversedRange { start, end });
            }
            return Ok(Self::Range { start, end });
        }

        input
            .split_whitespace()
            .map(parse_id)
            .collect::<SelectionResult<Vec<_>>>()
            .map(Self::List)
    }

    /// The ordered id sequence, produced lazily so wide ranges cost nothing
    /// until consumed
    pub fn ids(&self) -> Box<dyn Iterator<Item = u32> + Send + '_> {
        match self {
            Self::List(ids) => Box::new(ids.iter().copied()),
            Self::Range { start, end } => Box::new(*start..=*end),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::List(ids) if ids.is_empty())
    }
}

fn parse_bound(token: Option<&str>, input: &str) -> SelectionResult<u32> {
    match token.map(str::trim) {
        Some(token) if !token.is_empty() => parse_id(token),
        _ => Err(SelectionError::MissingRangeBound {
            input: input.trim().to_string(),
        }),
    }
}

fn parse_id(token: &str) -> SelectionResult<u32> {
    token
        .parse::<u32>()
        .map_err(|_| SelectionError::InvalidNumber {
            token: token.to_string(),
        })
}

/// Find the item with the given id; the first match wins
pub fn resolve<'a>(items: &'a [CatalogItem], id: u32) -> SelectionResult<&'a CatalogItem> {
    items
        .iter()
        .find(|item| item.id == id)
        .ok_or(SelectionError::UnknownId { id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(
            Selection::parse("1 3 5").unwrap(),
            Selection::List(vec![1, 3, 5])
        );
        assert_eq!(
            Selection::parse("  4\t2  4 \n").unwrap(),
            Selection::List(vec![4, 2, 4])
        );
    }

    #[test]
    fn test_parse_empty_list() {
        let selection = Selection::parse("   \n").unwrap();
        assert!(selection.is_empty());
        assert_eq!(selection.ids().count(), 0);
    }

    #[test]
    fn test_parse_range_inclusive() {
        let selection = Selection::parse("2-4").unwrap();
        assert_eq!(selection, Selection::Range { start: 2, end: 4 });
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert!(!selection.is_empty());

        assert_eq!(Selection::parse("7-7").unwrap().ids().collect::<Vec<_>>(), vec![7]);
        assert_eq!(
            Selection::parse(" 1 - 3 \n").unwrap().ids().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_wide_range_is_lazy() {
        let selection = Selection::parse("1-4000000000").unwrap();
        assert_eq!(selection.ids().take(3).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(selection.ids().nth(3_999_999_999), Some(4_000_000_000));
    }

    #[test]
    fn test_range_ignores_extra_segments() {
        assert_eq!(
            Selection::parse("1-2-9").unwrap().ids().collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(
            Selection::parse("1 two 3").unwrap_err(),
            SelectionError::InvalidNumber {
                token: "two".to_string()
            }
        );
        assert!(matches!(
            Selection::parse("3-").unwrap_err(),
            SelectionError::MissingRangeBound { .. }
        ));
        assert!(matches!(
            Selection::parse("-3").unwrap_err(),
            SelectionError::MissingRangeBound { .. }
        ));
        assert_eq!(
            Selection::parse("5-2").unwrap_err(),
            SelectionError::ReversedRange { start: 5, end: 2 }
        );
        assert!(matches!(
            Selection::parse("a-b").unwrap_err(),
            SelectionError::InvalidNumber { .. }
        ));
    }

    #[test]
    fn test_resolve_first_match() {
        let items = vec![
            CatalogItem::new(1, "Intro", "L1"),
            CatalogItem::new(2, "Advanced", "L2"),
            CatalogItem::new(2, "Duplicate", "L3"),
        ];

        assert_eq!(resolve(&items, 1).unwrap().link, "L1");
        assert_eq!(resolve(&items, 2).unwrap().link, "L2");
        assert_eq!(
            resolve(&items, 9).unwrap_err(),
            SelectionError::UnknownId { id: 9 }
        );
    }
}
