//! Case-insensitive substring search over stripped route ids.

use super::error::SearchError;
use super::snapshot::RouteCatalog;

/// A search query, case-folded once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    folded: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    /// The query as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lowercased form used for matching.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// An empty query means "no search", not "match everything".
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl From<&str> for SearchQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Search a catalog for route ids containing `query`, ignoring case.
///
/// Returns stripped ids in original casing and catalog order. An empty
/// query yields an empty result even when no catalog is loaded.
pub fn search(
    catalog: Option<&RouteCatalog>,
    query: &SearchQuery,
) -> Result<Vec<String>, SearchError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let catalog = catalog.ok_or(SearchError::NotReady)?;

    Ok(catalog
        .routes()
        .iter()
        .filter(|route| route.id.to_lowercase().contains(query.folded()))
        .map(|route| route.id.clone())
        .collect())
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;
    use crate::catalog::build_catalog;
    use crate::catalog::test_support::catalog_json;

    /// Route-like stripped ids: letters, digits, plus `-SBS` sometimes.
    fn arb_id() -> impl Strategy<Value = String> {
        ("[A-Za-z]{1,2}[0-9]{1,3}", proptest::bool::ANY).prop_map(|(base, sbs)| {
            if sbs { format!("{base}-SBS") } else { base }
        })
    }

    /// Stripped ids in upstream order, with some ids deliberately repeated.
    fn arb_ids() -> impl Strategy<Value = Vec<String>> {
        (
            prop::collection::vec(arb_id(), 0..15),
            prop::collection::vec(
                (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
                0..5,
            ),
        )
            .prop_map(|(mut ids, repeats)| {
                if !ids.is_empty() {
                    for (src, dst) in repeats {
                        let copy = ids[src.index(ids.len())].clone();
                        let at = dst.index(ids.len() + 1);
                        ids.insert(at, copy);
                    }
                }
                ids
            })
    }

    fn catalog_of(ids: &[String]) -> RouteCatalog {
        let raw_ids: Vec<String> = ids.iter().map(|id| format!("MTA NYCT_{id}")).collect();
        let pairs: Vec<(&str, &str)> = raw_ids
            .iter()
            .zip(ids)
            .map(|(raw, short)| (raw.as_str(), short.as_str()))
            .collect();
        build_catalog(&catalog_json(&pairs)).unwrap()
    }

    fn arb_catalog() -> impl Strategy<Value = RouteCatalog> {
        arb_ids().prop_map(|ids| catalog_of(&ids))
    }

    /// ASCII case-insensitive containment by sliding window.
    fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
        haystack
            .as_bytes()
            .windows(needle.len())
            .any(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
    }

    fn arb_query() -> impl Strategy<Value = String> {
        prop_oneof!["[A-Za-z0-9-]{1,3}", "[0-9]{1,2}", "[sS][bB][sS]"]
    }

    proptest! {
        /// Every result contains the query, ignoring case
        #[test]
        fn results_contain_query(catalog in arb_catalog(), query in arb_query()) {
            let results = search(Some(&catalog), &SearchQuery::new(query.clone())).unwrap();
            for id in &results {
                prop_assert!(contains_ignoring_case(id, &query));
            }
        }

        /// Results are exactly the matching generated records, once per
        /// record and in upstream order, duplicates included
        #[test]
        fn results_are_ordered_matching_records(ids in arb_ids(), query in arb_query()) {
            let catalog = catalog_of(&ids);
            let results = search(Some(&catalog), &SearchQuery::new(query.clone())).unwrap();

            let mut expected = Vec::new();
            for i in 0..ids.len() {
                if contains_ignoring_case(&ids[i], &query) {
                    expected.push(ids[i].clone());
                }
            }
            prop_assert_eq!(results, expected);
        }

        /// A query drawn from a route id always finds that route
        #[test]
        fn substring_of_id_matches(catalog in arb_catalog(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!catalog.is_empty());
            let route = &catalog.routes()[pick.index(catalog.len())];
            let query = route.id.to_uppercase();
            let results = search(Some(&catalog), &SearchQuery::new(query)).unwrap();
            prop_assert!(results.contains(&route.id));
        }

        /// Empty query never matches anything
        #[test]
        fn empty_query_is_empty(catalog in arb_catalog()) {
            prop_assert!(search(Some(&catalog), &SearchQuery::new("")).unwrap().is_empty());
        }

        /// Without a catalog, any non-empty query is NotReady
        #[test]
        fn uninitialized_is_not_ready(query in ".{1,10}") {
            prop_assert_eq!(search(None, &SearchQuery::new(query)), Err(SearchError::NotReady));
        }
    }
}
