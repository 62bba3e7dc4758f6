//! Substring search over index keys.

use opl_index::{NameIndex, Variant};
use opl_model::{Record, SearchHit, SearchPage};

use crate::error::{MatchError, Result};

/// Largest page a search returns.
pub const MAX_PAGE_SIZE: usize = 100;

/// Minimum number of characters in a search term, ignoring whitespace and commas.
pub const MIN_TERM_CHARS: usize = 2;

/// Records whose canonical name contains `term`, best Dots first.
///
/// The term is normalized by stripping spaces and commas. `limit` is capped
/// at [`MAX_PAGE_SIZE`]; `offset` skips that many matches.
pub fn search(index: &NameIndex, term: &str, limit: usize, offset: usize) -> Result<SearchPage> {
    let meaningful = term
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .count();
    if meaningful < MIN_TERM_CHARS {
        return Err(MatchError::InvalidQuery(format!(
            "search term must have at least {MIN_TERM_CHARS} characters"
        )));
    }
    let needle = Variant::StripSpacesAndCommas.apply(term);

    let mut matches: Vec<&Record> = index
        .iter()
        .filter(|(key, _)| key.contains(needle.as_str()))
        .flat_map(|(_, records)| records)
        .collect();
    matches.sort_by(|a, b| b.dots.total_cmp(&a.dots));

    let limit = limit.min(MAX_PAGE_SIZE);
    Ok(SearchPage {
        term: term.trim().to_string(),
        total_count: matches.len(),
        limit,
        offset,
        lifters: matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(SearchHit::from)
            .collect(),
    })
}
