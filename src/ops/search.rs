use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::model::item::{ItemId, Mode};
use crate::model::state::Items;

/// A search hit: the item and where in its text the pattern matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: ItemId,
    pub spans: Vec<Range<usize>>,
}

/// Compile a user-typed pattern. Matching is case-insensitive.
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
pub fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Search item texts, optionally restricted to one list.
pub fn search_items(items: &Items, re: &Regex, mode: Option<Mode>) -> Vec<SearchHit> {
    items
        .iter()
        .filter(|(_, item)| mode.is_none_or(|m| item.mode == m))
        .filter_map(|(id, item)| {
            let spans = find_matches(re, &item.text);
            if spans.is_empty() {
                None
            } else {
                Some(SearchHit { id: *id, spans })
            }
        })
        .collect()
}
