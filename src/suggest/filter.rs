use super::SuggestionList;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Fuzzy filter over suggestion labels, backed by nucleo.
pub struct FuzzyFilter {
    matcher: Matcher,
}

impl Default for FuzzyFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyFilter {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    /// Indices of the items matching `query`, best score first.
    ///
    /// Equal scores keep list order. A blank query matches everything in
    /// list order.
    pub fn filter(&mut self, list: &SuggestionList, query: &str) -> Vec<usize> {
        if query.trim().is_empty() {
            return (0..list.len()).collect();
        }

        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let mut buf = Vec::new();
        let mut scored: Vec<(usize, u32)> = Vec::new();
        for (index, item) in list.items().iter().enumerate() {
            if let Some(score) = pattern.score(Utf32Str::new(item.label(), &mut buf), &mut self.matcher)
            {
                scored.push((index, score));
            }
        }

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(index, _)| index).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::HeadingRecord;

    fn list() -> SuggestionList {
        SuggestionList::single_file(&[
            HeadingRecord::new("Introduction", 1, 0),
            HeadingRecord::new("Background", 2, 5),
            HeadingRecord::new("Setup", 2, 12),
            HeadingRecord::new("Setup on Windows", 3, 20),
        ])
    }

    #[test]
    fn test_blank_query_keeps_everything_in_order() {
        let mut filter = FuzzyFilter::new();
        assert_eq!(filter.filter(&list(), ""), vec![0, 1, 2, 3]);
        assert_eq!(filter.filter(&list(), "   "), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_fuzzy_subsequence_matches() {
        let mut filter = FuzzyFilter::new();
        assert_eq!(filter.filter(&list(), "bkgd"), vec![1]);
        assert!(filter.filter(&list(), "xyz").is_empty());
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let mut filter = FuzzyFilter::new();
        let matches = filter.filter(&list(), "SETUP");
        assert_eq!(matches.len(), 2);
        assert!(matches.contains(&2));
        assert!(matches.contains(&3));
    }
}
