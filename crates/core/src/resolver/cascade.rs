//! The ordered list of query variants tried for one title.
//!
//! Each strategy is a pure `(title, year) -> (title', year')` transform; the
//! resolver runs the same catalog pass for every variant, so reordering or
//! adding a strategy only touches [`build_cascade`].

use std::fmt;

use super::ResolverConfig;

/// Fallback strategy that produced a query variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Title as normalized, constrained by year.
    Exact,
    /// Title as normalized, year dropped.
    YearRelaxed,
    /// Trailing region marker removed.
    RegionStripped,
    /// Only the first few words kept.
    Truncated,
    /// Leading article removed.
    ArticleStripped,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Exact => "exact",
            Strategy::YearRelaxed => "year_relaxed",
            Strategy::RegionStripped => "region_stripped",
            Strategy::Truncated => "truncated",
            Strategy::ArticleStripped => "article_stripped",
        };
        f.write_str(name)
    }
}

/// One catalog pass to attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryVariant {
    pub strategy: Strategy,
    pub title: String,
    pub year: Option<u32>,
}

/// Build the variants for `title`/`year` in priority order.
///
/// A `(title, year)` pair is only listed once, at its first position.
pub fn build_cascade(
    title: &str,
    year: Option<u32>,
    config: &ResolverConfig,
) -> Vec<QueryVariant> {
    let mut variants = Vec::new();
    let title = title.trim();
    if title.is_empty() {
        return variants;
    }

    push(&mut variants, Strategy::Exact, title, year);
    if year.is_some() {
        push(&mut variants, Strategy::YearRelaxed, title, None);
    }

    if let Some(stripped) = strip_region_suffix(title, &config.region_suffixes) {
        push_with_and_without_year(&mut variants, Strategy::RegionStripped, &stripped, year);
    }

    let words: Vec<&str> = title.split_whitespace().collect();
    let threshold = config.truncation_lengths.iter().copied().max().unwrap_or(0);
    if threshold > 0 && words.len() > threshold {
        for &len in &config.truncation_lengths {
            if len == 0 {
                continue;
            }
            let truncated = words[..len].join(" ");
            push_with_and_without_year(&mut variants, Strategy::Truncated, &truncated, year);
        }
    }

    if let Some(stripped) = strip_leading_article(title, &config.leading_articles) {
        push_with_and_without_year(&mut variants, Strategy::ArticleStripped, &stripped, year);
    }

    variants
}

fn push_with_and_without_year(
    variants: &mut Vec<QueryVariant>,
    strategy: Strategy,
    title: &str,
    year: Option<u32>,
) {
    push(variants, strategy, title, year);
    if year.is_some() {
        push(variants, strategy, title, None);
    }
}

fn push(variants: &mut Vec<QueryVariant>, strategy: Strategy, title: &str, year: Option<u32>) {
    if variants.iter().any(|v| v.title == title && v.year == year) {
        return;
    }
    variants.push(QueryVariant {
        strategy,
        title: title.to_string(),
        year,
    });
}

/// `Shameless US` -> `Shameless`, case-insensitively.
fn strip_region_suffix(title: &str, suffixes: &[String]) -> Option<String> {
    let (head, last) = title.rsplit_once(' ')?;
    let head = head.trim_end();
    if head.is_empty() {
        return None;
    }
    suffixes
        .iter()
        .any(|suffix| last.eq_ignore_ascii_case(suffix))
        .then(|| head.to_string())
}

/// `The Office` -> `Office`.
fn strip_leading_article(title: &str, articles: &[String]) -> Option<String> {
    let (first, rest) = title.split_once(' ')?;
    let rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }
    articles
        .iter()
        .any(|article| first.eq_ignore_ascii_case(article))
        .then(|| rest.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(strategy: Strategy, title: &str, year: Option<u32>) -> QueryVariant {
        QueryVariant {
            strategy,
            title: title.to_string(),
            year,
        }
    }

    #[test]
    fn test_exact_then_year_relaxed() {
        let cascade = build_cascade("The Matrix", Some(1999), &ResolverConfig::default());
        assert_eq!(
            cascade,
            vec![
                variant(Strategy::Exact, "The Matrix", Some(1999)),
                variant(Strategy::YearRelaxed, "The Matrix", None),
                variant(Strategy::ArticleStripped, "Matrix", Some(1999)),
                variant(Strategy::ArticleStripped, "Matrix", None),
            ]
        );
    }

    #[test]
    fn test_no_year_skips_relaxed_variants() {
        let cascade = build_cascade("Alpha Beta Gamma Delta", None, &ResolverConfig::default());
        assert_eq!(
            cascade,
            vec![
                variant(Strategy::Exact, "Alpha Beta Gamma Delta", None),
                variant(Strategy::Truncated, "Alpha Beta Gamma", None),
                variant(Strategy::Truncated, "Alpha Beta", None),
            ]
        );
    }

    #[test]
    fn test_full_cascade_order() {
        let cascade =
            build_cascade("The Long Show Title UK", Some(2020), &ResolverConfig::default());
        let strategies: Vec<_> = cascade
            .iter()
            .map(|v| (v.strategy, v.title.as_str(), v.year))
            .collect();
        assert_eq!(
            strategies,
            vec![
                (Strategy::Exact, "The Long Show Title UK", Some(2020)),
                (Strategy::YearRelaxed, "The Long Show Title UK", None),
                (Strategy::RegionStripped, "The Long Show Title", Some(2020)),
                (Strategy::RegionStripped, "The Long Show Title", None),
                (Strategy::Truncated, "The Long Show", Some(2020)),
                (Strategy::Truncated, "The Long Show", None),
                (Strategy::Truncated, "The Long", Some(2020)),
                (Strategy::Truncated, "The Long", None),
                (Strategy::ArticleStripped, "Long Show Title UK", Some(2020)),
                (Strategy::ArticleStripped, "Long Show Title UK", None),
            ]
        );
    }

    #[test]
    fn test_three_words_are_not_truncated() {
        let cascade = build_cascade("Office Space Movie", None, &ResolverConfig::default());
        assert_eq!(cascade.len(), 1);
    }

    #[test]
    fn test_region_suffix_needs_word_boundary() {
        let suffixes = ResolverConfig::default().region_suffixes;
        assert_eq!(
            strip_region_suffix("Shameless US", &suffixes),
            Some("Shameless".to_string())
        );
        assert_eq!(strip_region_suffix("CampUS", &suffixes), None);
        assert_eq!(strip_region_suffix("US", &suffixes), None);
    }

    #[test]
    fn test_region_suffix_is_case_insensitive() {
        let suffixes = ResolverConfig::default().region_suffixes;
        assert_eq!(
            strip_region_suffix("shameless us", &suffixes),
            Some("shameless".to_string())
        );
        assert_eq!(
            strip_region_suffix("The Office Uk", &suffixes),
            Some("The Office".to_string())
        );

        let cascade = build_cascade("shameless us", None, &ResolverConfig::default());
        assert_eq!(
            cascade[1],
            variant(Strategy::RegionStripped, "shameless", None)
        );
    }

    #[test]
    fn test_leading_article_is_case_insensitive() {
        let articles = ResolverConfig::default().leading_articles;
        assert_eq!(
            strip_leading_article("THE Office", &articles),
            Some("Office".to_string())
        );
        assert_eq!(
            strip_leading_article("an Education", &articles),
            Some("Education".to_string())
        );
        assert_eq!(strip_leading_article("Theory Of Everything", &articles), None);
        assert_eq!(strip_leading_article("The", &articles), None);
    }

    #[test]
    fn test_empty_title_has_no_variants() {
        assert!(build_cascade("   ", Some(2000), &ResolverConfig::default()).is_empty());
    }
}
