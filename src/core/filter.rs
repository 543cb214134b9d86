//! # Filter Engine
//!
//! Pure functions that narrow a content list by search term and region, plus
//! the small selections built on top of it (related, featured, moderation
//! tallies).
//!
//! ```text
//! matches(item) = (search == "" OR title ∋ search OR description ∋ search OR content ∋ search)
//!             AND (region == All OR item.region == region)
//! ```
//!
//! Search is a case-insensitive substring match. Region is an exact,
//! case-sensitive match on the stored string. Output keeps input order.

use crate::core::content::{ContentItem, ContentStatus, Submission};

/// Display label of the "no region filter" selection.
pub const ALL_REGIONS: &str = "All Regions";

/// Region selection. `All` is a variant, not a string, so it can never be
/// confused with a region stored on a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum RegionFilter {
    #[default]
    All,
    Named(String),
}

impl RegionFilter {
    /// Parses a selector value; `"All Regions"` is the sentinel.
    pub fn parse(value: &str) -> RegionFilter {
        if value == ALL_REGIONS {
            RegionFilter::All
        } else {
            RegionFilter::Named(value.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RegionFilter::All => ALL_REGIONS,
            RegionFilter::Named(region) => region,
        }
    }

    /// Whether a record tagged with `region` passes this selection.
    /// An untagged record only passes `All`.
    pub fn admits(&self, region: Option<&str>) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Named(wanted) => region == Some(wanted.as_str()),
        }
    }

    /// Steps through `All → options[0] → … → options[n-1] → All`.
    pub fn cycle(&self, options: &[String]) -> RegionFilter {
        let next = match self {
            RegionFilter::All => 0,
            RegionFilter::Named(current) => match options.iter().position(|o| o == current) {
                Some(pos) => pos + 1,
                None => options.len(),
            },
        };
        options
            .get(next)
            .map(|region| RegionFilter::Named(region.clone()))
            .unwrap_or(RegionFilter::All)
    }
}

impl From<&str> for RegionFilter {
    fn from(value: &str) -> Self {
        RegionFilter::parse(value)
    }
}

/// Fields the filter engine reads from a record.
pub trait Searchable {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn body(&self) -> &str;
    fn region(&self) -> Option<&str>;
}

impl Searchable for ContentItem {
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn body(&self) -> &str {
        &self.content
    }
    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

impl Searchable for Submission {
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn body(&self) -> &str {
        &self.content
    }
    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn title(&self) -> &str {
        (**self).title()
    }
    fn description(&self) -> &str {
        (**self).description()
    }
    fn body(&self) -> &str {
        (**self).body()
    }
    fn region(&self) -> Option<&str> {
        (**self).region()
    }
}

/// The per-view filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ContentFilter {
    pub search_term: String,
    pub region: RegionFilter,
}

impl ContentFilter {
    pub fn new(search_term: impl Into<String>, region: impl Into<RegionFilter>) -> Self {
        Self {
            search_term: search_term.into(),
            region: region.into(),
        }
    }

    /// Resets both search and region.
    pub fn clear(&mut self) {
        self.search_term.clear();
        self.region = RegionFilter::All;
    }

    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || self.region != RegionFilter::All
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        self.matcher().matches(item)
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            needle: self.search_term.to_lowercase(),
            region: &self.region,
        }
    }
}

/// A filter with its search term lowercased once.
struct Matcher<'a> {
    needle: String,
    region: &'a RegionFilter,
}

impl Matcher<'_> {
    fn matches<T: Searchable>(&self, item: &T) -> bool {
        let search_ok = self.needle.is_empty()
            || [item.title(), item.description(), item.body()]
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle));
        search_ok && self.region.admits(item.region())
    }
}

/// Returns the matching items in input order.
pub fn apply<'a, T: Searchable>(items: &'a [T], filter: &ContentFilter) -> Vec<&'a T> {
    let matcher = filter.matcher();
    items.iter().filter(|item| matcher.matches(*item)).collect()
}

/// Like [`apply`], but returns positions into `items`.
pub fn matching_indices<T: Searchable>(items: &[T], filter: &ContentFilter) -> Vec<usize> {
    let matcher = filter.matcher();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| matcher.matches(*item))
        .map(|(i, _)| i)
        .collect()
}

/// Caches the visible indices for one list, keyed by the list's version
/// number and the filter.
#[derive(Debug, Default)]
pub struct FilterMemo {
    key: Option<(u64, ContentFilter)>,
    indices: Vec<usize>,
}

impl FilterMemo {
    /// Recomputes if `version` or `filter` differs from the last call.
    /// Returns true when it recomputed.
    pub fn refresh<T: Searchable>(&mut self, items: &[T], version: u64, filter: &ContentFilter) -> bool {
        if let Some((v, f)) = &self.key
            && *v == version
            && f == filter
        {
            return false;
        }
        self.indices = matching_indices(items, filter);
        self.key = Some((version, filter.clone()));
        true
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

/// Named regions offered by the selector: `known` first, then any other
/// region found in `items`, in first-seen order.
pub fn region_options(known: &[String], items: &[ContentItem]) -> Vec<String> {
    let mut options: Vec<String> = Vec::with_capacity(known.len());
    let candidates = known
        .iter()
        .map(String::as_str)
        .chain(items.iter().filter_map(|item| item.region.as_deref()));
    for region in candidates {
        if region.is_empty() || region == ALL_REGIONS {
            continue;
        }
        if !options.iter().any(|o| o == region) {
            options.push(region.to_string());
        }
    }
    options
}

/// Up to `limit` other items of the same kind, same-region ones first.
pub fn related<'a>(items: &'a [ContentItem], current: &ContentItem, limit: usize) -> Vec<&'a ContentItem> {
    let others = || {
        items
            .iter()
            .filter(move |item| item.id != current.id && item.kind == current.kind)
    };
    let same_region = |item: &&ContentItem| current.region.is_some() && item.region == current.region;

    others()
        .filter(|item| same_region(item))
        .chain(others().filter(|item| !same_region(item)))
        .take(limit)
        .collect()
}

pub fn featured(items: &[ContentItem]) -> Vec<&ContentItem> {
    items.iter().filter(|item| item.featured).collect()
}

/// Moderation tallies for the admin title bar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

pub fn status_counts(items: &[ContentItem]) -> StatusCounts {
    items.iter().fold(StatusCounts::default(), |mut counts, item| {
        match item.status {
            Some(ContentStatus::Pending) => counts.pending += 1,
            Some(ContentStatus::Approved) => counts.approved += 1,
            Some(ContentStatus::Rejected) => counts.rejected += 1,
            None => {}
        }
        counts
    })
}

/// Who is browsing. The public does not see records explicitly marked
/// pending or rejected; records without a status are shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    #[default]
    Public,
    Admin,
}

impl Audience {
    pub fn admits(self, item: &ContentItem) -> bool {
        match self {
            Audience::Public => matches!(item.status, None | Some(ContentStatus::Approved)),
            Audience::Admin => true,
        }
    }
}
