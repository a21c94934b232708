use crate::config::{FilterCriteria, JurisdictionFilter, StatusFilter};
use crate::sort::sort_view;
use crate::types::{BillCollection, BillRecord, FEDERAL_NAME};
use std::collections::BTreeSet;

/// Filter result indicating whether a bill should be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    Keep,
    FilterOut,
}

impl From<bool> for FilterResult {
    fn from(keep: bool) -> Self {
        if keep {
            FilterResult::Keep
        } else {
            FilterResult::FilterOut
        }
    }
}

/// One clause of the filter predicate
pub trait BillFilter {
    fn should_keep(&self, bill: &BillRecord) -> FilterResult;
}

/// Case-insensitive substring search over title, description, bill number and jurisdiction
#[derive(Debug, Clone)]
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.trim().to_lowercase(),
        }
    }
}

impl BillFilter for SearchFilter {
    fn should_keep(&self, bill: &BillRecord) -> FilterResult {
        if self.needle.is_empty() {
            return FilterResult::Keep;
        }

        [
            bill.title.as_deref(),
            bill.description.as_deref(),
            Some(bill.bill_number.as_str()),
            Some(bill.jurisdiction_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&self.needle))
        .into()
    }
}

impl BillFilter for JurisdictionFilter {
    fn should_keep(&self, bill: &BillRecord) -> FilterResult {
        match self {
            JurisdictionFilter::All => FilterResult::Keep,
            JurisdictionFilter::Federal => bill.is_federal().into(),
            JurisdictionFilter::Named(name) => (bill.jurisdiction_name.trim() == name.as_str()).into(),
        }
    }
}

impl BillFilter for StatusFilter {
    fn should_keep(&self, bill: &BillRecord) -> FilterResult {
        match self {
            StatusFilter::All => FilterResult::Keep,
            StatusFilter::Contains(needle) => bill
                .status
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(needle.as_str())
                .into(),
        }
    }
}

/// All three clauses of a [`FilterCriteria`], combined with AND
pub struct FilterManager<'a> {
    search: SearchFilter,
    criteria: &'a FilterCriteria,
}

impl<'a> FilterManager<'a> {
    pub fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            search: SearchFilter::new(&criteria.search),
            criteria,
        }
    }

    /// Check if a bill should be kept
    pub fn should_keep(&self, bill: &BillRecord) -> FilterResult {
        let clauses: [&dyn BillFilter; 3] = [
            &self.search,
            &self.criteria.jurisdiction,
            &self.criteria.status,
        ];

        if clauses
            .iter()
            .all(|clause| clause.should_keep(bill) == FilterResult::Keep)
        {
            FilterResult::Keep
        } else {
            FilterResult::FilterOut
        }
    }
}

/// Filter then sort. The returned view borrows from the collection.
pub fn apply<'a>(collection: &'a BillCollection, criteria: &FilterCriteria) -> Vec<&'a BillRecord> {
    apply_to(collection.bills(), criteria)
}

/// Same as [`apply`] over any slice of bills
pub fn apply_to<'a, I>(bills: I, criteria: &FilterCriteria) -> Vec<&'a BillRecord>
where
    I: IntoIterator<Item = &'a BillRecord>,
{
    let manager = FilterManager::new(criteria);
    let mut view: Vec<&BillRecord> = bills
        .into_iter()
        .filter(|bill| manager.should_keep(bill) == FilterResult::Keep)
        .collect();
    sort_view(&mut view, criteria.sort);
    view
}

/// Distinct jurisdiction names for the jurisdiction control, sorted.
/// Federal bills are reached through the `US` sentinel instead, so "Federal" is left out.
pub fn jurisdiction_options(collection: &BillCollection) -> Vec<String> {
    collection
        .bills()
        .iter()
        .map(|bill| bill.jurisdiction_name.trim())
        .filter(|name| !name.is_empty() && *name != FEDERAL_NAME)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
