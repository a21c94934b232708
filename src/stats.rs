use crate::types::BillCollection;
use serde::Serialize;
use std::collections::HashSet;

/// Status words that mark a bill as no longer moving
const INACTIVE_TERMS: [&str; 4] = ["enacted", "vetoed", "failed", "dead"];

/// Summary counts over the whole collection, independent of filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Statistics {
    pub total_bills: usize,
    pub jurisdictions: usize,
    pub active_bills: usize,
    pub with_analysis: usize,
}

impl Statistics {
    pub fn compute(collection: &BillCollection) -> Self {
        let bills = collection.bills();

        let jurisdictions = bills
            .iter()
            .map(|bill| bill.jurisdiction_name.trim())
            .filter(|name| !name.is_empty())
            .collect::<HashSet<_>>()
            .len();

        let active_bills = bills
            .iter()
            .filter(|bill| {
                let status = bill.status.as_deref().unwrap_or("").to_lowercase();
                !INACTIVE_TERMS.iter().any(|term| status.contains(term))
            })
            .count();

        let with_analysis = bills
            .iter()
            .filter(|bill| bill.analysis_url().is_some())
            .count();

        Self {
            total_bills: bills.len(),
            jurisdictions,
            active_bills,
            with_analysis,
        }
    }
}
