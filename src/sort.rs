use crate::config::SortKey;
use crate::dates::parse_action_date;
use crate::types::BillRecord;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Sortable action date. Missing and unparseable dates compare equal to each other.
fn sort_date(bill: &BillRecord) -> Option<DateTime<Utc>> {
    bill.action_date().and_then(parse_action_date)
}

/// Compare dates so that undated bills always come last, whatever the direction
fn compare_dates(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    newest_first: bool,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if newest_first => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of a filtered view; equal keys keep their relative order
pub fn sort_view(view: &mut [&BillRecord], key: SortKey) {
    match key {
        SortKey::Recent => sort_by_cached_date(view, true),
        SortKey::Oldest => sort_by_cached_date(view, false),
        SortKey::ByJurisdiction => {
            let mut keyed: Vec<(Option<DateTime<Utc>>, &BillRecord)> =
                view.iter().map(|bill| (sort_date(bill), *bill)).collect();
            keyed.sort_by(|(date_a, a), (date_b, b)| {
                a.jurisdiction_name
                    .cmp(&b.jurisdiction_name)
                    .then_with(|| compare_dates(*date_a, *date_b, true))
            });
            write_back(view, keyed);
        }
        SortKey::Alphabetical => view.sort_by(|a, b| a.bill_number.cmp(&b.bill_number)),
    }
}

fn sort_by_cached_date(view: &mut [&BillRecord], newest_first: bool) {
    let mut keyed: Vec<(Option<DateTime<Utc>>, &BillRecord)> =
        view.iter().map(|bill| (sort_date(bill), *bill)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_dates(*a, *b, newest_first));
    write_back(view, keyed);
}

fn write_back<'a>(view: &mut [&'a BillRecord], keyed: Vec<(Option<DateTime<Utc>>, &'a BillRecord)>) {
    for (slot, (_, bill)) in view.iter_mut().zip(keyed) {
        *slot = bill;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(number: &str, date: Option<&str>) -> BillRecord {
        let mut bill = BillRecord::new("CA", "California", number);
        bill.last_action_date = date.map(str::to_string);
        bill
    }

    fn numbers(view: &[&BillRecord]) -> Vec<String> {
        view.iter().map(|b| b.bill_number.clone()).collect()
    }

    #[test]
    fn recent_puts_newest_first_and_undated_last() {
        let bills = vec![
            dated("undated", None),
            dated("march", Some("2024-03-01")),
            dated("garbage", Some("next tuesday")),
            dated("may", Some("2024-05-01")),
        ];
        let mut view: Vec<&BillRecord> = bills.iter().collect();
        sort_view(&mut view, SortKey::Recent);
        assert_eq!(numbers(&view), vec!["may", "march", "undated", "garbage"]);
    }

    #[test]
    fn oldest_still_sinks_undated() {
        let bills = vec![
            dated("undated", None),
            dated("may", Some("2024-05-01")),
            dated("march", Some("2024-03-01")),
        ];
        let mut view: Vec<&BillRecord> = bills.iter().collect();
        sort_view(&mut view, SortKey::Oldest);
        assert_eq!(numbers(&view), vec!["march", "may", "undated"]);
    }

    #[test]
    fn status_date_stands_in_for_missing_last_action() {
        let mut fallback = dated("fallback", None);
        fallback.status_date = Some("2024-06-01".to_string());
        let bills = vec![dated("march", Some("2024-03-01")), fallback];
        let mut view: Vec<&BillRecord> = bills.iter().collect();
        sort_view(&mut view, SortKey::Recent);
        assert_eq!(numbers(&view), vec!["fallback", "march"]);
    }

    #[test]
    fn by_jurisdiction_breaks_ties_newest_first() {
        let mut ak = dated("ak", Some("2020-01-01"));
        ak.jurisdiction_name = "Alaska".to_string();
        let bills = vec![
            dated("ca-old", Some("2023-01-01")),
            dated("ca-undated", None),
            dated("ca-new", Some("2024-01-01")),
            ak,
        ];
        let mut view: Vec<&BillRecord> = bills.iter().collect();
        sort_view(&mut view, SortKey::ByJurisdiction);
        assert_eq!(numbers(&view), vec!["ak", "ca-new", "ca-old", "ca-undated"]);
    }

    #[test]
    fn alphabetical_is_stable_for_equal_numbers() {
        let mut first = dated("HB 1", Some("2024-01-01"));
        first.jurisdiction_name = "First".to_string();
        let mut second = dated("HB 1", Some("2024-02-01"));
        second.jurisdiction_name = "Second".to_string();
        let bills = vec![dated("SB 1", None), first, second];

        let mut view: Vec<&BillRecord> = bills.iter().collect();
        sort_view(&mut view, SortKey::Alphabetical);
        let names: Vec<&str> = view.iter().map(|b| b.jurisdiction_name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "California"]);
    }
}
