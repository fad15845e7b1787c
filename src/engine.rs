//! Derives the visible subset of bills from the full collection.
//!
//! Everything here is pure: the same collection and query always give the
//! same ordered output, and the output only ever points into the input.

use crate::query::{Coverage, JurisdictionFilter, QueryState, SortOrder, StatusFilter};
use crate::types::Bill;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Filter and sort `bills`, returning references into the collection
pub fn filter_sort<'a>(bills: &'a [Bill], query: &QueryState, coverage: Coverage) -> Vec<&'a Bill> {
    filter_sort_indices(bills, query, coverage)
        .into_iter()
        .map(|i| &bills[i])
        .collect()
}

/// Same as [`filter_sort`], but yields positions in the collection
pub fn filter_sort_indices(bills: &[Bill], query: &QueryState, coverage: Coverage) -> Vec<usize> {
    let needle = query.needle();
    let mut visible: Vec<usize> = bills
        .iter()
        .enumerate()
        .filter(|(_, bill)| {
            matches_search(bill, needle.as_deref(), coverage)
                && matches_status(bill, &query.status_filter)
                && (!coverage.is_multi() || matches_jurisdiction(bill, &query.jurisdiction_filter))
        })
        .map(|(i, _)| i)
        .collect();

    if let Some(order) = query.sort_order {
        // Dates are parsed once per bill rather than once per comparison
        let dates: Vec<Option<NaiveDate>> = bills.iter().map(Bill::action_date).collect();
        visible.sort_by(|&a, &b| compare(order, coverage, &bills[a], &bills[b], dates[a], dates[b]));
    }

    visible
}

/// Case-insensitive substring search over the bill's text fields
pub fn matches_search(bill: &Bill, needle: Option<&str>, coverage: Coverage) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    let contains = |field: &str| field.to_lowercase().contains(needle);
    contains(&bill.title)
        || contains(&bill.description)
        || contains(&bill.bill_number)
        || (coverage.is_multi() && contains(bill.state_name()))
}

/// Case-insensitive substring match against the bill's status
pub fn matches_status(bill: &Bill, filter: &StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Containing(text) => bill
            .status
            .to_lowercase()
            .contains(&text.to_lowercase()),
    }
}

pub fn matches_jurisdiction(bill: &Bill, filter: &JurisdictionFilter) -> bool {
    match filter {
        JurisdictionFilter::All => true,
        JurisdictionFilter::Federal => bill.is_federal() || bill.state_name() == "US",
        JurisdictionFilter::State(name) => bill.state_name() == name,
    }
}

fn compare(
    order: SortOrder,
    coverage: Coverage,
    a: &Bill,
    b: &Bill,
    date_a: Option<NaiveDate>,
    date_b: Option<NaiveDate>,
) -> Ordering {
    match order {
        SortOrder::Recent => newest_first(date_a, date_b),
        SortOrder::Oldest => oldest_first(date_a, date_b),
        SortOrder::State if coverage.is_multi() => a
            .state_name()
            .cmp(b.state_name())
            .then_with(|| newest_first(date_a, date_b)),
        SortOrder::State => Ordering::Equal,
        SortOrder::Alphabetical => a.bill_number.cmp(&b.bill_number),
    }
}

/// Descending by date; bills without a usable date go last
fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Ascending by date; bills without a usable date go last
fn oldest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
