use serde::Deserialize;

use crate::store::{Filter, Order, SortSpec};

pub const DEFAULT_PAGE_SIZE: u64 = 5;

/// Raw listing parameters. Numeric values arrive as query-string text and
/// are parsed leniently: malformed input falls back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListAstrologersQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "priceSort")]
    pub price_sort: Option<String>,
    #[serde(rename = "experienceSort")]
    pub experience_sort: Option<String>,
    pub language: Option<String>,
    pub expertise: Option<String>,
}

/// Translates listing parameters into `(filter, sort, skip, limit)` for the
/// store. Never fails; price sort precedes experience sort when both are
/// requested.
pub fn build_list_query(params: &ListAstrologersQuery) -> (Filter, Vec<SortSpec>, u64, u64) {
    let limit = parse_positive(&params.limit, DEFAULT_PAGE_SIZE);
    let page = parse_positive(&params.page, 1);
    let skip = limit.saturating_mul(page - 1);

    let mut sort = Vec::new();
    if let Some(order) = parse_direction(&params.price_sort) {
        sort.push(SortSpec { field: "price".into(), order });
    }
    if let Some(order) = parse_direction(&params.experience_sort) {
        sort.push(SortSpec { field: "experience".into(), order });
    }

    let mut clauses = Vec::new();
    if let Some(patterns) = split_patterns(&params.language) {
        clauses.push(Filter::AllContain { path: "language".into(), patterns });
    }
    if let Some(patterns) = split_patterns(&params.expertise) {
        clauses.push(Filter::AllContain { path: "expertise".into(), patterns });
    }
    let filter = if clauses.is_empty() { Filter::True } else { Filter::And(clauses) };

    (filter, sort, skip, limit)
}

fn parse_positive(raw: &Option<String>, default: u64) -> u64 {
    raw.as_deref()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
        .map(|v| v as u64)
        .unwrap_or(default)
}

fn parse_direction(raw: &Option<String>) -> Option<Order> {
    let value = raw.as_deref()?.trim().parse::<i64>().ok()?;
    Some(if value < 0 { Order::Desc } else { Order::Asc })
}

/// Splits a filter value on `+`, then on whitespace, into lowercased
/// patterns. Empty patterns are dropped; a value with no usable pattern adds
/// no constraint.
fn split_patterns(raw: &Option<String>) -> Option<Vec<String>> {
    let raw = raw.as_deref()?;
    let patterns: Vec<String> = raw
        .split('+')
        .flat_map(str::split_whitespace)
        .map(str::to_lowercase)
        .filter(|p| !p.is_empty())
        .collect();
    if patterns.is_empty() {
        None
    } else {
        Some(patterns)
    }
}
