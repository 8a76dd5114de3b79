use std::cmp::Ordering;

use bson::{Bson, Document};

use super::filter::{Filter, Order, SortSpec};

pub fn eval_filter(doc: &Document, filter: &Filter) -> bool {
    match filter {
        Filter::True => true,
        Filter::And(fs) => fs.iter().all(|f| eval_filter(doc, f)),
        Filter::Eq { path, value } => doc.get(path) == Some(value),
        Filter::Contains { path, pattern } => match doc.get(path) {
            Some(Bson::String(s)) => s.to_lowercase().contains(&pattern.to_lowercase()),
            _ => false,
        },
        Filter::AllContain { path, patterns } => match doc.get(path) {
            Some(Bson::Array(items)) => patterns.iter().all(|pattern| {
                let pattern = pattern.to_lowercase();
                items.iter().any(|item| match item {
                    Bson::String(s) => s.to_lowercase().contains(&pattern),
                    _ => false,
                })
            }),
            _ => false,
        },
    }
}

pub fn compare_docs(a: &Document, b: &Document, sort: &[SortSpec]) -> Ordering {
    for s in sort {
        let va = a.get(&s.field);
        let vb = b.get(&s.field);
        let ord = match (va, vb) {
            (Some(x), Some(y)) => compare_bson(x, y),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return match s.order {
                Order::Asc => ord,
                Order::Desc => ord.reverse(),
            };
        }
    }
    Ordering::Equal
}

pub fn omit_fields(doc: &mut Document, fields: &[String]) {
    for field in fields {
        doc.remove(field);
    }
}

fn compare_bson(a: &Bson, b: &Bson) -> Ordering {
    if let (Some(x), Some(y)) = (as_f64(a), as_f64(b)) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    match (a, b) {
        (Bson::String(x), Bson::String(y)) => x.cmp(y),
        (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn as_f64(v: &Bson) -> Option<f64> {
    match v {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}
