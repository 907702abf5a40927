//! Unwrapping of Finding API responses.
//!
//! The service wraps nearly every scalar in a one-element array
//! (`"title": ["Nintendo Switch"]`) and every amount in an object of the form
//! `{"@currencyId": "USD", "__value__": "199.99"}`. The helpers here walk a
//! `serde_json::Value` through those containers and produce flat records.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{Result, SearchError};
use crate::query::Operation;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingSummary {
    pub item_id: Option<String>,
    pub title: String,
    pub price: Decimal,
    pub currency: Option<String>,
    pub url: String,
    pub end_time: Option<DateTime<Utc>>,
}

/// Counts taken from the active-listings response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivePage {
    pub count: u64,
    pub total_entries: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SoldPage {
    /// Items in API response order.
    pub items: Vec<ListingSummary>,
    pub total_entries: Option<u64>,
}

pub fn normalize_active(body: &Value) -> Result<ActivePage> {
    let envelope = envelope(Operation::FindItemsByKeywords, body)?;
    let count = get_path(envelope, &["searchResult", "@count"])
        .and_then(as_u64)
        .unwrap_or(0);
    Ok(ActivePage {
        count,
        total_entries: total_entries(envelope),
    })
}

pub fn normalize_sold(body: &Value) -> Result<SoldPage> {
    let envelope = envelope(Operation::FindCompletedItems, body)?;
    let items = extract_items(envelope)
        .into_iter()
        .filter_map(|item| {
            let listing = normalize_item(item);
            if listing.is_none() {
                warn!(
                    "Dropping sold item without a usable price: {}",
                    get_str(item, &["itemId"]).unwrap_or_default()
                );
            }
            listing
        })
        .collect();
    Ok(SoldPage {
        items,
        total_entries: total_entries(envelope),
    })
}

/// Flatten one sold item. `None` when no non-negative price can be parsed.
pub fn normalize_item(item: &Value) -> Option<ListingSummary> {
    let amount = get_path(item, &["sellingStatus", "currentPrice"])
        .or_else(|| get_path(item, &["sellingStatus", "convertedCurrentPrice"]))?;
    let price = amount
        .get("__value__")
        .and_then(as_string)
        .and_then(|raw| Decimal::from_str(raw.trim()).ok())
        .filter(|price| *price >= Decimal::ZERO)?;

    Some(ListingSummary {
        item_id: get_str(item, &["itemId"]),
        title: get_str(item, &["title"]).unwrap_or_default(),
        price,
        currency: amount.get("@currencyId").and_then(as_string),
        url: get_str(item, &["viewItemURL"]).unwrap_or_default(),
        end_time: get_str(item, &["listingInfo", "endTime"])
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|t| t.with_timezone(&Utc)),
    })
}

/// Locate `<operation>Response[0]` and reject failure acks.
fn envelope(operation: Operation, body: &Value) -> Result<&Value> {
    let raw = body
        .get(operation.response_key())
        .ok_or_else(|| SearchError::shape(operation, format!("missing {}", operation.response_key())))?;
    let envelope = unwrap_single(raw)
        .filter(|v| v.is_object())
        .ok_or_else(|| SearchError::shape(operation, "envelope is not an object"))?;

    if let Some(ack) = get_str(envelope, &["ack"]) {
        if ack == "Failure" || ack == "PartialFailure" {
            let message = get_str(envelope, &["errorMessage", "error", "message"])
                .unwrap_or_else(|| "no error message".to_string());
            return Err(SearchError::Api {
                operation,
                ack,
                message,
            });
        }
    }
    Ok(envelope)
}

fn extract_items(envelope: &Value) -> Vec<&Value> {
    match get_path_raw(envelope, &["searchResult", "item"]) {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(item) => vec![item],
        None => Vec::new(),
    }
}

fn total_entries(envelope: &Value) -> Option<u64> {
    get_path(envelope, &["paginationOutput", "totalEntries"]).and_then(as_u64)
}

/// `[x]` becomes `x`; anything that is not an array passes through.
fn unwrap_single(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(arr) => arr.first(),
        other => Some(other),
    }
}

/// Walk `path`, unwrapping single-element containers on the way down but
/// leaving the final value as found.
fn get_path_raw<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = unwrap_single(current)?.get(*key)?;
    }
    Some(current)
}

fn get_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    get_path_raw(value, path).and_then(unwrap_single)
}

fn get_str(value: &Value, path: &[&str]) -> Option<String> {
    get_path(value, path).and_then(as_string)
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
