//! Shared fixtures for the integration tests.
//!
//! `MockTransport` stands in for the Finding service: it records every
//! request and answers with canned envelopes, optionally after a per-keyword
//! delay so tests can interleave searches.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ebay_resell::query::param;
use ebay_resell::{FinderConfig, FindingTransport, Operation, SearchAggregator, SearchError};
use serde_json::{Value, json};

#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Timeout,
}

#[derive(Default)]
pub struct MockTransport {
    replies: HashMap<Operation, Reply>,
    keyword_replies: HashMap<(String, Operation), Reply>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(Operation, Vec<(String, String)>)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, operation: Operation, reply: Reply) -> Self {
        self.replies.insert(operation, reply);
        self
    }

    pub fn reply_for(mut self, keyword: &str, operation: Operation, reply: Reply) -> Self {
        self.keyword_replies
            .insert((keyword.to_string(), operation), reply);
        self
    }

    pub fn delay(mut self, keyword: &str, delay: Duration) -> Self {
        self.delays.insert(keyword.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<(Operation, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FindingTransport for MockTransport {
    async fn get(
        &self,
        operation: Operation,
        params: Vec<(String, String)>,
    ) -> ebay_resell::Result<Value> {
        let keyword = param(&params, "keywords").unwrap_or_default().to_string();
        self.calls.lock().unwrap().push((operation, params));

        if let Some(delay) = self.delays.get(&keyword) {
            tokio::time::sleep(*delay).await;
        }

        let reply = self
            .keyword_replies
            .get(&(keyword, operation))
            .or_else(|| self.replies.get(&operation))
            .cloned()
            .unwrap_or(Reply::Status(404));

        match reply {
            Reply::Json(body) => Ok(body),
            Reply::Status(code) => Err(SearchError::Status {
                operation,
                status: reqwest::StatusCode::from_u16(code).unwrap(),
            }),
            Reply::Timeout => Err(SearchError::Timeout { operation }),
        }
    }
}

pub fn aggregator(transport: Arc<MockTransport>) -> SearchAggregator {
    SearchAggregator::new(transport, FinderConfig::new("test-app-id"))
}

pub fn active_body(count: u64, total: u64) -> Value {
    json!({
        "findItemsByKeywordsResponse": [{
            "ack": ["Success"],
            "version": ["1.13.0"],
            "timestamp": ["2024-03-02T10:00:00.000Z"],
            "searchResult": [{"@count": count.to_string(), "item": []}],
            "paginationOutput": [{
                "pageNumber": ["1"],
                "entriesPerPage": ["50"],
                "totalEntries": [total.to_string()]
            }]
        }]
    })
}

pub fn sold_item(n: usize, price: &str) -> Value {
    json!({
        "itemId": [format!("1000{}", n)],
        "title": [format!("Sold item {}", n)],
        "viewItemURL": [format!("https://www.ebay.com/itm/1000{}", n)],
        "sellingStatus": [{
            "currentPrice": [{"@currencyId": "USD", "__value__": price}],
            "convertedCurrentPrice": [{"@currencyId": "USD", "__value__": price}],
            "sellingState": ["EndedWithSales"]
        }],
        "listingInfo": [{"endTime": ["2024-03-01T18:22:05.000Z"]}]
    })
}

pub fn sold_body(prices: &[&str]) -> Value {
    let items: Vec<Value> = prices
        .iter()
        .enumerate()
        .map(|(n, price)| sold_item(n, price))
        .collect();
    json!({
        "findCompletedItemsResponse": [{
            "ack": ["Success"],
            "searchResult": [{"@count": items.len().to_string(), "item": items}],
            "paginationOutput": [{"totalEntries": [prices.len().to_string()]}]
        }]
    })
}

pub fn empty_sold_body() -> Value {
    json!({
        "findCompletedItemsResponse": [{
            "ack": ["Success"],
            "searchResult": [{"@count": "0"}],
            "paginationOutput": [{"totalEntries": ["0"]}]
        }]
    })
}
