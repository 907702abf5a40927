use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Result, SearchError};
use crate::normalize::{ActivePage, ListingSummary, SoldPage};
use crate::query::Operation;

/// Display-ready statistics for one search.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregateResult {
    pub active_count: u64,
    pub sold_count: u64,
    /// Mean of all normalized sold prices, rounded to cents. Zero when nothing sold.
    pub average_sold_price: Decimal,
    /// First `display_limit` sold listings, in response order.
    pub sold_listings: Vec<ListingSummary>,
    pub active_total_entries: Option<u64>,
    pub sold_total_entries: Option<u64>,
}

impl AggregateResult {
    /// Fails only when the sold prices are too large to total.
    pub fn from_pages(active: ActivePage, sold: SoldPage, display_limit: usize) -> Result<Self> {
        let sold_count = sold.items.len() as u64;
        let average_sold_price = average_price(&sold.items)?;

        let mut sold_listings = sold.items;
        sold_listings.truncate(display_limit);

        Ok(Self {
            active_count: active.count,
            sold_count,
            average_sold_price,
            sold_listings,
            active_total_entries: active.total_entries,
            sold_total_entries: sold.total_entries,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.active_count == 0 && self.sold_count == 0
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{} active, {} sold, average sold price ${:.2}",
            self.active_count, self.sold_count, self.average_sold_price
        )
    }
}

pub fn average_price(listings: &[ListingSummary]) -> Result<Decimal> {
    if listings.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let total = listings
        .iter()
        .try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.price))
        .ok_or_else(|| {
            SearchError::shape(Operation::FindCompletedItems, "sold prices overflow their total")
        })?;
    Ok((total / Decimal::from(listings.len() as u64)).round_dp(2))
}
