use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::aggregate::AggregateResult;
use crate::config::FinderConfig;
use crate::error::Result;
use crate::normalize::{normalize_active, normalize_sold};
use crate::query::{Operation, SearchQuery};
use crate::transport::{FindingTransport, HttpTransport};

/// Runs the active and sold searches for a query and folds them into one result.
///
/// Each call is self-contained; the aggregator holds no per-search state.
pub struct SearchAggregator {
    transport: Arc<dyn FindingTransport>,
    config: FinderConfig,
}

impl SearchAggregator {
    pub fn new(transport: Arc<dyn FindingTransport>, config: FinderConfig) -> Self {
        Self { transport, config }
    }

    /// Aggregator backed by the real Finding service.
    pub fn with_http(config: FinderConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Search active and sold listings concurrently.
    ///
    /// A blank keyword yields an empty result without touching the network.
    /// If either request fails the whole search fails; no partial result is
    /// returned.
    pub async fn search(&self, query: &SearchQuery) -> Result<AggregateResult> {
        if query.is_blank() {
            debug!("Blank keyword, skipping search");
            return Ok(AggregateResult::default());
        }

        let start = Instant::now();
        info!(
            "Searching eBay for {:?} ({})",
            query.keyword.trim(),
            query.condition.label()
        );

        let active_params = query.params(Operation::FindItemsByKeywords, &self.config);
        let sold_params = query.params(Operation::FindCompletedItems, &self.config);

        let (active_body, sold_body) = tokio::try_join!(
            self.transport.get(Operation::FindItemsByKeywords, active_params),
            self.transport.get(Operation::FindCompletedItems, sold_params),
        )?;

        let active = normalize_active(&active_body)?;
        let sold = normalize_sold(&sold_body)?;
        let result = AggregateResult::from_pages(active, sold, self.config.display_limit)?;

        info!(
            "Search for {:?} finished in {:.1}s: {}",
            query.keyword.trim(),
            start.elapsed().as_secs_f32(),
            result.summary_line()
        );
        Ok(result)
    }
}
