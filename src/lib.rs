//! eBay resell research.
//!
//! Looks up a keyword on the eBay Finding service twice, once for active
//! listings and once for completed sold listings, and condenses the answers
//! into an active count, a sold count, an average sold price and a short
//! list of recent sales.
//!
//! ```no_run
//! use ebay_resell::{Condition, FinderConfig, SearchAggregator, SearchQuery};
//!
//! # async fn run() -> ebay_resell::Result<()> {
//! let aggregator = SearchAggregator::with_http(FinderConfig::from_env()?)?;
//! let result = aggregator
//!     .search(&SearchQuery::new("nintendo switch", Condition::Used))
//!     .await?;
//! println!("{}", result.summary_line());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod aggregator;
pub mod config;
pub mod error;
pub mod normalize;
pub mod query;
pub mod session;
pub mod transport;

pub use aggregate::AggregateResult;
pub use aggregator::SearchAggregator;
pub use config::{Config, FinderConfig};
pub use error::{Result, SearchError};
pub use normalize::ListingSummary;
pub use query::{Condition, Operation, SearchQuery};
pub use session::{SearchSession, SearchState};
pub use transport::{FindingTransport, HttpTransport};
