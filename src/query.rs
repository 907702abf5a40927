use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::{Config, FinderConfig};
use crate::error::SearchError;

/// Coarse item-condition filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Condition {
    #[default]
    Any,
    New,
    Used,
}

impl Condition {
    /// Finding API condition id, `None` when the filter is unset.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Condition::Any => None,
            Condition::New => Some("1000"),
            Condition::Used => Some("3000"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Condition::Any => "All Conditions",
            Condition::New => "New",
            Condition::Used => "Used",
        }
    }
}

impl FromStr for Condition {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" | "all" => Ok(Condition::Any),
            "new" | "1000" => Ok(Condition::New),
            "used" | "3000" => Ok(Condition::Used),
            other => Err(SearchError::InvalidQuery(format!(
                "unknown condition `{}`",
                other
            ))),
        }
    }
}

/// The two Finding API operations a search issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FindItemsByKeywords,
    FindCompletedItems,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::FindItemsByKeywords => "findItemsByKeywords",
            Operation::FindCompletedItems => "findCompletedItems",
        }
    }

    /// Key of the top-level envelope in the JSON response.
    pub fn response_key(&self) -> &'static str {
        match self {
            Operation::FindItemsByKeywords => "findItemsByKeywordsResponse",
            Operation::FindCompletedItems => "findCompletedItemsResponse",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SearchQuery {
    pub keyword: String,
    pub condition: Condition,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>, condition: Condition) -> Self {
        Self {
            keyword: keyword.into(),
            condition,
        }
    }

    /// A blank keyword means "nothing to search for" rather than an error.
    pub fn is_blank(&self) -> bool {
        self.keyword.trim().is_empty()
    }

    /// Query string pairs for one operation.
    ///
    /// The credential is attached by the transport, not here.
    pub fn params(&self, operation: Operation, config: &FinderConfig) -> Vec<(String, String)> {
        let mut params = vec![
            pair("OPERATION-NAME", operation.name()),
            pair("SERVICE-VERSION", Config::SERVICE_VERSION),
            pair("RESPONSE-DATA-FORMAT", Config::RESPONSE_DATA_FORMAT),
            pair("REST-PAYLOAD", "true"),
            pair("keywords", self.keyword.trim()),
        ];

        let mut filter_index = 0;
        if let Some(code) = self.condition.code() {
            push_filter(&mut params, filter_index, "Condition", code);
            filter_index += 1;
        }
        if operation == Operation::FindCompletedItems {
            push_filter(&mut params, filter_index, "SoldItemsOnly", "true");
        }

        params.push(pair(
            "paginationInput.entriesPerPage",
            &config.entries_per_page.to_string(),
        ));
        params.push(pair(
            "paginationInput.pageNumber",
            &Config::PAGE_NUMBER.to_string(),
        ));
        params
    }
}

fn pair(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}

fn push_filter(params: &mut Vec<(String, String)>, index: usize, name: &str, value: &str) {
    params.push(pair(&format!("itemFilter({}).name", index), name));
    params.push(pair(&format!("itemFilter({}).value", index), value));
}

/// Look up a single parameter value by key.
pub fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
