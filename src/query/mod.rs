//! Alarm query compilation
//!
//! Turns the checked filters of a [`FilterSet`] into the query string used by
//! the alarms data grid and publishes it to a [`QuerySink`].

pub mod compiler;
pub mod sink;

pub use compiler::{BASE_QUERY, compile, format_timestamp};
pub use sink::{CurrentQuery, QuerySink};

use crate::filter::{FilterError, FilterSet};
use crate::visibility::{VisibilityConfiguration, VisibilityError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Visibility(#[from] VisibilityError),
}

/// Keeps the last compiled query until it is refreshed into a sink
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query: String,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            query: BASE_QUERY.to_string(),
        }
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(
        &mut self,
        filters: &FilterSet,
        configuration: &VisibilityConfiguration,
    ) -> Result<&str, QueryError> {
        self.query = compile(filters.filters(), &filters.ranges, configuration)?;
        Ok(&self.query)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Publish the last built query
    pub fn refresh(&self, sink: &mut dyn QuerySink) {
        sink.publish(&self.query);
    }
}
