use log::debug;

/// Receiver of compiled queries, e.g. the query variable of the alarms data grid
pub trait QuerySink {
    fn publish(&mut self, query: &str);
}

/// In-memory "current query" value.
///
/// Every publication counts as one execution of the downstream query, even
/// when the text did not change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentQuery {
    value: String,
    executions: usize,
}

impl CurrentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn executions(&self) -> usize {
        self.executions
    }
}

impl QuerySink for CurrentQuery {
    fn publish(&mut self, query: &str) {
        debug!("Publishing query: {}", query);
        self.value.clear();
        self.value.push_str(query);
        self.executions += 1;
    }
}
