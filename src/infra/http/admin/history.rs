//! Browser location as reported by the client with each panel request.

use metrics::counter;
use tracing::debug;

use crate::{
    application::{stream::StreamBuilder, table::UrlAdapter},
    domain::{resources::Resource, table::QueryParams},
    infra::telemetry::METRIC_HISTORY_REPLACE_TOTAL,
};

/// Location of one list screen. Writes are held until they are flushed into
/// the response as a `replaceState` call.
#[derive(Debug, Clone)]
pub(super) struct PostedLocation {
    resource: Resource,
    current: QueryParams,
    replaced: Option<QueryParams>,
}

impl PostedLocation {
    pub(super) fn new(resource: Resource, raw_query: &str) -> Self {
        Self {
            resource,
            current: QueryParams::parse(raw_query),
            replaced: None,
        }
    }

    pub(super) fn path(&self) -> String {
        format!("/{}", self.resource.slug())
    }

    pub(super) fn current(&self) -> &QueryParams {
        &self.current
    }

    /// Queue the pending replacement, if any, on `stream`.
    pub(super) fn flush(&mut self, stream: &mut StreamBuilder) -> bool {
        let Some(query) = self.replaced.take() else {
            return false;
        };

        counter!(METRIC_HISTORY_REPLACE_TOTAL, "resource" => self.resource.slug()).increment(1);
        stream.push_history_replace(&self.path(), &query.to_query_string());
        true
    }
}

impl UrlAdapter for PostedLocation {
    fn read(&self) -> QueryParams {
        self.current.clone()
    }

    fn write(&mut self, params: QueryParams) {
        debug!(
            target = "reelboard::http::admin::history",
            resource = self.resource.slug(),
            query = %params,
            "location replaced"
        );
        self.current = params.clone();
        self.replaced = Some(params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_emits_only_after_write() {
        let mut location = PostedLocation::new(Resource::Tags, "?page=1&page_size=30");
        let mut stream = StreamBuilder::new();
        assert!(!location.flush(&mut stream));
        assert!(stream.is_empty());

        location.write(QueryParams::parse("page=2&page_size=30"));
        assert_eq!(location.current().to_query_string(), "page=2&page_size=30");
        assert!(location.flush(&mut stream));
        assert_eq!(stream.len(), 1);
        assert!(!location.flush(&mut stream));
    }
}
