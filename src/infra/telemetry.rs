use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

pub const METRIC_HISTORY_REPLACE_TOTAL: &str = "reelboard_table_history_replace_total";
pub const METRIC_CATALOG_REQUEST_TOTAL: &str = "reelboard_catalog_request_total";
pub const METRIC_CATALOG_ERROR_TOTAL: &str = "reelboard_catalog_error_total";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_HISTORY_REPLACE_TOTAL,
            Unit::Count,
            "Total number of location replacements emitted by list panels."
        );
        describe_counter!(
            METRIC_CATALOG_REQUEST_TOTAL,
            Unit::Count,
            "Total number of list pages requested from the catalog."
        );
        describe_counter!(
            METRIC_CATALOG_ERROR_TOTAL,
            Unit::Count,
            "Total number of failed catalog list requests."
        );
    });
}
