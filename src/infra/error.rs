use std::{io, net::SocketAddr, path::PathBuf};

use thiserror::Error;

/// Startup failures: binding the listener, loading the catalog, installing telemetry.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to read catalog fixture `{}`: {source}", path.display())]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("catalog fixture is not valid JSON: {0}")]
    FixtureJson(#[from] serde_json::Error),
    #[error("catalog fixture lists unknown screen `{slug}`")]
    FixtureScreen { slug: String },
    #[error("invalid catalog base url `{url}`: {source}")]
    CatalogUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build catalog client: {0}")]
    CatalogClient(#[source] reqwest::Error),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

impl InfraError {
    pub fn bind(addr: SocketAddr, source: io::Error) -> Self {
        Self::Bind { addr, source }
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_failure_names_the_address() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().expect("addr");
        let error = InfraError::bind(addr, io::Error::from(io::ErrorKind::AddrInUse));
        assert!(error.to_string().starts_with("failed to bind 127.0.0.1:8080: "));
    }

    #[test]
    fn fixture_read_failure_names_the_path() {
        let error = InfraError::FixtureRead {
            path: PathBuf::from("fixtures/missing.json"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(
            error
                .to_string()
                .starts_with("failed to read catalog fixture `fixtures/missing.json`: ")
        );
    }
}
