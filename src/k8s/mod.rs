//! Kubernetes operations

pub mod client;
pub mod pods;

pub use client::ClusterSource;
pub use pods::{ContainerImageRecord, KubePodLister, PodLister};

use thiserror::Error;

/// Fatal failure while talking to the control plane
#[derive(Error, Debug)]
pub enum EnumerationError {
    #[error("failed to load cluster credentials: {0}")]
    Config(String),

    #[error("cluster rejected credentials: {0}")]
    Authentication(String),

    #[error("cluster API unreachable: {0}")]
    Connectivity(String),

    #[error("cluster API request failed: {0}")]
    Api(String),
}

impl EnumerationError {
    /// Classify a client error by variant; API errors by their HTTP status
    pub fn from_kube(err: &kube::Error) -> Self {
        let message = error_chain(err);

        match err {
            kube::Error::Api(response) => Self::from_status(response.code, message),
            kube::Error::HyperError(_) | kube::Error::Service(_) | kube::Error::HttpError(_) => {
                EnumerationError::Connectivity(message)
            }
            kube::Error::Auth(_) => EnumerationError::Authentication(message),
            _ => Self::from_message(message),
        }
    }

    fn from_status(code: u16, message: String) -> Self {
        match code {
            401 | 403 => EnumerationError::Authentication(message),
            _ => EnumerationError::Api(message),
        }
    }

    /// Last resort for errors that carry no status or transport kind
    fn from_message(message: String) -> Self {
        let lower = message.to_lowercase();

        if lower.contains("unauthorized") || lower.contains("forbidden") {
            return EnumerationError::Authentication(message);
        }

        if lower.contains("connection refused") || lower.contains("dns error") {
            return EnumerationError::Connectivity(message);
        }

        EnumerationError::Api(message)
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = EnumerationError::from_status(401, "Unauthorized".to_string());
        assert!(matches!(err, EnumerationError::Authentication(_)));

        let err = EnumerationError::from_status(403, "pods is forbidden".to_string());
        assert!(matches!(err, EnumerationError::Authentication(_)));

        // A reachable server timing out internally is not a transport failure
        let err = EnumerationError::from_status(
            500,
            "ApiError: etcdserver: request timed out: InternalError".to_string(),
        );
        assert!(matches!(err, EnumerationError::Api(_)));

        let err = EnumerationError::from_status(
            404,
            "ApiError: (resourceVersion 4013): NotFound".to_string(),
        );
        assert!(matches!(err, EnumerationError::Api(_)));

        let err = EnumerationError::from_status(
            500,
            "ApiError: could not connect: InternalError".to_string(),
        );
        assert!(matches!(err, EnumerationError::Api(_)));
    }

    #[test]
    fn test_transport_error_is_connectivity() {
        let err = kube::Error::Service(Box::new(std::io::Error::other(
            "tcp connect error: Connection refused",
        )));
        let classified = EnumerationError::from_kube(&err);
        assert!(matches!(classified, EnumerationError::Connectivity(_)));
        assert!(classified.to_string().contains("Connection refused"));
    }

    #[test]
    fn test_message_fallback() {
        let err = EnumerationError::from_message("Unauthorized".to_string());
        assert!(matches!(err, EnumerationError::Authentication(_)));

        let err = EnumerationError::from_message("dns error: no such host".to_string());
        assert!(matches!(err, EnumerationError::Connectivity(_)));

        // Status-like digits in free text do not decide the kind
        let err = EnumerationError::from_message("resourceVersion 4013 expired".to_string());
        assert!(matches!(err, EnumerationError::Api(_)));
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let inner = std::io::Error::other("socket closed");
        let outer = anyhow::Error::new(inner).context("request failed");
        let text = error_chain(&*outer);
        assert_eq!(text, "request failed: socket closed");
    }
}
