use thiserror::Error;

/// Any failure to list, fetch or stream from the cluster API.
#[derive(Debug, Error)]
pub enum ClusterQueryError {
    #[error("failed to list {what}: {message}")]
    List { what: String, message: String },

    #[error("failed to get {kind} {name:?} in namespace {namespace}: {message}")]
    Get {
        kind: String,
        namespace: String,
        name: String,
        message: String,
    },

    #[error("failed to read logs of pod {pod} in namespace {namespace}: {message}")]
    Logs {
        namespace: String,
        pod: String,
        message: String,
    },
}

impl ClusterQueryError {
    pub fn list(what: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::List {
            what: what.into(),
            message: err.to_string(),
        }
    }

    pub fn logs(namespace: &str, pod: &str, err: impl std::fmt::Display) -> Self {
        Self::Logs {
            namespace: namespace.to_string(),
            pod: pod.to_string(),
            message: err.to_string(),
        }
    }
}
