use serde::Serialize;

/// Marker for cluster-identifying data that should be masked before a
/// failure leaves the process. Nothing populates it yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sensitive {
    pub unmasked: String,
    pub masked: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub text: String,
    pub sensitive: Vec<Sensitive>,
}

impl Failure {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sensitive: Vec::new(),
        }
    }
}

/// One observed problem. `kind` and `name` are empty when the problem is a
/// failed query rather than a specific resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticResult {
    pub kind: String,
    pub name: String,
    pub failures: Vec<Failure>,
}

impl DiagnosticResult {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, failure: Failure) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            failures: vec![failure],
        }
    }

    /// A result for a query that could not be answered at all.
    pub fn query_error(text: impl Into<String>) -> Self {
        Self {
            failures: vec![Failure::new(text)],
            ..Default::default()
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub analyzer: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub results: Vec<DiagnosticResult>,
}
