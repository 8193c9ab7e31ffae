use crate::error::ClusterQueryError;
use crate::kubernetes::ClusterApi;
use tracing::{debug, info};

pub const ERROR_MARKER: &str = "ERROR";
pub const WARNING_MARKER: &str = "WARNING";

/// How many lines before an error are searched for warnings.
pub const LOOKBACK_LINES: usize = 10;

/// Append each error line of one pod's log to `excerpt`, followed by the
/// warnings among the (up to) `LOOKBACK_LINES` lines before it.
///
/// The fold accumulator is the index of the first line not yet attributed to
/// an error, so a warning is never emitted for two errors. It starts at zero
/// for every call: pods are windowed independently.
pub fn append_error_context<S: AsRef<str>>(lines: &[S], excerpt: &mut String) {
    lines
        .iter()
        .enumerate()
        .fold(0usize, |last_error_index, (i, line)| {
            let line = line.as_ref();
            if !line.contains(ERROR_MARKER) {
                return last_error_index;
            }
            excerpt.push_str(line);
            excerpt.push('\n');

            let start = last_error_index.max(i.saturating_sub(LOOKBACK_LINES));
            for warning in lines[start..i]
                .iter()
                .map(AsRef::as_ref)
                .filter(|l| l.contains(WARNING_MARKER))
            {
                excerpt.push_str(warning);
                excerpt.push('\n');
            }
            i + 1
        });
}

/// Read the full log of every pod matching `label_selector` in `namespace`
/// and collect error context from each. Any unreadable log aborts the whole
/// excerpt.
pub async fn operator_log_excerpt<C: ClusterApi + ?Sized>(
    cluster: &C,
    namespace: &str,
    label_selector: &str,
) -> Result<String, ClusterQueryError> {
    let pods = cluster.list_pod_names(namespace, label_selector).await?;
    info!(
        "Scanning logs of {} operator pod(s) in namespace {}",
        pods.len(),
        namespace
    );

    let mut excerpt = String::new();
    for pod in &pods {
        let lines = cluster.pod_log(namespace, pod).await?;
        let before = excerpt.len();
        append_error_context(&lines, &mut excerpt);
        debug!(
            "Pod {}: {} line(s), {} byte(s) of context",
            pod,
            lines.len(),
            excerpt.len() - before
        );
    }
    Ok(excerpt)
}
