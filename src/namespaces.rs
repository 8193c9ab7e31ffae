use crate::error::ClusterQueryError;
use crate::kubernetes::ClusterApi;
use crate::utils::contains_any;
use std::collections::BTreeSet;
use tracing::debug;

/// Namespaces whose name contains at least one of `keywords`, sorted and
/// without duplicates. No match is an empty list, not an error.
pub async fn resolve_namespaces<C, S>(
    cluster: &C,
    keywords: &[S],
) -> Result<Vec<String>, ClusterQueryError>
where
    C: ClusterApi + ?Sized,
    S: AsRef<str>,
{
    let matched: BTreeSet<String> = cluster
        .list_namespaces()
        .await?
        .into_iter()
        .filter(|ns| contains_any(ns, keywords))
        .collect();

    debug!(
        "Namespaces matching {:?}: {:?}",
        keywords.iter().map(|k| k.as_ref()).collect::<Vec<&str>>(),
        matched
    );
    Ok(matched.into_iter().collect())
}
