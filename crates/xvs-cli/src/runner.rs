use anyhow::Context;
use tracing::{debug, info, warn};
use xvs_client::JobTemplateStore;
use xvs_merge::merge;
use xvs_protocol::encode_patch;
use xvs_types::VariableMap;

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::report;

/// Totals for a completed batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub patched: usize,
    pub skipped: usize,
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Fetch, merge and write back every job template in `config.ids`, in order.
///
/// The first failure stops the batch; job templates after it are not touched.
pub async fn run_batch<S>(config: &SyncConfig, store: &S, local: &VariableMap) -> anyhow::Result<BatchSummary>
where
    S: JobTemplateStore + ?Sized,
{
    let mut summary = BatchSummary::default();
    let total = config.ids.len();
    debug!("strategy is '{}', confirm is {}", config.strategy, config.confirm);

    for (n, id) in config.ids.iter().enumerate() {
        debug!("at job template {id} ({}/{total})", n + 1);

        let template = store
            .fetch(id)
            .await
            .map_err(SyncError::from)
            .with_context(|| format!("fetching job template {id}"))?;

        debug!(
            remote_id = ?template.id,
            "unmodified extra_vars (len: {})",
            template.extra_vars.len()
        );
        for (key, value) in &template.extra_vars {
            debug!("\t{key}: {}", report::render_value(value));
        }

        let outcome = merge(template.extra_vars, local, config.strategy);
        report::print_changes(id, template.name.as_deref(), &outcome.changes, config.verbosity >= 3);
        debug!("patched length: {}", outcome.merged.len());

        summary.processed += 1;
        summary.added += outcome.changes.additions();
        summary.updated += outcome.changes.updates();
        summary.removed += outcome.changes.removals();

        if config.confirm {
            store
                .push(id, &outcome.merged)
                .await
                .map_err(SyncError::from)
                .with_context(|| format!("patching job template {id}"))?;
            info!("patched job template {id}");
            summary.patched += 1;
        } else {
            if let Ok(body) = encode_patch(&outcome.merged) {
                debug!("request body (not sent): {}", String::from_utf8_lossy(&body));
            }
            warn!("confirm is false, no changes are being made to job template {id}");
            summary.skipped += 1;
        }
    }

    Ok(summary)
}
