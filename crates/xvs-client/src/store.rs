use async_trait::async_trait;
use xvs_protocol::JobTemplate;
use xvs_types::VariableMap;

use crate::error::ClientResult;

/// Read and write access to job templates' extra_vars.
#[async_trait]
pub trait JobTemplateStore: Send + Sync {
    /// Fetch the current state of a job template.
    async fn fetch(&self, id: &str) -> ClientResult<JobTemplate>;

    /// Overwrite a job template's extra_vars.
    async fn push(&self, id: &str, vars: &VariableMap) -> ClientResult<()>;
}
