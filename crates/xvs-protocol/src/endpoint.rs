/// HTTP endpoint paths on the job orchestration server.
pub mod endpoints {
    pub const JOB_TEMPLATES: &str = "/api/v1/job_templates/";
}

/// Path of a single job template, below the base URL's own path.
///
/// Always ends in a slash; the server redirects otherwise.
pub fn job_template_path(base_path: &str, id: &str) -> String {
    format!(
        "{}{}{}/",
        base_path.trim_end_matches('/'),
        endpoints::JOB_TEMPLATES,
        id
    )
}
