//! Redirect policy.
//!
//! hyper does not follow redirects, and generic redirect handling tends to
//! drop the `Authorization` header. The client follows them itself using the
//! rules here and re-authenticates every hop.

use http::uri::{Parts, PathAndQuery};
use http::{Method, StatusCode, Uri};

use crate::error::{ClientError, ClientResult};

/// Returns `true` for the redirect statuses the client follows.
pub fn is_followed(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Method to use for the next hop, and whether the request body is resent.
///
/// 301/302/303 turn anything but GET and HEAD into a bodiless GET; 307/308
/// preserve both the method and the body.
pub fn next_method(status: StatusCode, method: &Method) -> (Method, bool) {
    match status {
        StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT => (method.clone(), true),
        _ if method == Method::GET || method == Method::HEAD => (method.clone(), false),
        _ => (Method::GET, false),
    }
}

/// Returns `true` when following `from` to `to` sends the credentials to a
/// different host or over plain HTTP after HTTPS.
pub fn exposes_credentials(from: &Uri, to: &Uri) -> bool {
    let downgraded = from.scheme_str() == Some("https") && to.scheme_str() == Some("http");
    downgraded || from.authority() != to.authority()
}

/// Resolve a `Location` header value against the URL that produced it.
pub fn resolve_location(current: &Uri, location: &str) -> ClientResult<Uri> {
    let location = location.trim();
    if location.is_empty() {
        return Err(invalid(location, "empty location"));
    }
    if let Some(rest) = location.strip_prefix("//") {
        let scheme = current.scheme_str().unwrap_or("https");
        return format!("{scheme}://{rest}")
            .parse()
            .map_err(|e| invalid(location, e));
    }
    if location.contains("://") {
        return location.parse().map_err(|e| invalid(location, e));
    }

    let path = if location.starts_with('/') {
        location.to_string()
    } else {
        let base = current.path();
        let dir = &base[..base.rfind('/').map_or(0, |i| i + 1)];
        format!("{dir}{location}")
    };
    with_path(current, &path)
}

/// Replace the path (and query) of `uri`.
pub fn with_path(uri: &Uri, path_and_query: &str) -> ClientResult<Uri> {
    let mut parts: Parts = uri.clone().into_parts();
    parts.path_and_query =
        Some(PathAndQuery::try_from(path_and_query).map_err(|e| invalid(path_and_query, e))?);
    Uri::from_parts(parts).map_err(|e| invalid(path_and_query, e))
}

fn invalid(what: &str, err: impl std::fmt::Display) -> ClientError {
    ClientError::InvalidUrl(format!("{what}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn followed_statuses() {
        assert!(is_followed(StatusCode::FOUND));
        assert!(is_followed(StatusCode::PERMANENT_REDIRECT));
        assert!(!is_followed(StatusCode::NOT_MODIFIED));
        assert!(!is_followed(StatusCode::MULTIPLE_CHOICES));
        assert!(!is_followed(StatusCode::OK));
    }

    #[test]
    fn see_other_turns_patch_into_get() {
        assert_eq!(next_method(StatusCode::SEE_OTHER, &Method::PATCH), (Method::GET, false));
        assert_eq!(next_method(StatusCode::FOUND, &Method::PATCH), (Method::GET, false));
    }

    #[test]
    fn temporary_redirect_keeps_patch_and_body() {
        assert_eq!(next_method(StatusCode::TEMPORARY_REDIRECT, &Method::PATCH), (Method::PATCH, true));
        assert_eq!(next_method(StatusCode::PERMANENT_REDIRECT, &Method::PATCH), (Method::PATCH, true));
    }

    #[test]
    fn get_stays_get() {
        assert_eq!(next_method(StatusCode::MOVED_PERMANENTLY, &Method::GET), (Method::GET, false));
    }

    #[test]
    fn same_host_redirect_keeps_credentials_private() {
        assert!(!exposes_credentials(&uri("https://a/x/"), &uri("https://a/y/")));
        assert!(!exposes_credentials(&uri("http://a/x/"), &uri("https://a/x/")));
    }

    #[test]
    fn cross_host_or_downgrade_exposes_credentials() {
        assert!(exposes_credentials(&uri("https://a/x/"), &uri("https://b/x/")));
        assert!(exposes_credentials(&uri("https://a/x/"), &uri("https://a:8443/x/")));
        assert!(exposes_credentials(&uri("https://a/x/"), &uri("http://a/x/")));
    }

    #[test]
    fn absolute_location() {
        let next = resolve_location(&uri("http://a/x/"), "https://b:8443/y/").unwrap();
        assert_eq!(next, uri("https://b:8443/y/"));
    }

    #[test]
    fn scheme_relative_location() {
        let next = resolve_location(&uri("https://a/x/"), "//b/y/").unwrap();
        assert_eq!(next, uri("https://b/y/"));
    }

    #[test]
    fn absolute_path_location() {
        let next = resolve_location(&uri("https://a:8080/api/v1/job_templates/1"), "/api/v1/job_templates/1/").unwrap();
        assert_eq!(next, uri("https://a:8080/api/v1/job_templates/1/"));
    }

    #[test]
    fn relative_path_location() {
        let next = resolve_location(&uri("https://a/api/v1/job_templates/1/"), "moved/").unwrap();
        assert_eq!(next, uri("https://a/api/v1/job_templates/1/moved/"));
        let next = resolve_location(&uri("https://a/api/old"), "new?x=1").unwrap();
        assert_eq!(next, uri("https://a/api/new?x=1"));
    }

    #[test]
    fn empty_location_rejected() {
        assert!(matches!(resolve_location(&uri("https://a/"), " "), Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn with_path_replaces_path() {
        let next = with_path(&uri("https://a/tower/"), "/tower/api/v1/job_templates/3/").unwrap();
        assert_eq!(next.to_string(), "https://a/tower/api/v1/job_templates/3/");
    }
}
