use serde::Serialize;
use serde_json::Value as Json;
use xvs_types::VariableMap;

use crate::error::{ProtocolError, ProtocolResult};

/// Name of the job template field holding the variable payload.
pub const EXTRA_VARS_FIELD: &str = "extra_vars";

/// The parts of a job template response xvsync cares about.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobTemplate {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub extra_vars: VariableMap,
}

/// Body of a PATCH request updating a job template's variables.
///
/// `extra_vars` is the YAML rendering of the map, carried as a JSON string.
#[derive(Clone, Debug, Serialize)]
pub struct PatchEnvelope<'a> {
    pub extra_vars: &'a str,
}

/// Decode a job template response body.
///
/// The body is a JSON object whose `extra_vars` field is a string holding a
/// YAML document, so the payload is decoded twice.
pub fn decode_job_template(body: &[u8]) -> ProtocolResult<JobTemplate> {
    let json: Json = serde_json::from_slice(body)?;
    let Json::Object(object) = json else {
        return Err(ProtocolError::UnexpectedShape("response is not a JSON object".into()));
    };
    let payload = match object.get(EXTRA_VARS_FIELD) {
        Some(Json::String(s)) => s.as_str(),
        Some(other) => {
            return Err(ProtocolError::UnexpectedShape(format!(
                "{EXTRA_VARS_FIELD} is {}, expected a string",
                json_kind(other)
            )))
        }
        None => {
            return Err(ProtocolError::UnexpectedShape(format!(
                "missing field {EXTRA_VARS_FIELD}"
            )))
        }
    };
    let extra_vars = VariableMap::from_yaml_str(payload)?;
    tracing::trace!(len = extra_vars.len(), "decoded extra_vars payload");
    Ok(JobTemplate {
        id: object.get("id").and_then(Json::as_u64),
        name: object.get("name").and_then(Json::as_str).map(str::to_string),
        extra_vars,
    })
}

/// Encode a variable map as a PATCH body.
///
/// The YAML document is JSON-escaped, so line breaks become `\n` and the body
/// is a single line.
pub fn encode_patch(vars: &VariableMap) -> ProtocolResult<Vec<u8>> {
    let yaml = vars.to_yaml_string()?;
    Ok(serde_json::to_vec(&PatchEnvelope { extra_vars: &yaml })?)
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
