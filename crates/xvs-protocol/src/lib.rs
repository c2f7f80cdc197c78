//! Wire protocol for xvsync.
//!
//! Describes how job templates are addressed on the server, how requests are
//! authenticated, and how the `extra_vars` payload is carried: a YAML document
//! encoded as a string inside a JSON object.

pub mod auth;
pub mod codec;
pub mod endpoint;
pub mod error;

pub use auth::{encode_credentials, Credentials};
pub use codec::{decode_job_template, encode_patch, JobTemplate, PatchEnvelope, EXTRA_VARS_FIELD};
pub use endpoint::{endpoints, job_template_path};
pub use error::{ProtocolError, ProtocolResult};
