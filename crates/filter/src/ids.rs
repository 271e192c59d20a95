//! Stable string identifiers for graph nodes.
//!
//! Every declaration kind gets its own id newtype so a type id can never be
//! looked up in the error map by accident. Ids are derived from declared
//! names only; two declarations share an id iff they share a declared name
//! (and, for endpoints, a service).
//!
//! Encoding: each path segment is percent-escaped and followed by `/`, then
//! `:` and the escaped simple name. Escaping `%`, `/` and `:` keeps the
//! separators unambiguous, and the trailing `/` per segment distinguishes
//! an empty path from a path holding one empty segment.

use sdkscope_ir::{
    DeclarationPath, DeclaredErrorName, DeclaredServiceName, DeclaredTypeName, HttpEndpoint,
};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifies a declared type.
    TypeId
);
string_id!(
    /// Identifies a declared error.
    ErrorId
);
string_id!(
    /// Identifies a declared service.
    ServiceId
);
string_id!(
    /// Identifies an endpoint within its service.
    EndpointId
);
string_id!(
    /// A requested audience. Unlike the other ids this is the audience
    /// name verbatim.
    AudienceId
);

impl AudienceId {
    pub fn new(name: impl Into<String>) -> Self {
        AudienceId(name.into())
    }
}

impl From<&str> for AudienceId {
    fn from(s: &str) -> Self {
        AudienceId::new(s)
    }
}

impl From<String> for AudienceId {
    fn from(s: String) -> Self {
        AudienceId(s)
    }
}

pub fn type_id(name: &DeclaredTypeName) -> TypeId {
    TypeId(qualified(&name.path, &name.name))
}

pub fn error_id(name: &DeclaredErrorName) -> ErrorId {
    ErrorId(qualified(&name.path, &name.name))
}

pub fn service_id(name: &DeclaredServiceName) -> ServiceId {
    ServiceId(encode_path(&name.path))
}

pub fn endpoint_id(service: &DeclaredServiceName, endpoint: &HttpEndpoint) -> EndpointId {
    let mut id = encode_path(&service.path);
    id.push(':');
    escape_into(&endpoint.name, &mut id);
    EndpointId(id)
}

fn qualified(path: &DeclarationPath, name: &str) -> String {
    let mut id = encode_path(path);
    id.push(':');
    escape_into(name, &mut id);
    id
}

fn encode_path(path: &DeclarationPath) -> String {
    let mut out = String::new();
    for segment in path.segments() {
        escape_into(segment, &mut out);
        out.push('/');
    }
    out
}

fn escape_into(raw: &str, out: &mut String) {
    for ch in raw.chars() {
        match ch {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            ':' => out.push_str("%3A"),
            _ => out.push(ch),
        }
    }
}
