//! Typed structs representing the IR JSON document.
//!
//! Field names follow the upstream camelCase convention. Sum types are
//! internally tagged by `_type` so that every variant, including the
//! payload-free ones, is a JSON object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level IR document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntermediateRepresentation {
    pub api_name: String,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
    #[serde(default)]
    pub errors: Vec<ErrorDeclaration>,
    #[serde(default)]
    pub services: Vec<HttpService>,
}

// ── Names ───────────────────────────────────────────────────────────

/// Location of a declaration inside the API definition, as a list of
/// directory/file segments. Empty for root-level declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationPath(pub Vec<String>);

impl DeclarationPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DeclarationPath(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DeclarationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// The declared name of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclaredTypeName {
    #[serde(default)]
    pub path: DeclarationPath,
    pub name: String,
}

impl DeclaredTypeName {
    /// A root-level type name.
    pub fn new(name: impl Into<String>) -> Self {
        DeclaredTypeName {
            path: DeclarationPath::default(),
            name: name.into(),
        }
    }

    pub fn with_path(path: DeclarationPath, name: impl Into<String>) -> Self {
        DeclaredTypeName {
            path,
            name: name.into(),
        }
    }
}

impl fmt::Display for DeclaredTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_qualified(f, &self.path, &self.name)
    }
}

/// The declared name of an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclaredErrorName {
    #[serde(default)]
    pub path: DeclarationPath,
    pub name: String,
}

impl DeclaredErrorName {
    pub fn new(name: impl Into<String>) -> Self {
        DeclaredErrorName {
            path: DeclarationPath::default(),
            name: name.into(),
        }
    }

    pub fn with_path(path: DeclarationPath, name: impl Into<String>) -> Self {
        DeclaredErrorName {
            path,
            name: name.into(),
        }
    }
}

impl fmt::Display for DeclaredErrorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_qualified(f, &self.path, &self.name)
    }
}

/// The declared name of a service. A service is identified by the file
/// that declares it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclaredServiceName {
    pub path: DeclarationPath,
}

impl DeclaredServiceName {
    pub fn new(path: DeclarationPath) -> Self {
        DeclaredServiceName { path }
    }
}

impl fmt::Display for DeclaredServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.path)
        }
    }
}

fn fmt_qualified(f: &mut fmt::Formatter<'_>, path: &DeclarationPath, name: &str) -> fmt::Result {
    if path.is_root() {
        write!(f, "{}", name)
    } else {
        write!(f, "{}/{}", path, name)
    }
}

// ── Type references ─────────────────────────────────────────────────

/// A reference to a type from a field, payload, request or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "camelCase")]
pub enum TypeReference {
    Container { container: ContainerType },
    Named(DeclaredTypeName),
    Primitive { primitive: PrimitiveType },
    Unknown,
    Void,
}

impl TypeReference {
    pub fn named(name: DeclaredTypeName) -> Self {
        TypeReference::Named(name)
    }

    pub fn primitive(primitive: PrimitiveType) -> Self {
        TypeReference::Primitive { primitive }
    }

    pub fn list(inner: TypeReference) -> Self {
        TypeReference::Container {
            container: ContainerType::List {
                list: Box::new(inner),
            },
        }
    }

    pub fn optional(inner: TypeReference) -> Self {
        TypeReference::Container {
            container: ContainerType::Optional {
                optional: Box::new(inner),
            },
        }
    }

    pub fn set(inner: TypeReference) -> Self {
        TypeReference::Container {
            container: ContainerType::Set {
                set: Box::new(inner),
            },
        }
    }

    pub fn map(key: TypeReference, value: TypeReference) -> Self {
        TypeReference::Container {
            container: ContainerType::Map {
                key_type: Box::new(key),
                value_type: Box::new(value),
            },
        }
    }

    pub fn literal(literal: Literal) -> Self {
        TypeReference::Container {
            container: ContainerType::Literal { literal },
        }
    }
}

/// Container wrappers around other type references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "camelCase")]
pub enum ContainerType {
    List {
        list: Box<TypeReference>,
    },
    Map {
        #[serde(rename = "keyType")]
        key_type: Box<TypeReference>,
        #[serde(rename = "valueType")]
        value_type: Box<TypeReference>,
    },
    Optional {
        optional: Box<TypeReference>,
    },
    Set {
        set: Box<TypeReference>,
    },
    Literal {
        literal: Literal,
    },
}

/// A literal value type (e.g. a discriminant fixed to one string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "camelCase")]
pub enum Literal {
    String { string: String },
    Boolean { boolean: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimitiveType {
    Integer,
    Long,
    Double,
    String,
    Boolean,
    DateTime,
    Date,
    Uuid,
    Base64,
}

// ── Types ───────────────────────────────────────────────────────────

/// A declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    pub name: DeclaredTypeName,
    /// Types that must be emitted whenever this one is (union members,
    /// extending subtypes).
    #[serde(default)]
    pub descendants: Vec<DeclaredTypeName>,
    #[serde(default)]
    pub audiences: Vec<String>,
    /// The type body (object fields, enum values, union variants). Kept as
    /// raw JSON: filtering never looks inside it, emitters do.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

// ── Errors ──────────────────────────────────────────────────────────

/// A declared error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDeclaration {
    pub name: DeclaredErrorName,
    /// Payload type carried by the error body, if any.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<TypeReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

// ── Services ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        };
        write!(f, "{}", s)
    }
}

/// An error an endpoint may respond with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    pub error: DeclaredErrorName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

/// A single HTTP endpoint of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEndpoint {
    /// Endpoint name, unique within its service.
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<TypeReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<TypeReference>,
    #[serde(default)]
    pub errors: Vec<ResponseError>,
    /// Endpoint-level audiences, in addition to those of the service.
    #[serde(default)]
    pub audiences: Vec<String>,
}

/// A declared HTTP service and its endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpService {
    pub name: DeclaredServiceName,
    #[serde(default)]
    pub audiences: Vec<String>,
    #[serde(default)]
    pub endpoints: Vec<HttpEndpoint>,
}
