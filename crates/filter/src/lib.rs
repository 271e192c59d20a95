//! sdkscope-filter: audience-scoped declaration filtering.
//!
//! Given an IR whose types, services and endpoints carry audience tags,
//! computes which declarations an SDK generated for a set of audiences
//! must contain. Tagged endpoints and types seed a reachability walk over
//! the references between declarations; the result is a [`FilteredIr`]
//! that generators consult for every declaration they might emit.
//!
//! The graph can be driven directly ([`AudienceIrGraph`]) or through
//! [`filter_ir`], which walks a whole IR in one pass.

pub mod driver;
pub mod error;
pub mod filtered;
pub mod graph;
pub mod ids;
pub mod references;
pub mod report;

pub use driver::{filter_ir, populate, AudienceSelection};
pub use error::{FilterError, NodeKind};
pub use filtered::FilteredIr;
pub use graph::{AudienceIrGraph, EndpointNode, ErrorNode, TypeNode};
pub use ids::{
    endpoint_id, error_id, service_id, type_id, AudienceId, EndpointId, ErrorId, ServiceId, TypeId,
};
pub use references::{collect_referenced_types, referenced_types};
pub use report::{
    compute_etag, DeclarationCounts, FilterReport, Finding, FindingSeverity, KindCount,
};
