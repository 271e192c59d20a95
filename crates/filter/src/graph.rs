//! The audience reference graph and its closure.
//!
//! Population registers one node per declaration and records which
//! declarations an audience tag asked for. [`AudienceIrGraph::build`] then
//! walks from the needed endpoints and types along reference edges and
//! returns the ids to keep.
//!
//! Population order does not matter. A mark may name a declaration that is
//! registered later, or never; the missing node only becomes an error when
//! `build` has to dereference it.

use crate::error::{FilterError, NodeKind};
use crate::filtered::FilteredIr;
use crate::ids::{
    endpoint_id, error_id, service_id, type_id, AudienceId, EndpointId, ErrorId, ServiceId, TypeId,
};
use crate::references::collect_referenced_types;
use sdkscope_ir::{DeclaredServiceName, DeclaredTypeName, ErrorDeclaration, HttpEndpoint};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, trace};

/// A declared type and the types that must travel with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub type_id: TypeId,
    pub descendants: BTreeSet<TypeId>,
}

/// A declared error and the types its payload mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNode {
    pub error_id: ErrorId,
    pub referenced_types: BTreeSet<TypeId>,
}

/// An endpoint with the types (request and response) and errors it mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointNode {
    pub endpoint_id: EndpointId,
    pub referenced_types: BTreeSet<TypeId>,
    pub referenced_errors: BTreeSet<ErrorId>,
}

/// Reference graph over one IR, filtered for a fixed set of audiences.
///
/// Owned by a single writer: populate through `&mut self`, then call
/// [`build`](Self::build), which only reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudienceIrGraph {
    audiences: BTreeSet<AudienceId>,
    types: HashMap<TypeId, TypeNode>,
    errors: HashMap<ErrorId, ErrorNode>,
    endpoints: HashMap<EndpointId, EndpointNode>,
    types_needed_for_audience: BTreeSet<TypeId>,
    services_needed_for_audience: BTreeSet<ServiceId>,
    endpoints_needed_for_audience: BTreeSet<EndpointId>,
}

impl AudienceIrGraph {
    pub fn new<I>(audiences: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AudienceId>,
    {
        AudienceIrGraph {
            audiences: audiences.into_iter().map(Into::into).collect(),
            types: HashMap::new(),
            errors: HashMap::new(),
            endpoints: HashMap::new(),
            types_needed_for_audience: BTreeSet::new(),
            services_needed_for_audience: BTreeSet::new(),
            endpoints_needed_for_audience: BTreeSet::new(),
        }
    }

    pub fn audiences(&self) -> &BTreeSet<AudienceId> {
        &self.audiences
    }

    // ── Population ──────────────────────────────────────────────────

    /// Register a type. Registering the same name again replaces the node.
    pub fn add_type(&mut self, name: &DeclaredTypeName, descendants: &[DeclaredTypeName]) {
        let id = type_id(name);
        let node = TypeNode {
            type_id: id.clone(),
            descendants: descendants.iter().map(type_id).collect(),
        };
        trace!(type_id = %id, descendants = node.descendants.len(), "registered type");
        self.types.insert(id, node);
    }

    /// Seed `name` into the closure if any of `audiences` was requested.
    pub fn mark_type_for_audiences<S: AsRef<str>>(
        &mut self,
        name: &DeclaredTypeName,
        audiences: &[S],
    ) {
        if self.has_audience(audiences) {
            self.types_needed_for_audience.insert(type_id(name));
        }
    }

    /// Register an error; its node references every type in its payload.
    pub fn add_error(&mut self, error: &ErrorDeclaration) {
        let id = error_id(&error.name);
        let mut referenced_types = BTreeSet::new();
        if let Some(payload) = &error.type_ref {
            collect_referenced_types(payload, &mut referenced_types);
        }
        trace!(error_id = %id, types = referenced_types.len(), "registered error");
        self.errors.insert(
            id.clone(),
            ErrorNode {
                error_id: id,
                referenced_types,
            },
        );
    }

    /// Register an endpoint of `service`.
    pub fn add_endpoint(&mut self, service: &DeclaredServiceName, endpoint: &HttpEndpoint) {
        let id = endpoint_id(service, endpoint);
        let mut referenced_types = BTreeSet::new();
        if let Some(request) = &endpoint.request {
            collect_referenced_types(request, &mut referenced_types);
        }
        if let Some(response) = &endpoint.response {
            collect_referenced_types(response, &mut referenced_types);
        }
        let referenced_errors: BTreeSet<ErrorId> = endpoint
            .errors
            .iter()
            .map(|response_error| error_id(&response_error.error))
            .collect();
        trace!(
            endpoint_id = %id,
            types = referenced_types.len(),
            errors = referenced_errors.len(),
            "registered endpoint"
        );
        self.endpoints.insert(
            id.clone(),
            EndpointNode {
                endpoint_id: id,
                referenced_types,
                referenced_errors,
            },
        );
    }

    /// Seed `service` and each of `endpoints` if any of `audiences` was
    /// requested.
    pub fn mark_endpoint_for_audience<S: AsRef<str>>(
        &mut self,
        service: &DeclaredServiceName,
        endpoints: &[HttpEndpoint],
        audiences: &[S],
    ) {
        if !self.has_audience(audiences) {
            return;
        }
        self.services_needed_for_audience.insert(service_id(service));
        for endpoint in endpoints {
            self.endpoints_needed_for_audience
                .insert(endpoint_id(service, endpoint));
        }
    }

    fn has_audience<S: AsRef<str>>(&self, audiences: &[S]) -> bool {
        audiences
            .iter()
            .any(|audience| self.audiences.contains(audience.as_ref()))
    }

    // ── Closure ─────────────────────────────────────────────────────

    /// Compute the declarations to keep.
    ///
    /// Needed endpoints pull in their errors, the errors' payload types and
    /// their own request/response types. Needed types are then added
    /// directly. Each type added as a candidate also brings its direct
    /// descendants, but those descendants are not expanded further unless
    /// they are reached as candidates on their own.
    pub fn build(&self) -> Result<FilteredIr, FilterError> {
        let mut type_ids = BTreeSet::new();
        let mut error_ids = BTreeSet::new();

        for needed in &self.endpoints_needed_for_audience {
            let endpoint = self.endpoint_node(needed)?;
            for referenced in &endpoint.referenced_errors {
                if !error_ids.insert(referenced.clone()) {
                    continue;
                }
                let error = self.error_node(referenced)?;
                self.add_referenced_types(&mut type_ids, &error.referenced_types)?;
            }
            self.add_referenced_types(&mut type_ids, &endpoint.referenced_types)?;
        }
        self.add_referenced_types(&mut type_ids, &self.types_needed_for_audience)?;

        debug!(
            audiences = self.audiences.len(),
            endpoints = self.endpoints_needed_for_audience.len(),
            services = self.services_needed_for_audience.len(),
            errors = error_ids.len(),
            types = type_ids.len(),
            "built audience closure"
        );

        Ok(FilteredIr::new(
            type_ids,
            error_ids,
            self.services_needed_for_audience.clone(),
            self.endpoints_needed_for_audience.clone(),
        ))
    }

    fn add_referenced_types(
        &self,
        types: &mut BTreeSet<TypeId>,
        candidates: &BTreeSet<TypeId>,
    ) -> Result<(), FilterError> {
        for candidate in candidates {
            if types.contains(candidate) {
                continue;
            }
            types.insert(candidate.clone());
            let node = self.type_node(candidate)?;
            types.extend(node.descendants.iter().cloned());
        }
        Ok(())
    }

    // ── Lookups ─────────────────────────────────────────────────────

    fn type_node(&self, id: &TypeId) -> Result<&TypeNode, FilterError> {
        self.types
            .get(id)
            .ok_or_else(|| FilterError::dangling(NodeKind::Type, id))
    }

    fn error_node(&self, id: &ErrorId) -> Result<&ErrorNode, FilterError> {
        self.errors
            .get(id)
            .ok_or_else(|| FilterError::dangling(NodeKind::Error, id))
    }

    fn endpoint_node(&self, id: &EndpointId) -> Result<&EndpointNode, FilterError> {
        self.endpoints
            .get(id)
            .ok_or_else(|| FilterError::dangling(NodeKind::Endpoint, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdkscope_ir::{
        DeclarationPath, DeclaredErrorName, HttpMethod, ResponseError, TypeReference,
    };

    fn tname(name: &str) -> DeclaredTypeName {
        DeclaredTypeName::new(name)
    }

    fn tid(name: &str) -> TypeId {
        type_id(&tname(name))
    }

    fn service() -> DeclaredServiceName {
        DeclaredServiceName::new(DeclarationPath::new(["users"]))
    }

    fn error(name: &str, payload: Option<TypeReference>) -> ErrorDeclaration {
        ErrorDeclaration {
            name: DeclaredErrorName::new(name),
            type_ref: payload,
            status_code: None,
        }
    }

    fn endpoint(
        name: &str,
        request: Option<TypeReference>,
        response: Option<TypeReference>,
        errors: &[&str],
    ) -> HttpEndpoint {
        HttpEndpoint {
            name: name.to_string(),
            method: HttpMethod::Get,
            path: format!("/{}", name),
            request,
            response,
            errors: errors
                .iter()
                .map(|e| ResponseError {
                    error: DeclaredErrorName::new(*e),
                    docs: None,
                })
                .collect(),
            audiences: vec![],
        }
    }

    #[test]
    fn empty_graph_builds_empty_manifest() {
        let graph = AudienceIrGraph::new(["public"]);
        let filtered = graph.build().unwrap();
        assert!(filtered.types().is_empty());
        assert!(filtered.errors().is_empty());
        assert!(filtered.services().is_empty());
        assert!(filtered.endpoints().is_empty());
    }

    #[test]
    fn audience_match_is_any_of() {
        let mut graph = AudienceIrGraph::new(["internal"]);
        let ep = endpoint("get", None, None, &[]);
        graph.add_endpoint(&service(), &ep);
        graph.mark_endpoint_for_audience(&service(), std::slice::from_ref(&ep), &["external"]);
        let filtered = graph.build().unwrap();
        assert!(filtered.endpoints().is_empty());
        assert!(filtered.services().is_empty());

        graph.mark_endpoint_for_audience(
            &service(),
            std::slice::from_ref(&ep),
            &["external", "internal"],
        );
        let filtered = graph.build().unwrap();
        assert!(filtered.has_endpoint(&endpoint_id(&service(), &ep)));
        assert!(filtered.has_service(&service_id(&service())));
    }

    #[test]
    fn empty_tag_list_never_matches() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("User"), &[]);
        graph.mark_type_for_audiences::<&str>(&tname("User"), &[]);
        assert!(graph.build().unwrap().types().is_empty());
    }

    #[test]
    fn endpoint_reaches_error_payload_types() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("T"), &[]);
        graph.add_error(&error("X", Some(TypeReference::named(tname("T")))));
        let ep = endpoint("get", None, None, &["X"]);
        graph.add_endpoint(&service(), &ep);
        graph.mark_endpoint_for_audience(&service(), std::slice::from_ref(&ep), &["public"]);

        let filtered = graph.build().unwrap();
        assert!(filtered.has_type(&tid("T")));
        assert!(filtered.has_error(&error_id(&DeclaredErrorName::new("X"))));
    }

    #[test]
    fn request_and_response_types_are_unioned() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("CreateUser"), &[]);
        graph.add_type(&tname("User"), &[]);
        let ep = endpoint(
            "create",
            Some(TypeReference::named(tname("CreateUser"))),
            Some(TypeReference::list(TypeReference::named(tname("User")))),
            &[],
        );
        graph.add_endpoint(&service(), &ep);
        graph.mark_endpoint_for_audience(&service(), std::slice::from_ref(&ep), &["public"]);

        let filtered = graph.build().unwrap();
        assert_eq!(
            filtered.types(),
            &BTreeSet::from([tid("CreateUser"), tid("User")])
        );
    }

    #[test]
    fn marked_type_is_kept_without_references() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("Standalone"), &[]);
        graph.mark_type_for_audiences(&tname("Standalone"), &["public"]);
        let filtered = graph.build().unwrap();
        assert!(filtered.has_type(&tid("Standalone")));
    }

    #[test]
    fn mark_before_add_is_honoured() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.mark_type_for_audiences(&tname("Late"), &["public"]);
        graph.add_type(&tname("Late"), &[]);
        assert!(graph.build().unwrap().has_type(&tid("Late")));
    }

    #[test]
    fn descendant_expansion_is_single_level() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("A"), &[tname("B")]);
        graph.add_type(&tname("B"), &[tname("C")]);
        graph.add_type(&tname("C"), &[]);
        graph.mark_type_for_audiences(&tname("A"), &["public"]);

        let filtered = graph.build().unwrap();
        assert!(filtered.has_type(&tid("A")));
        assert!(filtered.has_type(&tid("B")));
        assert!(!filtered.has_type(&tid("C")));
    }

    #[test]
    fn every_direct_descendant_is_kept() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("Pet"), &[tname("Cat"), tname("Dog")]);
        graph.mark_type_for_audiences(&tname("Pet"), &["public"]);

        let filtered = graph.build().unwrap();
        assert_eq!(
            filtered.types(),
            &BTreeSet::from([tid("Cat"), tid("Dog"), tid("Pet")])
        );
    }

    #[test]
    fn descendant_reached_independently_is_expanded() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("A"), &[tname("B")]);
        graph.add_type(&tname("B"), &[tname("C")]);
        graph.add_type(&tname("C"), &[]);
        let ep = endpoint("get", None, Some(TypeReference::named(tname("B"))), &[]);
        graph.add_endpoint(&service(), &ep);
        graph.mark_endpoint_for_audience(&service(), std::slice::from_ref(&ep), &["public"]);

        let filtered = graph.build().unwrap();
        assert!(filtered.has_type(&tid("B")));
        assert!(filtered.has_type(&tid("C")));
        assert!(!filtered.has_type(&tid("A")));
    }

    #[test]
    fn descendant_already_retained_as_descendant_is_not_expanded() {
        // A is expanded first and inserts B as a descendant. When B later
        // shows up as a candidate it is already present, so C stays out.
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("A"), &[tname("B")]);
        graph.add_type(&tname("B"), &[tname("C")]);
        graph.add_type(&tname("C"), &[]);
        graph.mark_type_for_audiences(&tname("A"), &["public"]);
        graph.mark_type_for_audiences(&tname("B"), &["public"]);

        let filtered = graph.build().unwrap();
        assert!(filtered.has_type(&tid("B")));
        assert!(!filtered.has_type(&tid("C")));
    }

    #[test]
    fn cyclic_descendants_terminate() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("A"), &[tname("B")]);
        graph.add_type(&tname("B"), &[tname("A")]);
        graph.mark_type_for_audiences(&tname("A"), &["public"]);
        graph.mark_type_for_audiences(&tname("B"), &["public"]);
        let filtered = graph.build().unwrap();
        assert_eq!(filtered.types().len(), 2);
    }

    #[test]
    fn descendants_need_no_node_of_their_own() {
        // Descendants are inserted without a lookup.
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("A"), &[tname("Ghost")]);
        graph.mark_type_for_audiences(&tname("A"), &["public"]);
        let filtered = graph.build().unwrap();
        assert!(filtered.has_type(&tid("Ghost")));
    }

    #[test]
    fn missing_error_is_dangling() {
        let mut graph = AudienceIrGraph::new(["public"]);
        let ep = endpoint("get", None, None, &["NeverAdded"]);
        graph.add_endpoint(&service(), &ep);
        graph.mark_endpoint_for_audience(&service(), std::slice::from_ref(&ep), &["public"]);

        let err = graph.build().unwrap_err();
        assert_eq!(
            err,
            FilterError::DanglingReference {
                kind: NodeKind::Error,
                id: ":NeverAdded".to_string(),
            }
        );
    }

    #[test]
    fn missing_endpoint_is_dangling() {
        let mut graph = AudienceIrGraph::new(["public"]);
        let ep = endpoint("get", None, None, &[]);
        graph.mark_endpoint_for_audience(&service(), std::slice::from_ref(&ep), &["public"]);
        let err = graph.build().unwrap_err();
        assert!(matches!(
            err,
            FilterError::DanglingReference {
                kind: NodeKind::Endpoint,
                ..
            }
        ));
    }

    #[test]
    fn missing_marked_type_is_dangling() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.mark_type_for_audiences(&tname("Nowhere"), &["public"]);
        let err = graph.build().unwrap_err();
        assert_eq!(err.to_string(), "failed to find type node with id :Nowhere");
    }

    #[test]
    fn unmarked_dangling_references_are_harmless() {
        // Only dereferenced ids must exist.
        let mut graph = AudienceIrGraph::new(["public"]);
        let ep = endpoint("get", None, Some(TypeReference::named(tname("Missing"))), &[]);
        graph.add_endpoint(&service(), &ep);
        assert!(graph.build().is_ok());
    }

    #[test]
    fn repeated_population_is_idempotent() {
        let ep = endpoint("get", None, Some(TypeReference::named(tname("User"))), &["E"]);
        let err = error("E", Some(TypeReference::named(tname("User"))));

        let mut once = AudienceIrGraph::new(["public"]);
        once.add_type(&tname("User"), &[]);
        once.add_error(&err);
        once.add_endpoint(&service(), &ep);

        let mut twice = once.clone();
        twice.add_type(&tname("User"), &[]);
        twice.add_error(&err);
        twice.add_endpoint(&service(), &ep);

        assert_eq!(once, twice);
    }

    #[test]
    fn add_type_last_write_wins() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("A"), &[tname("B")]);
        graph.add_type(&tname("A"), &[]);
        graph.mark_type_for_audiences(&tname("A"), &["public"]);
        let filtered = graph.build().unwrap();
        assert!(!filtered.has_type(&tid("B")));
    }

    #[test]
    fn build_twice_is_stable() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("A"), &[tname("B")]);
        graph.mark_type_for_audiences(&tname("A"), &["public"]);
        assert_eq!(graph.build().unwrap(), graph.build().unwrap());
    }

    #[test]
    fn shared_error_is_processed_once() {
        let mut graph = AudienceIrGraph::new(["public"]);
        graph.add_type(&tname("Detail"), &[]);
        graph.add_error(&error("Shared", Some(TypeReference::named(tname("Detail")))));
        let a = endpoint("a", None, None, &["Shared"]);
        let b = endpoint("b", None, None, &["Shared"]);
        graph.add_endpoint(&service(), &a);
        graph.add_endpoint(&service(), &b);
        graph.mark_endpoint_for_audience(&service(), &[a, b], &["public"]);

        let filtered = graph.build().unwrap();
        assert_eq!(filtered.errors().len(), 1);
        assert_eq!(filtered.endpoints().len(), 2);
        assert_eq!(filtered.services().len(), 1);
        assert!(filtered.has_type(&tid("Detail")));
    }
}
