//! The filtered manifest: which declarations a generator should emit.

use crate::ids::{
    endpoint_id, error_id, service_id, type_id, EndpointId, ErrorId, ServiceId, TypeId,
};
use sdkscope_ir::{HttpService, IntermediateRepresentation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ids of the declarations retained for the requested audiences.
///
/// The sets are semantically unordered; they are stored sorted so that
/// serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredIr {
    types: BTreeSet<TypeId>,
    errors: BTreeSet<ErrorId>,
    services: BTreeSet<ServiceId>,
    endpoints: BTreeSet<EndpointId>,
}

impl FilteredIr {
    pub(crate) fn new(
        types: BTreeSet<TypeId>,
        errors: BTreeSet<ErrorId>,
        services: BTreeSet<ServiceId>,
        endpoints: BTreeSet<EndpointId>,
    ) -> Self {
        FilteredIr {
            types,
            errors,
            services,
            endpoints,
        }
    }

    /// A manifest that retains every declaration of `ir`.
    pub fn everything(ir: &IntermediateRepresentation) -> Self {
        FilteredIr {
            types: ir.types.iter().map(|t| type_id(&t.name)).collect(),
            errors: ir.errors.iter().map(|e| error_id(&e.name)).collect(),
            services: ir.services.iter().map(|s| service_id(&s.name)).collect(),
            endpoints: ir
                .services
                .iter()
                .flat_map(|s| s.endpoints.iter().map(move |e| endpoint_id(&s.name, e)))
                .collect(),
        }
    }

    pub fn has_type(&self, id: &TypeId) -> bool {
        self.types.contains(id)
    }

    pub fn has_error(&self, id: &ErrorId) -> bool {
        self.errors.contains(id)
    }

    pub fn has_service(&self, id: &ServiceId) -> bool {
        self.services.contains(id)
    }

    pub fn has_endpoint(&self, id: &EndpointId) -> bool {
        self.endpoints.contains(id)
    }

    pub fn types(&self) -> &BTreeSet<TypeId> {
        &self.types
    }

    pub fn errors(&self) -> &BTreeSet<ErrorId> {
        &self.errors
    }

    pub fn services(&self) -> &BTreeSet<ServiceId> {
        &self.services
    }

    pub fn endpoints(&self) -> &BTreeSet<EndpointId> {
        &self.endpoints
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.errors.is_empty()
            && self.services.is_empty()
            && self.endpoints.is_empty()
    }

    /// Copy `ir`, dropping every declaration this manifest does not retain.
    ///
    /// Declaration order is preserved. Retained services keep only their
    /// retained endpoints.
    pub fn apply(&self, ir: &IntermediateRepresentation) -> IntermediateRepresentation {
        let types = ir
            .types
            .iter()
            .filter(|t| self.has_type(&type_id(&t.name)))
            .cloned()
            .collect();
        let errors = ir
            .errors
            .iter()
            .filter(|e| self.has_error(&error_id(&e.name)))
            .cloned()
            .collect();
        let services = ir
            .services
            .iter()
            .filter(|s| self.has_service(&service_id(&s.name)))
            .map(|s| HttpService {
                name: s.name.clone(),
                audiences: s.audiences.clone(),
                endpoints: s
                    .endpoints
                    .iter()
                    .filter(|e| self.has_endpoint(&endpoint_id(&s.name, e)))
                    .cloned()
                    .collect(),
            })
            .collect();

        IntermediateRepresentation {
            api_name: ir.api_name.clone(),
            types,
            errors,
            services,
        }
    }
}
