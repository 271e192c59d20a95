//! One-pass population of the audience graph from a full IR.

use crate::error::FilterError;
use crate::filtered::FilteredIr;
use crate::graph::AudienceIrGraph;
use crate::ids::AudienceId;
use sdkscope_ir::IntermediateRepresentation;
use serde::Serialize;
use std::slice;
use tracing::debug;

/// Which audiences a run is generating for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "audiences", rename_all = "lowercase")]
pub enum AudienceSelection {
    /// No filtering: every declaration is emitted.
    All,
    /// Only declarations reachable from these audiences.
    Only(Vec<AudienceId>),
}

impl AudienceSelection {
    /// Build a selection from requested audience names. Asking for no
    /// audience in particular means asking for all of them.
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AudienceId>,
    {
        let audiences: Vec<AudienceId> = names.into_iter().map(Into::into).collect();
        if audiences.is_empty() {
            AudienceSelection::All
        } else {
            AudienceSelection::Only(audiences)
        }
    }
}

/// Compute the filtered manifest of `ir` for `selection`.
pub fn filter_ir(
    ir: &IntermediateRepresentation,
    selection: &AudienceSelection,
) -> Result<FilteredIr, FilterError> {
    match selection {
        AudienceSelection::All => {
            debug!(api = %ir.api_name, "no audiences requested, retaining everything");
            Ok(FilteredIr::everything(ir))
        }
        AudienceSelection::Only(audiences) => {
            let graph = populate(ir, audiences.iter().cloned());
            graph.build()
        }
    }
}

/// Register every declaration of `ir` and every audience tag on it.
pub fn populate<I>(ir: &IntermediateRepresentation, audiences: I) -> AudienceIrGraph
where
    I: IntoIterator<Item = AudienceId>,
{
    let mut graph = AudienceIrGraph::new(audiences);

    for declaration in &ir.types {
        graph.add_type(&declaration.name, &declaration.descendants);
        graph.mark_type_for_audiences(&declaration.name, &declaration.audiences);
    }

    for error in &ir.errors {
        graph.add_error(error);
    }

    for service in &ir.services {
        for endpoint in &service.endpoints {
            graph.add_endpoint(&service.name, endpoint);
            graph.mark_endpoint_for_audience(
                &service.name,
                slice::from_ref(endpoint),
                &endpoint.audiences,
            );
        }
        graph.mark_endpoint_for_audience(&service.name, &service.endpoints, &service.audiences);
    }

    debug!(
        api = %ir.api_name,
        types = ir.types.len(),
        errors = ir.errors.len(),
        services = ir.services.len(),
        "populated audience graph"
    );
    graph
}
