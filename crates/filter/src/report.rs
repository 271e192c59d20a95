//! FilterReport: serializable summary of one filtering run.
//!
//! Carries the manifest itself, retained/total counts per declaration kind,
//! a content etag generators can use to skip regeneration, and a handful of
//! findings worth showing to a user.

use crate::driver::AudienceSelection;
use crate::filtered::FilteredIr;
use crate::ids::{endpoint_id, error_id, service_id, type_id};
use sdkscope_ir::{GeneratorName, IntermediateRepresentation};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Severity level for a filtering finding.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum FindingSeverity {
    Info,
    Warning,
}

/// A notable observation about a filtering run.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: FindingSeverity,
    pub message: String,
}

/// Retained and total declaration counts for one kind.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct KindCount {
    pub retained: usize,
    pub total: usize,
}

impl KindCount {
    pub fn excluded(&self) -> usize {
        self.total.saturating_sub(self.retained)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeclarationCounts {
    pub types: KindCount,
    pub errors: KindCount,
    pub services: KindCount,
    pub endpoints: KindCount,
}

/// Everything the CLI prints about a run.
#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    pub api_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorName>,
    pub selection: AudienceSelection,
    pub counts: DeclarationCounts,
    pub etag: String,
    pub retained: FilteredIr,
    pub findings: Vec<Finding>,
}

impl FilterReport {
    pub fn new(
        ir: &IntermediateRepresentation,
        selection: AudienceSelection,
        generator: Option<GeneratorName>,
        retained: FilteredIr,
    ) -> Self {
        let counts = count(ir, &retained);
        let etag = compute_etag(&retained);
        let mut report = FilterReport {
            api_name: ir.api_name.clone(),
            generator,
            selection,
            counts,
            etag,
            retained,
            findings: Vec::new(),
        };
        report.extract_findings();
        report
    }

    fn extract_findings(&mut self) {
        self.findings.clear();

        if let AudienceSelection::Only(audiences) = &self.selection {
            if self.retained.is_empty() {
                let names: Vec<&str> = audiences.iter().map(|a| a.as_str()).collect();
                self.findings.push(Finding {
                    severity: FindingSeverity::Warning,
                    message: format!(
                        "No declarations are visible to audience(s): {}",
                        names.join(", ")
                    ),
                });
                return;
            }
        }

        let kinds = [
            ("type", self.counts.types),
            ("error", self.counts.errors),
            ("service", self.counts.services),
            ("endpoint", self.counts.endpoints),
        ];
        for (kind, count) in kinds {
            if count.excluded() > 0 {
                self.findings.push(Finding {
                    severity: FindingSeverity::Info,
                    message: format!(
                        "{} of {} {}(s) excluded",
                        count.excluded(),
                        count.total,
                        kind
                    ),
                });
            }
        }
    }
}

/// Count declarations the way [`FilteredIr::apply`] keeps them. Retained ids
/// with no declaration are not counted; a repeated declaration counts each time.
fn count(ir: &IntermediateRepresentation, retained: &FilteredIr) -> DeclarationCounts {
    let kept_types = ir
        .types
        .iter()
        .filter(|t| retained.has_type(&type_id(&t.name)))
        .count();
    let kept_errors = ir
        .errors
        .iter()
        .filter(|e| retained.has_error(&error_id(&e.name)))
        .count();
    let kept_services: Vec<_> = ir
        .services
        .iter()
        .filter(|s| retained.has_service(&service_id(&s.name)))
        .collect();
    let kept_endpoints = kept_services
        .iter()
        .map(|s| {
            s.endpoints
                .iter()
                .filter(|e| retained.has_endpoint(&endpoint_id(&s.name, e)))
                .count()
        })
        .sum();

    DeclarationCounts {
        types: KindCount {
            retained: kept_types,
            total: ir.types.len(),
        },
        errors: KindCount {
            retained: kept_errors,
            total: ir.errors.len(),
        },
        services: KindCount {
            retained: kept_services.len(),
            total: ir.services.len(),
        },
        endpoints: KindCount {
            retained: kept_endpoints,
            total: ir.services.iter().map(|s| s.endpoints.len()).sum(),
        },
    }
}

/// SHA-256 over the retained ids, kind by kind in sorted order.
pub fn compute_etag(filtered: &FilteredIr) -> String {
    let mut hasher = Sha256::new();
    let sections: [(&str, Vec<&str>); 4] = [
        ("types", filtered.types().iter().map(|id| id.as_str()).collect()),
        ("errors", filtered.errors().iter().map(|id| id.as_str()).collect()),
        ("services", filtered.services().iter().map(|id| id.as_str()).collect()),
        ("endpoints", filtered.endpoints().iter().map(|id| id.as_str()).collect()),
    ];
    for (section, ids) in sections {
        hasher.update(section.as_bytes());
        hasher.update([0u8]);
        for id in ids {
            hasher.update(id.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update([0xffu8]);
    }
    format!("{:x}", hasher.finalize())
}
