//! sdkscope-ir: Typed API intermediate representation.
//!
//! Provides the declaration structs (types, errors, services, endpoints)
//! that an upstream parser emits as IR JSON, the `TypeReference` sum type
//! that links them together, and a single `load()` / `from_json()` entry
//! point producing an [`IntermediateRepresentation`].
//!
//! Only the fields that audience filtering reads are modelled. Type shapes
//! are carried through as opaque JSON so that a pruned IR can be written
//! back out without loss.

pub mod generators;
pub mod load;
pub mod types;

pub use generators::{GeneratorName, UnknownGeneratorName};
pub use load::{from_json, from_str, load, IrError};
pub use types::*;
