//! Feature schema and strict-schema feature containers.
//!
//! - `FeatureCode` / `FeatureValue` - identifiers and values sent to the service
//! - `MappingTable` - categorical label → code tables
//! - `FeatureSchema` - required/optional universes and the survey fields feeding them
//! - `FeatureMap` - fixed-key container for one universe

mod code;
mod feature_map;
pub mod mapping;
pub mod schema;
mod value;

pub use code::FeatureCode;
pub use feature_map::{FeatureMap, UnknownFeatureError};
pub use mapping::MappingTable;
pub use schema::{
    codes, keys, AnswerField, AnswerKind, Derivation, DerivedFeature, FeatureSchema, Requirement,
    SchemaError, Target, Universe,
};
pub use value::FeatureValue;
