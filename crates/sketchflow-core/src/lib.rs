#![forbid(unsafe_code)]

//! Diagram schema and typed model (headless).
//!
//! This crate turns a raw structured value (JSON) into a typed
//! [`DiagramDef`], applying defaults and rejecting anything that does not
//! satisfy the schema. It performs no semantic validation: dangling edge
//! endpoints and unknown group members are tolerated downstream.

pub mod color;
pub mod error;
pub mod model;
pub mod schema;

pub use error::{Error, Result};
pub use model::{
    ArrowDirection, DiagramDef, EdgeDef, EdgeStyle, FlowDiagramDef, FlowDirection, GroupDef,
    MessageDef, NodeDef, NodeShape, ParticipantDef, SequenceDiagramDef, Theme,
};
pub use schema::parse;
