use crate::document::NodeId;
use crate::shape::Shape;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("context of node {node} already set (parent {parent}, slot {slot:?})")]
    ContextAlreadySet {
        node: NodeId,
        parent: NodeId,
        slot: String,
    },
    #[error("attaching node {node} below {parent} would create a cycle")]
    Cycle { node: NodeId, parent: NodeId },
    #[error("unable to convert {found} to {expected}")]
    TypeConversion { expected: Shape, found: &'static str },
    #[error("expected a node of shape {expected}, got {found}")]
    ShapeMismatch { expected: Shape, found: Shape },
    #[error("{descriptor} has no slot named {slot:?}")]
    UnknownSlot {
        descriptor: &'static str,
        slot: String,
    },
    #[error("node {node} is not a {expected}")]
    NotA {
        node: NodeId,
        expected: &'static str,
    },
    #[error("Unable to parse json")]
    Json(#[from] serde_json::Error),
}
