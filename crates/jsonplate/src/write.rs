//! Writing documents
//!
//! [Rendered] is a [serde::Serialize] view of a node. Variables are looked up when serializing, so the same document
//! can be written before and after variables were provided.
use crate::document::{Document, NodeId, NodeKind};
use crate::shape::Shape;
use crate::{Options, Result};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::Serializer;
use std::borrow::Cow;

#[derive(derive_new::new, Clone, Copy)]
pub struct Rendered<'d> {
    document: &'d Document,
    /// `None` writes the default value of `shape`
    node: Option<NodeId>,
    shape: Shape,
    options: &'d Options,
}

impl<'d> Rendered<'d> {
    fn child(&self, node: NodeId) -> Rendered<'d> {
        Rendered::new(
            self.document,
            Some(node),
            self.document.node(node).shape(),
            self.options,
        )
    }
}

impl serde::Serialize for Rendered<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let Some(id) = self.node else {
            return self.shape.default_value().serialize(serializer);
        };

        let node = self.document.node(id);
        match node.kind() {
            NodeKind::Constant(value) => value.serialize(serializer),
            NodeKind::Variable(variable) => {
                let name = variable.name(node.context());
                let name = if variable.uses_casing(node.context()) {
                    self.options.casing.convert(name)
                } else {
                    Cow::Borrowed(name)
                };

                match self.document.resolve(id, &name) {
                    Some(value) => value.serialize(serializer),
                    None => {
                        tracing::trace!(node = %id, %name, "unresolved variable");
                        serializer.serialize_str(&self.options.syntax.format(&name))
                    }
                }
            }
            NodeKind::Dynamic(fields) => {
                let mut ser = serializer.serialize_map(Some(fields.len()))?;
                for (name, field) in fields {
                    let key = self.options.casing.convert(name);
                    match field {
                        Some(field) => ser.serialize_entry(&key, &self.child(*field))?,
                        None => ser.serialize_entry(&key, &())?,
                    }
                }
                ser.end()
            }
            NodeKind::Collection(children) => {
                let mut ser = serializer.serialize_seq(Some(children.len()))?;
                for child in children {
                    ser.serialize_element(&self.child(*child))?;
                }
                ser.end()
            }
            NodeKind::Shaped(slots) => {
                let mut ser = serializer.serialize_map(Some(slots.len()))?;
                for (name, slot) in slots {
                    ser.serialize_entry(&self.options.casing.convert(name), &self.child(*slot))?;
                }
                ser.end()
            }
        }
    }
}

impl Document {
    /// Serializable view of `node`
    pub fn render<'d>(&'d self, node: NodeId, options: &'d Options) -> Rendered<'d> {
        Rendered::new(self, Some(node), self.node(node).shape(), options)
    }

    /// Serializable view of the root, or of the default value of the document shape when there is no root
    pub fn render_root<'d>(&'d self, options: &'d Options) -> Rendered<'d> {
        Rendered::new(self, self.root(), self.shape(), options)
    }

    pub fn to_json_string(&self, options: &Options) -> Result<String> {
        Ok(serde_json::to_string(&self.render_root(options))?)
    }

    pub fn to_json_string_pretty(&self, options: &Options) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.render_root(options))?)
    }

    pub fn to_json_value(&self, options: &Options) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.render_root(options))?)
    }
}
