//! Reading documents
//!
//! Text is decoded into a [Value] first and then turned into nodes:
//! - a string matching the placeholder syntax becomes a named variable
//! - an object becomes a shaped template when the expected shape declares slots, a dynamic template otherwise
//! - an array becomes a collection when [Options::collections] is set and a list is expected
//! - everything else becomes a constant of the expected shape
use crate::document::{Document, NodeId};
use crate::shape::{Descriptor, Shape};
use crate::value::Value;
use crate::{Options, Result};
use indexmap::IndexMap;

#[derive(derive_new::new)]
struct Reader<'d> {
    document: &'d mut Document,
    options: &'d Options,
}

impl Reader<'_> {
    fn read(&mut self, shape: Shape, value: Value) -> Result<NodeId> {
        match value {
            Value::String(text) => match self.options.syntax.parse(&text) {
                Some(variable) => {
                    tracing::trace!(?variable, %shape, "placeholder");
                    Ok(self.document.insert_variable(shape, variable))
                }
                None => self.document.constant(shape, text),
            },
            Value::Object(object) => match shape.descriptor() {
                Some(descriptor) => self.read_shaped(descriptor, object),
                None => self.read_dynamic(shape, object),
            },
            Value::Array(array) if self.options.collections => match shape.element() {
                Some(element) => self.read_collection(shape, element, array),
                None => self.document.constant(shape, array),
            },
            value => self.document.constant(shape, value),
        }
    }

    fn read_shaped(
        &mut self,
        descriptor: &'static Descriptor,
        mut object: IndexMap<String, Value>,
    ) -> Result<NodeId> {
        tracing::trace!(descriptor = descriptor.name, "shaped object");
        let node = self.document.shaped(descriptor);
        for slot in descriptor.slots {
            let key = self.options.casing.convert(slot.name);
            // missing slots keep the default constant
            let Some(value) = object.shift_remove(key.as_ref()) else {
                continue;
            };

            let child = self.read(slot.shape, value)?;
            self.document.set_slot(node, slot.name, child)?;
        }

        Ok(node)
    }

    fn read_dynamic(&mut self, shape: Shape, object: IndexMap<String, Value>) -> Result<NodeId> {
        tracing::trace!(%shape, fields = object.len(), "dynamic object");
        let node = self.document.dynamic(shape);
        for (name, value) in object {
            let child = self.read(Shape::Any, value)?;
            self.document.set_field(node, &name, Some(child))?;
        }

        Ok(node)
    }

    fn read_collection(&mut self, shape: Shape, element: Shape, array: Vec<Value>) -> Result<NodeId> {
        let children = array
            .into_iter()
            .map(|value| self.read(element, value))
            .collect::<Result<Vec<_>>>()?;

        self.document.collection(shape, children)
    }
}

impl Document {
    /// Read a document of `shape` from an already decoded value
    pub fn from_value(value: Value, shape: Shape, options: &Options) -> Result<Self> {
        let mut document = Document::new(shape);
        let root = Reader::new(&mut document, options).read(shape, value)?;
        document.set_root(root);
        Ok(document)
    }

    pub fn from_json_str(text: &str, shape: Shape, options: &Options) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value, shape, options)
    }

    pub fn from_json_reader(
        reader: impl std::io::Read,
        shape: Shape,
        options: &Options,
    ) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value, shape, options)
    }
}
