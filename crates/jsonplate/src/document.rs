//! Node tree with scoped variables
//!
//! A [Document] owns all nodes of a template. Nodes are addressed by [NodeId] and point back to their parent, which
//! is only ever used to look variables up. Each node is one of
//! - a constant [Value]
//! - a [Variable], resolved when the document is written
//! - a dynamic object whose fields are discovered at read time
//! - a collection of nodes of the same shape
//! - a shaped object whose slots are declared by a [Descriptor]
use crate::shape::{Descriptor, Shape};
use crate::value::Value;
use crate::{Error, Result};
use indexmap::IndexMap;

/// Variable name to value mapping
pub type Variables = IndexMap<String, Value>;

/// Index of a node in its [Document]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a node lives in the tree
#[derive(Debug, Clone, PartialEq, derive_new::new)]
pub struct Context {
    pub parent: NodeId,
    pub slot: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Variable {
    /// Explicitly named, the name is used as-is
    Named(String),
    /// Named after the slot it is attached to
    Default,
}

impl Variable {
    /// Name used when no slot name is known
    pub const FALLBACK_NAME: &'static str = "default";

    pub fn name<'a>(&'a self, context: Option<&'a Context>) -> &'a str {
        match (self, context) {
            (Variable::Named(name), _) => name,
            (Variable::Default, Some(context)) => &context.slot,
            (Variable::Default, None) => Self::FALLBACK_NAME,
        }
    }

    /// Whether the name follows the casing policy of the output
    pub fn uses_casing(&self, context: Option<&Context>) -> bool {
        matches!(self, Variable::Default) && context.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Constant(Value),
    Variable(Variable),
    /// Fields in insertion order, `None` is written as null
    Dynamic(IndexMap<String, Option<NodeId>>),
    Collection(Vec<NodeId>),
    /// Slots in declaration order
    Shaped(IndexMap<&'static str, NodeId>),
}

impl NodeKind {
    fn name(&self) -> &'static str {
        match self {
            NodeKind::Constant(_) => "constant",
            NodeKind::Variable(_) => "variable",
            NodeKind::Dynamic(_) => "dynamic template",
            NodeKind::Collection(_) => "collection",
            NodeKind::Shaped(_) => "shaped template",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    shape: Shape,
    kind: NodeKind,
    context: Option<Context>,
    variables: Variables,
}

impl Node {
    fn new(shape: Shape, kind: NodeKind) -> Self {
        Self {
            shape,
            kind,
            context: None,
            variables: Default::default(),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }
}

/// A template document
///
/// Node ids are only meaningful for the document that created them. Passing an id of another document panics or
/// addresses an unrelated node.
#[derive(Debug, Clone)]
pub struct Document {
    shape: Shape,
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Shape::Any)
    }
}

impl Document {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            nodes: Default::default(),
            root: None,
        }
    }

    /// Shape of the document root
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn insert(&mut self, shape: Shape, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(shape, kind));
        id
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

/// Building nodes
impl Document {
    /// A constant of `shape`, fails if `value` does not fit
    pub fn constant(&mut self, shape: Shape, value: impl Into<Value>) -> Result<NodeId> {
        let value = shape.coerce(value.into())?;
        Ok(self.insert(shape, NodeKind::Constant(value)))
    }

    /// An unshaped constant
    pub fn any(&mut self, value: impl Into<Value>) -> NodeId {
        self.insert(Shape::Any, NodeKind::Constant(value.into()))
    }

    pub fn variable(&mut self, shape: Shape, name: impl Into<String>) -> NodeId {
        self.insert(shape, NodeKind::Variable(Variable::Named(name.into())))
    }

    /// A variable named after the slot it gets attached to
    pub fn default_variable(&mut self, shape: Shape) -> NodeId {
        self.insert(shape, NodeKind::Variable(Variable::Default))
    }

    pub(crate) fn insert_variable(&mut self, shape: Shape, variable: Variable) -> NodeId {
        self.insert(shape, NodeKind::Variable(variable))
    }

    /// An empty dynamic template
    pub fn dynamic(&mut self, shape: Shape) -> NodeId {
        self.insert(shape, NodeKind::Dynamic(Default::default()))
    }

    /// A collection of `children`
    ///
    /// `shape` must be a list shape and every child must have its element shape. Children get their context once the
    /// collection is attached.
    pub fn collection(&mut self, shape: Shape, children: Vec<NodeId>) -> Result<NodeId> {
        let Some(element) = shape.element() else {
            return Err(Error::ShapeMismatch {
                expected: Shape::List(&Shape::Any),
                found: shape,
            });
        };

        for child in &children {
            let node = self.node(*child);
            if !node.shape.fits(&element) {
                return Err(Error::ShapeMismatch {
                    expected: element,
                    found: node.shape,
                });
            }
            self.ensure_detached(*child)?;
        }

        Ok(self.insert(shape, NodeKind::Collection(children)))
    }

    /// A shaped template with every slot set to its default constant
    pub fn shaped(&mut self, descriptor: &'static Descriptor) -> NodeId {
        let id = self.insert(
            Shape::Struct(descriptor),
            NodeKind::Shaped(Default::default()),
        );

        for slot in descriptor.slots {
            let value = self.insert(slot.shape, NodeKind::Constant(slot.shape.default_value()));
            self.node_mut(value).context = Some(Context::new(id, slot.name.to_string()));
            if let NodeKind::Shaped(slots) = &mut self.node_mut(id).kind {
                slots.insert(slot.name, value);
            }
        }

        id
    }
}

/// Context and variable resolution
impl Document {
    /// Attach `node` to `parent` under the name `slot`
    ///
    /// A node can only be attached once and never below itself. Attaching a collection attaches each child as
    /// `{slot}_{index}`. Nothing is changed when any node involved already has a context.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn attach_context(&mut self, node: NodeId, parent: NodeId, slot: &str) -> Result<()> {
        self.ensure_detached(node)?;
        self.ensure_not_below(node, parent)?;
        self.attach_unchecked(node, parent, slot.to_string());
        Ok(())
    }

    fn ensure_detached(&self, node: NodeId) -> Result<()> {
        let entry = self.node(node);
        if let Some(context) = &entry.context {
            tracing::debug!(%node, ?context, "context already set");
            return Err(Error::ContextAlreadySet {
                node,
                parent: context.parent,
                slot: context.slot.clone(),
            });
        }

        if let NodeKind::Collection(children) = &entry.kind {
            for child in children {
                self.ensure_detached(*child)?;
            }
        }

        Ok(())
    }

    /// `node` and the children it would take along must not be `parent` or one of its ancestors
    fn ensure_not_below(&self, node: NodeId, parent: NodeId) -> Result<()> {
        let mut current = Some(parent);
        while let Some(ancestor) = current {
            if ancestor == node {
                tracing::debug!(%node, %parent, "attaching would create a cycle");
                return Err(Error::Cycle { node, parent });
            }
            current = self.parent(ancestor);
        }

        for child in self.children(node) {
            self.ensure_not_below(*child, parent)?;
        }

        Ok(())
    }

    fn attach_unchecked(&mut self, node: NodeId, parent: NodeId, slot: String) {
        let children = match &self.node(node).kind {
            NodeKind::Collection(children) => children.clone(),
            _ => vec![],
        };

        for (index, child) in children.into_iter().enumerate() {
            self.attach_unchecked(child, node, format!("{slot}_{index}"));
        }

        self.node_mut(node).context = Some(Context::new(parent, slot));
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).context.as_ref().map(|context| context.parent)
    }

    pub fn slot_name(&self, node: NodeId) -> Option<&str> {
        self.node(node)
            .context
            .as_ref()
            .map(|context| context.slot.as_str())
    }

    /// Replace the variables local to `node`
    pub fn set_variables(&mut self, node: NodeId, variables: Variables) {
        self.node_mut(node).variables = variables;
    }

    pub fn clear_variables(&mut self, node: NodeId) {
        self.node_mut(node).variables.clear();
    }

    pub fn variables(&self, node: NodeId) -> &Variables {
        &self.node(node).variables
    }

    /// Look `name` up, starting at `node` and walking up to the root
    pub fn resolve(&self, node: NodeId, name: &str) -> Option<&Value> {
        let mut current = Some(node);
        while let Some(id) = current {
            let entry = self.node(id);
            if let Some(value) = entry.variables.get(name) {
                return Some(value);
            }
            current = entry.context.as_ref().map(|context| context.parent);
        }

        None
    }

    /// Name of a variable node before any casing is applied
    pub fn variable_name(&self, node: NodeId) -> Option<&str> {
        let entry = self.node(node);
        match &entry.kind {
            NodeKind::Variable(variable) => Some(variable.name(entry.context.as_ref())),
            _ => None,
        }
    }
}

/// Slots and fields
impl Document {
    /// Set a slot of a shaped template, attaching `value` to it
    pub fn set_slot(&mut self, node: NodeId, slot: &str, value: NodeId) -> Result<()> {
        let Shape::Struct(descriptor) = self.node(node).shape else {
            return Err(self.not_a(node, "shaped template"));
        };
        if !matches!(self.node(node).kind, NodeKind::Shaped(_)) {
            return Err(self.not_a(node, "shaped template"));
        }

        let Some(declared) = descriptor.slot(slot) else {
            return Err(Error::UnknownSlot {
                descriptor: descriptor.name,
                slot: slot.to_string(),
            });
        };

        let found = self.node(value).shape;
        if !found.fits(&declared.shape) {
            return Err(Error::ShapeMismatch {
                expected: declared.shape,
                found,
            });
        }

        self.attach_context(value, node, declared.name)?;
        if let NodeKind::Shaped(slots) = &mut self.node_mut(node).kind {
            slots.insert(declared.name, value);
        }

        Ok(())
    }

    pub fn slot(&self, node: NodeId, slot: &str) -> Option<NodeId> {
        match &self.node(node).kind {
            NodeKind::Shaped(slots) => slots.get(slot).copied(),
            _ => None,
        }
    }

    /// Set a field of a dynamic template
    ///
    /// Setting a field again replaces the node; the replaced node keeps its context.
    pub fn set_field(&mut self, node: NodeId, name: &str, value: Option<NodeId>) -> Result<()> {
        if !matches!(self.node(node).kind, NodeKind::Dynamic(_)) {
            return Err(self.not_a(node, "dynamic template"));
        }

        if let Some(value) = value {
            self.attach_context(value, node, name)?;
        }

        if let NodeKind::Dynamic(fields) = &mut self.node_mut(node).kind {
            fields.insert(name.to_string(), value);
        }

        Ok(())
    }

    /// Set a field of a dynamic template to a constant of the value's own shape
    pub fn set_field_value(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<NodeId> {
        let value = value.into();
        let constant = self.insert(Shape::of_value(&value), NodeKind::Constant(value));
        self.set_field(node, name, Some(constant))?;
        Ok(constant)
    }

    /// Node of a field, `None` when the field is missing or empty
    pub fn field(&self, node: NodeId, name: &str) -> Option<NodeId> {
        match &self.node(node).kind {
            NodeKind::Dynamic(fields) => fields.get(name).copied().flatten(),
            _ => None,
        }
    }

    pub fn has_field(&self, node: NodeId, name: &str) -> bool {
        match &self.node(node).kind {
            NodeKind::Dynamic(fields) => fields.contains_key(name),
            _ => false,
        }
    }

    /// Fields of a dynamic template in insertion order
    pub fn fields(&self, node: NodeId) -> impl Iterator<Item = (&str, Option<NodeId>)> {
        let fields = match &self.node(node).kind {
            NodeKind::Dynamic(fields) => Some(fields),
            _ => None,
        };

        fields
            .into_iter()
            .flat_map(|fields| fields.iter().map(|(name, value)| (name.as_str(), *value)))
    }

    /// Children of a collection in order
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match &self.node(node).kind {
            NodeKind::Collection(children) => children,
            _ => &[],
        }
    }

    fn not_a(&self, node: NodeId, expected: &'static str) -> Error {
        tracing::debug!(%node, found = self.node(node).kind.name(), expected, "wrong node kind");
        Error::NotA { node, expected }
    }
}
