use super::Visit;
use crate::document::{Document, NodeId, NodeKind};
use crate::Options;

/// Recursively visit all nodes below (and including) a node
pub trait VisitNodes {
    fn visit_nodes(&self, node: NodeId, visitor: &mut dyn Visit<NodeId>);
}

impl VisitNodes for Document {
    /// Pre-order, children in document order
    fn visit_nodes(&self, node: NodeId, visitor: &mut dyn Visit<NodeId>) {
        visitor.visit(node);

        match self.node(node).kind() {
            NodeKind::Constant(_) | NodeKind::Variable(_) => {}
            NodeKind::Dynamic(fields) => {
                for field in fields.values().flatten() {
                    self.visit_nodes(*field, visitor);
                }
            }
            NodeKind::Collection(children) => {
                for child in children {
                    self.visit_nodes(*child, visitor);
                }
            }
            NodeKind::Shaped(slots) => {
                for slot in slots.values() {
                    self.visit_nodes(*slot, visitor);
                }
            }
        }
    }
}

impl Document {
    /// Names of the variables below `node` that do not resolve, as they would be written
    ///
    /// Each name is listed once, in document order.
    pub fn unresolved(&self, node: NodeId, options: &Options) -> Vec<String> {
        let mut names: Vec<String> = vec![];
        self.visit_nodes(node, &mut |id: NodeId| {
            let entry = self.node(id);
            let NodeKind::Variable(variable) = entry.kind() else {
                return;
            };

            let mut name = variable.name(entry.context()).to_string();
            if variable.uses_casing(entry.context()) {
                name = options.casing.convert(&name).into_owned();
            }

            if self.resolve(id, &name).is_none() && !names.contains(&name) {
                names.push(name);
            }
        });

        names
    }
}
