//! visitor pattern helpers
mod visit_nodes;
pub use visit_nodes::VisitNodes;

/// Visitor that visits its subjects
pub trait Visit<T> {
    fn visit(&mut self, value: T);
}

// blanket impl for FnMut
impl<T, F> Visit<T> for F
where
    F: FnMut(T),
{
    fn visit(&mut self, value: T) {
        self(value)
    }
}
