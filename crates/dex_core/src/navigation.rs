#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Details { index: usize },
}

/// Navigation path on top of the catalog root. An empty path shows the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationStack {
    path: Vec<Destination>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, destination: Destination) {
        self.path.push(destination);
    }

    pub fn pop(&mut self) -> Option<Destination> {
        self.path.pop()
    }

    pub fn current(&self) -> Option<Destination> {
        self.path.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.path.is_empty()
    }
}
