#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct Node {
    id: NodeId,
    /// unique within the network
    key: String,
}

impl Node {
    pub fn new(id: NodeId, key: impl Into<String>) -> Self {
        Self { id, key: key.into() }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
