/// Named object-classification layers. A layer's index is its registration
/// order; entities store the index (components::Layer), lookups go by name.
pub struct Layers {
    names: Vec<String>,
}

impl Layers {
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Register `name` and return its index. Re-registering an existing name
    /// returns the index it already has.
    pub fn register(&mut self, name: &str) -> u32 {
        if let Some(index) = self.index_of(name) {
            return index;
        }
        self.names.push(name.to_string());
        (self.names.len() - 1) as u32
    }

    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.names.iter().position(|n| n == name).map(|i| i as u32)
    }
}
