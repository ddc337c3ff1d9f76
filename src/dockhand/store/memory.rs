use super::StateStore;
use crate::error::Result;
use crate::model::Registry;

/// In-memory registry store for tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    registry: Registry,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStore {
    fn read(&self) -> Result<Registry> {
        Ok(self.registry.clone())
    }

    fn update(&mut self, mutate: &mut dyn FnMut(&mut Registry)) -> Result<Registry> {
        mutate(&mut self.registry);
        Ok(self.registry.clone())
    }
}
