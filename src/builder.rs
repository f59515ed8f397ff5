use std::sync::Arc;

use crate::{
    Result, Workbench,
    config::Config,
    taxonomy::{Dictionary, MemDictionary},
};

/// Builder for `Workbench` instances.
pub struct WorkbenchBuilder {
    config: Config,
    dictionary: Option<Arc<dyn Dictionary>>,
}

impl Default for WorkbenchBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
            dictionary: None,
        }
    }
}

impl WorkbenchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    /// Injects the dictionary collaborator; defaults to an empty
    /// in-memory dictionary.
    pub fn dictionary(
        mut self,
        dictionary: Arc<dyn Dictionary>,
    ) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn build(self) -> Result<Workbench> {
        self.config.canvas.validate()?;
        let dictionary = self.dictionary.unwrap_or_else(|| Arc::new(MemDictionary::new()));
        Ok(Workbench::new_with_config(self.config, dictionary))
    }
}
