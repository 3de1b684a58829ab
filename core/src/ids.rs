use std::sync::Arc;

use uuid::Uuid;

/// Source of fresh ids for lists and items.
///
/// Failure is reported per call; callers turn it into a request-level error.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Result<String, String>;
}

/// Random v4 UUIDs in hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> Result<String, String> {
        Ok(Uuid::new_v4().to_string())
    }
}

pub fn default_generator() -> Arc<dyn IdGenerator> {
    Arc::new(UuidGenerator)
}
