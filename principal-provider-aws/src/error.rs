//! Lookup errors

/// Errors raised while resolving a service principal
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Region '{name}' not found")]
    RegionNotFound { name: String },
}

impl LookupError {
    /// The name that failed to resolve
    pub fn name(&self) -> &str {
        match self {
            LookupError::RegionNotFound { name } => name,
        }
    }
}
