//! Provider - Traits abstracting data source reads
//!
//! A Provider groups the data sources of one infrastructure (AWS, GCP, etc.)
//! and supplies the context they read in, such as the configured region.

use std::future::Future;
use std::pin::Pin;

use crate::resource::{Resource, ResourceId, State};
use crate::schema::ResourceSchema;

/// Error type for Provider operations
#[derive(Debug)]
pub struct ProviderError {
    pub message: String,
    pub resource_id: Option<ResourceId>,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.resource_id {
            write!(f, "[{}.{}] {}", id.resource_type, id.name, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            resource_id: None,
            cause: None,
        }
    }

    pub fn for_resource(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Settings a provider passes to every data source read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderContext {
    /// Region the provider is configured for, used when a read names none
    pub region: String,
}

impl ProviderContext {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }
}

/// A read-only lookup exposed by a Provider
pub trait DataSource: Send + Sync {
    /// Data source type name (e.g., "aws.service_principal")
    fn name(&self) -> &'static str;

    /// Attribute schema for this data source
    fn schema(&self) -> ResourceSchema;

    /// Compute the state for a configuration
    fn read(
        &self,
        resource: &Resource,
        context: &ProviderContext,
    ) -> BoxFuture<'_, ProviderResult<State>>;
}

/// Main Provider trait
pub trait Provider: Send + Sync {
    /// Name of this Provider (e.g., "aws")
    fn name(&self) -> &'static str;

    /// Data sources this Provider can read
    fn data_sources(&self) -> Vec<Box<dyn DataSource>>;

    /// Context handed to data source reads
    fn context(&self) -> ProviderContext;

    /// Read a data source by dispatching on its resource type
    fn read_data_source(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move {
            if !resource.is_data_source() {
                return Err(ProviderError::new(
                    "Only data sources can be read by this provider",
                )
                .for_resource(resource.id.clone()));
            }

            let source = self
                .data_sources()
                .into_iter()
                .find(|d| d.name() == resource.id.resource_type)
                .ok_or_else(|| {
                    ProviderError::new(format!(
                        "Unknown data source type '{}' for provider '{}'",
                        resource.id.resource_type,
                        self.name()
                    ))
                    .for_resource(resource.id.clone())
                })?;

            let context = self.context();
            source.read(&resource, &context).await
        })
    }
}

/// Provider implementation for Box<dyn Provider>
/// This enables dynamic dispatch for Providers
impl Provider for Box<dyn Provider> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
        (**self).data_sources()
    }

    fn context(&self) -> ProviderContext {
        (**self).context()
    }

    fn read_data_source(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        (**self).read_data_source(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Value;
    use std::collections::HashMap;

    // Echoes the context region back as state
    struct EchoRegion;

    impl DataSource for EchoRegion {
        fn name(&self) -> &'static str {
            "mock.echo"
        }

        fn schema(&self) -> ResourceSchema {
            ResourceSchema::new("mock.echo")
        }

        fn read(
            &self,
            resource: &Resource,
            context: &ProviderContext,
        ) -> BoxFuture<'_, ProviderResult<State>> {
            let id = resource.id.clone();
            let region = context.region.clone();
            Box::pin(async move {
                let attrs = HashMap::from([("region".to_string(), Value::String(region))]);
                Ok(State::new(id, attrs).with_identifier("mock-id-123"))
            })
        }
    }

    struct MockProvider;

    impl Provider for MockProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
            vec![Box::new(EchoRegion)]
        }

        fn context(&self) -> ProviderContext {
            ProviderContext::new("mock-region-1")
        }
    }

    #[tokio::test]
    async fn read_dispatches_to_matching_data_source() {
        let provider = MockProvider;
        let resource = Resource::data_source("mock.echo", "example");
        let state = provider.read_data_source(&resource).await.unwrap();
        assert_eq!(state.identifier, Some("mock-id-123".to_string()));
        assert_eq!(
            state.attributes.get("region"),
            Some(&Value::String("mock-region-1".to_string()))
        );
    }

    #[tokio::test]
    async fn boxed_provider_forwards_reads() {
        let provider: Box<dyn Provider> = Box::new(MockProvider);
        let resource = Resource::data_source("mock.echo", "example");
        let state = provider.read_data_source(&resource).await.unwrap();
        assert_eq!(state.id, ResourceId::new("mock.echo", "example"));
    }

    #[tokio::test]
    async fn unknown_data_source_type_is_an_error() {
        let provider = MockProvider;
        let resource = Resource::data_source("mock.missing", "example");
        let err = provider.read_data_source(&resource).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "[mock.missing.example] Unknown data source type 'mock.missing' for provider 'mock'"
        );
    }

    #[tokio::test]
    async fn managed_resource_is_rejected() {
        let provider = MockProvider;
        let resource = Resource::new("mock.echo", "example");
        assert!(provider.read_data_source(&resource).await.is_err());
    }

    #[test]
    fn error_exposes_cause_as_source() {
        use std::error::Error;

        let cause = std::io::Error::other("boom");
        let err = ProviderError::new("failed").with_cause(cause);
        assert_eq!(err.source().map(|e| e.to_string()), Some("boom".to_string()));
    }
}
