//! Principal AWS Provider
//!
//! AWS Provider implementation: partition and region catalog, service
//! principal suffixes and the `aws.service_principal` data source

pub mod endpoints;
pub mod error;
pub mod names;
pub mod schemas;
pub mod service_principal;

use aws_config::meta::region::RegionProviderChain;
use log::{debug, info};
use principal_core::provider::{DataSource, Provider, ProviderContext};

pub use error::LookupError;
pub use service_principal::{
    ServicePrincipal, ServicePrincipalDataSource, resolve_service_principal,
};

/// Region used when neither the caller nor the environment names one
pub const DEFAULT_REGION: &str = "us-east-1";

/// AWS Provider
#[derive(Debug, Clone)]
pub struct AwsProvider {
    region: String,
}

impl AwsProvider {
    /// Create a new AWS Provider for a region
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    /// Create a Provider using the region from the AWS environment
    ///
    /// Reads `AWS_REGION`, `AWS_DEFAULT_REGION` and the active profile,
    /// in that order, before falling back to [`DEFAULT_REGION`].
    pub async fn from_env() -> Self {
        let region = match RegionProviderChain::default_provider().region().await {
            Some(region) => {
                let region: &str = region.as_ref();
                info!("using region {} from AWS environment", region);
                region.to_string()
            }
            None => {
                debug!("no region configured, using {}", DEFAULT_REGION);
                DEFAULT_REGION.to_string()
            }
        };

        Self::new(region)
    }

    /// Region reads fall back to when none is configured
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl Provider for AwsProvider {
    fn name(&self) -> &'static str {
        "aws"
    }

    fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
        vec![Box::new(ServicePrincipalDataSource)]
    }

    fn context(&self) -> ProviderContext {
        ProviderContext::new(self.region.clone())
    }
}
