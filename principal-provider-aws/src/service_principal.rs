//! Service principal data source
//!
//! Resolves the region (falling back to the provider's region), derives its
//! partition, looks up the principal suffix and assembles the names:
//!
//! - id:   `<service>.<region>.<suffix>`
//! - name: `<service>.<suffix>`

use std::collections::HashMap;

use log::debug;
use principal_core::provider::{
    BoxFuture, DataSource, ProviderContext, ProviderError, ProviderResult,
};
use principal_core::resource::{Resource, State, Value};
use principal_core::schema::ResourceSchema;
use serde::Serialize;

use crate::endpoints::{Region, find_region_by_name, partition_for_region};
use crate::error::LookupError;
use crate::names::service_principal_suffix;
use crate::schemas::service_principal::{SERVICE_PRINCIPAL_TYPE, service_principal_schema};

/// A resolved service principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServicePrincipal {
    pub id: String,
    pub name: String,
    pub region: String,
    pub suffix: String,
}

impl ServicePrincipal {
    /// Assemble the principal names for a service in a region
    pub fn new(service_name: &str, region: &str, suffix: &str) -> Self {
        Self {
            id: format!("{}.{}.{}", service_name, region, suffix),
            name: format!("{}.{}", service_name, suffix),
            region: region.to_string(),
            suffix: suffix.to_string(),
        }
    }

    /// State attributes, keyed by schema attribute name
    pub fn to_attributes(&self, service_name: &str) -> HashMap<String, Value> {
        HashMap::from([
            ("id".to_string(), Value::from(self.id.as_str())),
            ("name".to_string(), Value::from(self.name.as_str())),
            ("region".to_string(), Value::from(self.region.as_str())),
            ("service_name".to_string(), Value::from(service_name)),
            ("suffix".to_string(), Value::from(self.suffix.as_str())),
        ])
    }
}

/// Resolve a region name, or the default region when none is given
pub fn resolve_region(
    region: Option<&str>,
    default_region: &str,
) -> Result<&'static Region, LookupError> {
    match region {
        Some(name) => find_region_by_name(name),
        None => {
            debug!("no region given, using provider region {}", default_region);
            find_region_by_name(default_region)
        }
    }
}

/// Resolve the principal of a service
///
/// The only failure is a region name that is not in the catalog.
pub fn resolve_service_principal(
    service_name: &str,
    region: Option<&str>,
    default_region: &str,
) -> Result<ServicePrincipal, LookupError> {
    let region = resolve_region(region, default_region)?;
    let partition = partition_for_region(region.id());
    let suffix = service_principal_suffix(service_name, partition);

    debug!(
        "resolved {} in {} ({}) to suffix {}",
        service_name,
        region.id(),
        partition.id(),
        suffix
    );

    Ok(ServicePrincipal::new(service_name, region.id(), suffix))
}

/// Data source exposing [`resolve_service_principal`]
pub struct ServicePrincipalDataSource;

impl ServicePrincipalDataSource {
    fn read_sync(&self, resource: &Resource, context: &ProviderContext) -> ProviderResult<State> {
        let id = resource.id.clone();

        if let Err(errors) = self.schema().validate(&resource.attributes) {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(ProviderError::new(messages.join("; ")).for_resource(id));
        }

        let service_name = resource.string_attribute("service_name").unwrap_or_default();
        let region = resource.string_attribute("region");

        let principal = resolve_service_principal(service_name, region, &context.region)
            .map_err(|e| {
                ProviderError::new(format!("finding Region by name ({})", e.name()))
                    .for_resource(id.clone())
                    .with_cause(e)
            })?;

        let attributes = principal.to_attributes(service_name);
        Ok(State::new(id, attributes).with_identifier(principal.id))
    }
}

impl DataSource for ServicePrincipalDataSource {
    fn name(&self) -> &'static str {
        SERVICE_PRINCIPAL_TYPE
    }

    fn schema(&self) -> ResourceSchema {
        service_principal_schema()
    }

    fn read(
        &self,
        resource: &Resource,
        context: &ProviderContext,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let result = self.read_sync(resource, context);
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::all_regions;
    use crate::names::DEFAULT_SERVICE_PRINCIPAL_SUFFIX;
    use std::error::Error;

    fn lookup(service_name: &str) -> Resource {
        Resource::data_source(SERVICE_PRINCIPAL_TYPE, "test")
            .with_attribute("service_name", Value::from(service_name))
    }

    #[test]
    fn s3_in_us_east_1() {
        let principal = resolve_service_principal("s3", Some("us-east-1"), "eu-west-1").unwrap();
        assert_eq!(principal.suffix, "amazonaws.com");
        assert_eq!(principal.name, "s3.amazonaws.com");
        assert_eq!(principal.id, "s3.us-east-1.amazonaws.com");
        assert_eq!(principal.region, "us-east-1");
    }

    #[test]
    fn logs_in_china_uses_china_suffix() {
        let principal = resolve_service_principal("logs", Some("cn-north-1"), "us-east-1").unwrap();
        assert_eq!(principal.name, "logs.amazonaws.com.cn");
        assert_eq!(principal.id, "logs.cn-north-1.amazonaws.com.cn");
    }

    #[test]
    fn s3_in_china_uses_default_suffix() {
        let principal = resolve_service_principal("s3", Some("cn-northwest-1"), "us-east-1").unwrap();
        assert_eq!(principal.name, "s3.amazonaws.com");
        assert_eq!(principal.id, "s3.cn-northwest-1.amazonaws.com");
    }

    #[test]
    fn omitted_region_matches_explicit_default() {
        let implicit = resolve_service_principal("logs", None, "cn-north-1").unwrap();
        let explicit = resolve_service_principal("logs", Some("cn-north-1"), "us-east-1").unwrap();
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn region_with_catalog_tail_is_not_found() {
        for name in ["garbage.us-east-1", "us_east_1"] {
            let err = resolve_service_principal("s3", Some(name), "us-east-1").unwrap_err();
            assert_eq!(
                err,
                LookupError::RegionNotFound {
                    name: name.to_string()
                }
            );
        }
    }

    #[test]
    fn unknown_region_names_the_input() {
        let err = resolve_service_principal("s3", Some("mars-north-1"), "us-east-1").unwrap_err();
        assert_eq!(
            err,
            LookupError::RegionNotFound {
                name: "mars-north-1".to_string()
            }
        );
    }

    #[test]
    fn unknown_default_region_names_the_default() {
        let err = resolve_service_principal("s3", None, "nowhere-1").unwrap_err();
        assert_eq!(err.name(), "nowhere-1");
    }

    #[test]
    fn empty_service_name_still_resolves() {
        let principal = resolve_service_principal("", Some("us-iso-east-1"), "us-east-1").unwrap();
        assert_eq!(principal.suffix, DEFAULT_SERVICE_PRINCIPAL_SUFFIX);
        assert_eq!(principal.name, ".amazonaws.com");
        assert_eq!(principal.id, ".us-iso-east-1.amazonaws.com");
    }

    #[test]
    fn names_are_assembled_for_every_region() {
        for region in all_regions() {
            for service in ["s3", "logs", "dms", "cloudhsm"] {
                let principal =
                    resolve_service_principal(service, Some(region.id()), "us-east-1").unwrap();
                assert_eq!(
                    principal.id,
                    format!("{}.{}.{}", service, region.id(), principal.suffix)
                );
                assert_eq!(principal.name, format!("{}.{}", service, principal.suffix));
                assert_eq!(principal.region, region.id());
            }
        }
    }

    #[test]
    fn principal_serializes_with_field_names() {
        let principal = ServicePrincipal::new("s3", "us-east-1", "amazonaws.com");
        let json = serde_json::to_value(&principal).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "s3.us-east-1.amazonaws.com",
                "name": "s3.amazonaws.com",
                "region": "us-east-1",
                "suffix": "amazonaws.com",
            })
        );
    }

    #[tokio::test]
    async fn read_returns_all_attributes() {
        let resource = lookup("s3").with_attribute("region", Value::from("us-west-2"));
        let state = ServicePrincipalDataSource
            .read(&resource, &ProviderContext::new("eu-west-1"))
            .await
            .unwrap();

        assert_eq!(state.identifier.as_deref(), Some("s3.us-west-2.amazonaws.com"));
        assert_eq!(state.attributes.get("id"), Some(&Value::from("s3.us-west-2.amazonaws.com")));
        assert_eq!(state.attributes.get("name"), Some(&Value::from("s3.amazonaws.com")));
        assert_eq!(state.attributes.get("region"), Some(&Value::from("us-west-2")));
        assert_eq!(state.attributes.get("service_name"), Some(&Value::from("s3")));
        assert_eq!(state.attributes.get("suffix"), Some(&Value::from("amazonaws.com")));
    }

    #[tokio::test]
    async fn read_without_region_uses_context() {
        let state = ServicePrincipalDataSource
            .read(&lookup("codedeploy"), &ProviderContext::new("cn-northwest-1"))
            .await
            .unwrap();

        assert_eq!(state.attributes.get("region"), Some(&Value::from("cn-northwest-1")));
        assert_eq!(
            state.attributes.get("name"),
            Some(&Value::from("codedeploy.amazonaws.com.cn"))
        );
    }

    #[tokio::test]
    async fn read_reports_unknown_region() {
        let resource = lookup("s3").with_attribute("region", Value::from("xx-invalid-1"));
        let err = ServicePrincipalDataSource
            .read(&resource, &ProviderContext::new("us-east-1"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "[aws.service_principal.test] finding Region by name (xx-invalid-1)"
        );
        assert_eq!(
            err.source().map(|e| e.to_string()),
            Some("Region 'xx-invalid-1' not found".to_string())
        );
    }

    #[tokio::test]
    async fn read_rejects_missing_service_name() {
        let resource = Resource::data_source(SERVICE_PRINCIPAL_TYPE, "test");
        let err = ServicePrincipalDataSource
            .read(&resource, &ProviderContext::new("us-east-1"))
            .await
            .unwrap_err();

        assert!(err.message.contains("Required attribute 'service_name' is missing"));
    }

    #[tokio::test]
    async fn read_rejects_configured_outputs() {
        let resource = lookup("s3").with_attribute("suffix", Value::from("example.com"));
        let err = ServicePrincipalDataSource
            .read(&resource, &ProviderContext::new("us-east-1"))
            .await
            .unwrap_err();

        assert!(err.message.contains("'suffix' is computed"));
    }
}
