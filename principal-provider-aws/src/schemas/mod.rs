//! AWS data source schema definitions

pub mod service_principal;

use principal_core::schema::ResourceSchema;

/// Returns all AWS schemas
pub fn all_schemas() -> Vec<ResourceSchema> {
    vec![service_principal::service_principal_schema()]
}
