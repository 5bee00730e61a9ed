//! Service principal data source schema definition

use principal_core::schema::{AttributeSchema, ResourceSchema};

pub const SERVICE_PRINCIPAL_TYPE: &str = "aws.service_principal";

/// Returns the schema for the service principal data source
pub fn service_principal_schema() -> ResourceSchema {
    ResourceSchema::new(SERVICE_PRINCIPAL_TYPE)
        .with_description("Computes the principal name an AWS service uses in a region")
        .attribute(
            AttributeSchema::new("service_name")
                .required()
                .with_description("Service to resolve (e.g., s3, logs)"),
        )
        .attribute(
            AttributeSchema::new("region")
                .optional()
                .computed()
                .with_description(
                    "Region to resolve the principal in (inherited from provider if not specified)",
                ),
        )
        .attribute(
            AttributeSchema::new("id")
                .computed()
                .with_description("Regional principal: <service>.<region>.<suffix>"),
        )
        .attribute(
            AttributeSchema::new("name")
                .computed()
                .with_description("Principal name: <service>.<suffix>"),
        )
        .attribute(
            AttributeSchema::new("suffix")
                .computed()
                .with_description("Partition-specific suffix of the principal"),
        )
}
