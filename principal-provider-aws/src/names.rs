//! Service principal suffixes per partition

use std::collections::HashMap;
use std::sync::LazyLock;

use log::debug;

use crate::endpoints::{
    AWS_CN_PARTITION_ID, AWS_ISO_B_PARTITION_ID, AWS_ISO_PARTITION_ID, AWS_PARTITION_ID,
    Partition,
};

/// Suffix used by every service that has no partition-specific principal
pub const DEFAULT_SERVICE_PRINCIPAL_SUFFIX: &str = "amazonaws.com";

/// Services whose principal ends in their partition's DNS suffix
const PARTITION_SCOPED_PRINCIPALS: &[(&str, &[&str])] = &[
    (
        AWS_CN_PARTITION_ID,
        &["codedeploy", "elasticmapreduce", "logs"],
    ),
    (
        AWS_ISO_PARTITION_ID,
        &["cloudhsm", "config", "logs", "workspaces"],
    ),
    (AWS_ISO_B_PARTITION_ID, &["dms", "logs"]),
];

// partition id -> service -> suffix
static SUFFIXES: LazyLock<HashMap<&'static str, HashMap<&'static str, &'static str>>> =
    LazyLock::new(|| {
        let mut table: HashMap<&'static str, HashMap<&'static str, &'static str>> =
            HashMap::new();
        for &(partition_id, services) in PARTITION_SCOPED_PRINCIPALS {
            let Some(partition) = crate::endpoints::partition_by_id(partition_id) else {
                continue;
            };
            let entries = table.entry(partition_id).or_default();
            for &service in services {
                entries.insert(service, partition.dns_suffix());
            }
        }
        table
    });

/// Suffix of the service principal for a service in a partition
///
/// Never fails: empty or unmapped services get the default suffix.
pub fn service_principal_suffix(service: &str, partition: &Partition) -> &'static str {
    if service.is_empty() || partition.id() == AWS_PARTITION_ID {
        return DEFAULT_SERVICE_PRINCIPAL_SUFFIX;
    }

    match SUFFIXES
        .get(partition.id())
        .and_then(|services| services.get(service).copied())
    {
        Some(suffix) => suffix,
        None => {
            debug!(
                "no principal suffix for {} in {}, using {}",
                service,
                partition.id(),
                DEFAULT_SERVICE_PRINCIPAL_SUFFIX
            );
            DEFAULT_SERVICE_PRINCIPAL_SUFFIX
        }
    }
}
