//! AWS partition and region catalog
//!
//! The catalog is compiled in and built once on first use. Every region
//! belongs to exactly one partition.

use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;
use serde::Serialize;

use crate::error::LookupError;

pub const AWS_PARTITION_ID: &str = "aws";
pub const AWS_CN_PARTITION_ID: &str = "aws-cn";
pub const AWS_US_GOV_PARTITION_ID: &str = "aws-us-gov";
pub const AWS_ISO_PARTITION_ID: &str = "aws-iso";
pub const AWS_ISO_B_PARTITION_ID: &str = "aws-iso-b";
pub const AWS_ISO_E_PARTITION_ID: &str = "aws-iso-e";
pub const AWS_ISO_F_PARTITION_ID: &str = "aws-iso-f";
pub const AWS_EUSC_PARTITION_ID: &str = "aws-eusc";

/// A region in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub id: &'static str,
    pub description: &'static str,
    pub partition: &'static str,
}

impl Region {
    pub fn id(&self) -> &'static str {
        self.id
    }
}

/// A group of regions sharing naming and addressing conventions
#[derive(Debug, Serialize)]
pub struct Partition {
    pub id: &'static str,
    pub name: &'static str,
    pub dns_suffix: &'static str,
    pub region_regex: &'static str,
    pub regions: Vec<Region>,
    #[serde(skip)]
    matcher: Option<Regex>,
}

impl Partition {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn dns_suffix(&self) -> &'static str {
        self.dns_suffix
    }

    /// Whether a region id is listed in this partition
    pub fn contains_region(&self, region_id: &str) -> bool {
        self.regions.iter().any(|r| r.id == region_id)
    }

    /// Whether a region id follows this partition's naming pattern
    pub fn matches_region(&self, region_id: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|re| re.is_match(region_id))
    }
}

struct PartitionDef {
    id: &'static str,
    name: &'static str,
    dns_suffix: &'static str,
    region_regex: &'static str,
    regions: &'static [(&'static str, &'static str)],
}

const PARTITION_DEFS: &[PartitionDef] = &[
    PartitionDef {
        id: AWS_PARTITION_ID,
        name: "AWS Standard",
        dns_suffix: "amazonaws.com",
        region_regex: r"^(us|eu|ap|sa|ca|me|af|il|mx)\-\w+\-\d+$",
        regions: &[
            ("af-south-1", "Africa (Cape Town)"),
            ("ap-east-1", "Asia Pacific (Hong Kong)"),
            ("ap-east-2", "Asia Pacific (Taipei)"),
            ("ap-northeast-1", "Asia Pacific (Tokyo)"),
            ("ap-northeast-2", "Asia Pacific (Seoul)"),
            ("ap-northeast-3", "Asia Pacific (Osaka)"),
            ("ap-south-1", "Asia Pacific (Mumbai)"),
            ("ap-south-2", "Asia Pacific (Hyderabad)"),
            ("ap-southeast-1", "Asia Pacific (Singapore)"),
            ("ap-southeast-2", "Asia Pacific (Sydney)"),
            ("ap-southeast-3", "Asia Pacific (Jakarta)"),
            ("ap-southeast-4", "Asia Pacific (Melbourne)"),
            ("ap-southeast-5", "Asia Pacific (Malaysia)"),
            ("ap-southeast-7", "Asia Pacific (Thailand)"),
            ("ca-central-1", "Canada (Central)"),
            ("ca-west-1", "Canada West (Calgary)"),
            ("eu-central-1", "Europe (Frankfurt)"),
            ("eu-central-2", "Europe (Zurich)"),
            ("eu-north-1", "Europe (Stockholm)"),
            ("eu-south-1", "Europe (Milan)"),
            ("eu-south-2", "Europe (Spain)"),
            ("eu-west-1", "Europe (Ireland)"),
            ("eu-west-2", "Europe (London)"),
            ("eu-west-3", "Europe (Paris)"),
            ("il-central-1", "Israel (Tel Aviv)"),
            ("me-central-1", "Middle East (UAE)"),
            ("me-south-1", "Middle East (Bahrain)"),
            ("mx-central-1", "Mexico (Central)"),
            ("sa-east-1", "South America (Sao Paulo)"),
            ("us-east-1", "US East (N. Virginia)"),
            ("us-east-2", "US East (Ohio)"),
            ("us-west-1", "US West (N. California)"),
            ("us-west-2", "US West (Oregon)"),
        ],
    },
    PartitionDef {
        id: AWS_CN_PARTITION_ID,
        name: "AWS China",
        dns_suffix: "amazonaws.com.cn",
        region_regex: r"^cn\-\w+\-\d+$",
        regions: &[
            ("cn-north-1", "China (Beijing)"),
            ("cn-northwest-1", "China (Ningxia)"),
        ],
    },
    PartitionDef {
        id: AWS_US_GOV_PARTITION_ID,
        name: "AWS GovCloud (US)",
        dns_suffix: "amazonaws.com",
        region_regex: r"^us\-gov\-\w+\-\d+$",
        regions: &[
            ("us-gov-east-1", "AWS GovCloud (US-East)"),
            ("us-gov-west-1", "AWS GovCloud (US-West)"),
        ],
    },
    PartitionDef {
        id: AWS_ISO_PARTITION_ID,
        name: "AWS ISO (US)",
        dns_suffix: "c2s.ic.gov",
        region_regex: r"^us\-iso\-\w+\-\d+$",
        regions: &[
            ("us-iso-east-1", "US ISO East"),
            ("us-iso-west-1", "US ISO WEST"),
        ],
    },
    PartitionDef {
        id: AWS_ISO_B_PARTITION_ID,
        name: "AWS ISOB (US)",
        dns_suffix: "sc2s.sgov.gov",
        region_regex: r"^us\-isob\-\w+\-\d+$",
        regions: &[("us-isob-east-1", "US ISOB East (Ohio)")],
    },
    PartitionDef {
        id: AWS_ISO_E_PARTITION_ID,
        name: "AWS ISOE (Europe)",
        dns_suffix: "cloud.adc-e.uk",
        region_regex: r"^eu\-isoe\-\w+\-\d+$",
        regions: &[("eu-isoe-west-1", "EU ISOE West")],
    },
    PartitionDef {
        id: AWS_ISO_F_PARTITION_ID,
        name: "AWS ISOF",
        dns_suffix: "csp.hci.ic.gov",
        region_regex: r"^us\-isof\-\w+\-\d+$",
        regions: &[
            ("us-isof-east-1", "US ISOF EAST"),
            ("us-isof-south-1", "US ISOF SOUTH"),
        ],
    },
    PartitionDef {
        id: AWS_EUSC_PARTITION_ID,
        name: "AWS EUSC",
        dns_suffix: "amazonaws.eu",
        region_regex: r"^eusc\-(de)\-\w+\-\d+$",
        regions: &[("eusc-de-east-1", "EU (Germany) Sovereign Cloud")],
    },
];

static PARTITIONS: LazyLock<Vec<Partition>> = LazyLock::new(|| {
    PARTITION_DEFS
        .iter()
        .map(|def| Partition {
            id: def.id,
            name: def.name,
            dns_suffix: def.dns_suffix,
            region_regex: def.region_regex,
            regions: def
                .regions
                .iter()
                .map(|&(id, description)| Region {
                    id,
                    description,
                    partition: def.id,
                })
                .collect(),
            matcher: match Regex::new(def.region_regex) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(
                        "invalid region pattern for partition {}, pattern matching disabled: {}",
                        def.id, e
                    );
                    None
                }
            },
        })
        .collect()
});

/// All known partitions, standard partition first
pub fn default_partitions() -> &'static [Partition] {
    &PARTITIONS
}

/// Look up a partition by id
pub fn partition_by_id(id: &str) -> Option<&'static Partition> {
    default_partitions().iter().find(|p| p.id == id)
}

/// Iterate every region in the catalog
pub fn all_regions() -> impl Iterator<Item = &'static Region> {
    default_partitions().iter().flat_map(|p| p.regions.iter())
}

/// Find a catalog region by its exact id
pub fn find_region_by_name(name: &str) -> Result<&'static Region, LookupError> {
    all_regions()
        .find(|r| r.id == name)
        .ok_or_else(|| LookupError::RegionNotFound {
            name: name.to_string(),
        })
}

/// Partition a region belongs to
///
/// Listed regions match exactly; otherwise the partition naming patterns are
/// tried, and anything left over is treated as the standard partition.
pub fn partition_for_region(region_id: &str) -> &'static Partition {
    let partitions = default_partitions();

    if let Some(p) = partitions.iter().find(|p| p.contains_region(region_id)) {
        return p;
    }

    if let Some(p) = partitions.iter().find(|p| p.matches_region(region_id)) {
        debug!(
            "region {} not in catalog, matched partition {} by pattern",
            region_id, p.id
        );
        return p;
    }

    debug!(
        "region {} matches no partition, using {}",
        region_id, AWS_PARTITION_ID
    );
    &partitions[0]
}
