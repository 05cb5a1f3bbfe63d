// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Model types sent to and received from the Cosmos DB service.

mod sales_order;
mod throughput_properties;

use serde::{Deserialize, Serialize};

pub use sales_order::*;
pub use throughput_properties::ThroughputProperties;

/// Properties the service adds to every resource it returns.
#[derive(Clone, Default, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SystemProperties {
    /// The resource id, an opaque identifier the service uses to address the resource.
    #[serde(rename = "_rid", default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    #[serde(rename = "_self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    #[serde(rename = "_etag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Last modified time, in seconds since the Unix epoch.
    #[serde(rename = "_ts", default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<u64>,
}

/// Properties of a database.
#[derive(Clone, Default, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseProperties {
    pub id: String,

    #[serde(flatten)]
    pub system_properties: SystemProperties,
}

impl DatabaseProperties {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Properties of a container.
///
/// ```rust
/// # use azure_data_cosmos_quickstart::models::ContainerProperties;
/// let properties = ContainerProperties {
///     id: "Items".into(),
///     partition_key: "/partitionKey".into(),
///     ..Default::default()
/// };
/// assert_eq!(properties.partition_key.paths, ["/partitionKey"]);
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProperties {
    pub id: String,

    pub partition_key: PartitionKeyDefinition,

    #[serde(flatten)]
    pub system_properties: SystemProperties,
}

impl ContainerProperties {
    pub fn new(id: impl Into<String>, partition_key: impl Into<PartitionKeyDefinition>) -> Self {
        Self {
            id: id.into(),
            partition_key: partition_key.into(),
            ..Default::default()
        }
    }
}

/// Describes how items in a container are partitioned.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PartitionKeyDefinition {
    pub paths: Vec<String>,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

impl Default for PartitionKeyDefinition {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            kind: "Hash".to_string(),
            version: Some(2),
        }
    }
}

impl From<&str> for PartitionKeyDefinition {
    fn from(path: &str) -> Self {
        Self {
            paths: vec![path.to_string()],
            ..Default::default()
        }
    }
}

impl From<String> for PartitionKeyDefinition {
    fn from(path: String) -> Self {
        Self {
            paths: vec![path],
            ..Default::default()
        }
    }
}
