// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The partition key value of an item.
///
/// Every point operation needs both the item id and this value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PartitionKey(String);

impl PartitionKey {
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Formats the key for the `x-ms-documentdb-partitionkey` header, a JSON array with one element.
    pub(crate) fn to_header_value(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&[&self.0])?)
    }
}

impl From<&str> for PartitionKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PartitionKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for PartitionKey {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
