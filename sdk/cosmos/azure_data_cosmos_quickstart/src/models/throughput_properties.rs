// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};

use crate::models::SystemProperties;

/// A throughput offer attached to a database or container.
///
/// Read with [`ContainerClientMethods::read_throughput`](crate::clients::ContainerClientMethods::read_throughput)
/// and written back, after [`set_throughput`](ThroughputProperties::set_throughput), with
/// [`ContainerClientMethods::replace_throughput`](crate::clients::ContainerClientMethods::replace_throughput).
#[derive(Clone, Default, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThroughputProperties {
    resource: String,
    #[serde(rename = "content")]
    offer: Offer,
    #[serde(rename = "id")]
    pub(crate) offer_id: String,
    offer_resource_id: String,
    offer_type: String,
    offer_version: String,
    #[serde(flatten)]
    pub(crate) system_properties: SystemProperties,
}

impl ThroughputProperties {
    /// Creates an offer for a fixed (manual) throughput, in RU/s.
    pub fn manual(throughput: i32) -> Self {
        Self {
            offer_type: "Invalid".to_string(),
            offer_version: "V2".to_string(),
            offer: Offer {
                offer_throughput: throughput,
                offer_autopilot_settings: None,
            },
            ..Default::default()
        }
    }

    /// The provisioned throughput, in RU/s.
    pub fn throughput(&self) -> i32 {
        self.offer.offer_throughput
    }

    pub fn set_throughput(&mut self, throughput: i32) {
        self.offer.offer_throughput = throughput;
    }
}

#[derive(Clone, Default, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct Offer {
    pub offer_throughput: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_autopilot_settings: Option<AutoscaleSettings>,
}

#[derive(Clone, Default, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct AutoscaleSettings {
    pub max_throughput: i32,
}
