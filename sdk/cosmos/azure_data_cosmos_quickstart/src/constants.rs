// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Header names and values used by the Cosmos DB REST API.

pub const API_VERSION: &str = "2018-12-31";
pub const USER_AGENT: &str = "CosmosDBRustQuickstart";

pub const MS_DATE: &str = "x-ms-date";
pub const VERSION: &str = "x-ms-version";
pub const PARTITION_KEY: &str = "x-ms-documentdb-partitionkey";
pub const IS_UPSERT: &str = "x-ms-documentdb-is-upsert";
pub const QUERY: &str = "x-ms-documentdb-isquery";
pub const QUERY_ENABLE_CROSS_PARTITION: &str = "x-ms-documentdb-query-enablecrosspartition";
pub const MAX_ITEM_COUNT: &str = "x-ms-max-item-count";
pub const CONTINUATION: &str = "x-ms-continuation";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_QUERY_JSON: &str = "application/query+json";
