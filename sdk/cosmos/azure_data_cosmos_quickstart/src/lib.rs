// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

#![doc = include_str!("../README.md")]

mod authorization;
pub mod clients;
mod config;
pub mod constants;
mod error;
mod feed;
pub mod items;
pub mod models;
mod partition_key;
mod pipeline;
pub mod provision;
mod query;
pub mod quickstart;
mod resource_context;
pub mod throughput;

pub use azure_core::credentials::Secret;
pub use config::{Settings, ACCOUNT_HOST_ENV, ACCOUNT_KEY_ENV, CONTAINER_ENV, DATABASE_ENV};
pub use error::{Error, Result};
pub use feed::{FeedPage, FeedPager};
pub use partition_key::PartitionKey;
pub use query::{Query, QueryOptions};
