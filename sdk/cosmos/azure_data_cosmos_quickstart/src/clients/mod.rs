// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Clients used to interact with Azure Cosmos DB.
//!
//! Each client has a matching `*Methods` trait. The quickstart is written against the traits,
//! so tests can swap in an in-memory account.

mod container_client;
mod cosmos_client;
mod database_client;

pub use container_client::{ContainerClient, ContainerClientMethods};
pub use cosmos_client::{CosmosClient, CosmosClientMethods};
pub use database_client::{DatabaseClient, DatabaseClientMethods};
