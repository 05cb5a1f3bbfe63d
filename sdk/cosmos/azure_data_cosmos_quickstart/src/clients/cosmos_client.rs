// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::credentials::Secret;
use reqwest::Method;
use url::Url;

use crate::{
    authorization::AuthorizationToken,
    clients::{DatabaseClient, DatabaseClientMethods},
    models::DatabaseProperties,
    pipeline::{CosmosPipeline, CosmosRequest},
    resource_context::{ResourceLink, ResourceType},
};

/// Defines the methods provided by a [`CosmosClient`]
///
/// This trait is intended to allow you to mock out the `CosmosClient` when testing your application.
/// Rather than depending on `CosmosClient`, you can depend on a generic parameter constrained by this trait.
pub trait CosmosClientMethods {
    type Database: DatabaseClientMethods;

    /// Creates a new database.
    ///
    /// Fails with [`Error::AlreadyExists`](crate::Error::AlreadyExists) if a database with this id exists.
    #[allow(async_fn_in_trait)] // REASON: See https://github.com/Azure/azure-sdk-for-rust/issues/1796 for detailed justification
    async fn create_database(&self, id: &str) -> crate::Result<Self::Database>;

    /// Gets a client for the database with the specified id.
    ///
    /// This does not contact the service; use [`DatabaseClientMethods::read`] to check that the database exists.
    fn database_client(&self, id: &str) -> Self::Database;
}

/// Client for an Azure Cosmos DB account, authenticated with the account key.
#[derive(Clone, Debug)]
pub struct CosmosClient {
    pipeline: CosmosPipeline,
    databases_link: ResourceLink,
}

impl CosmosClient {
    /// Creates a client for the account at `endpoint`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The account endpoint, e.g. `https://myaccount.documents.azure.com:443/`.
    /// * `key` - The base64-encoded primary or secondary key of the account.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use azure_data_cosmos_quickstart::{clients::CosmosClient, Secret};
    ///
    /// let client = CosmosClient::with_key(
    ///     "https://myaccount.documents.azure.com:443/",
    ///     &Secret::new("bXkgYWNjb3VudCBrZXk="),
    /// )
    /// .unwrap();
    /// ```
    pub fn with_key(endpoint: &str, key: &Secret) -> crate::Result<Self> {
        let endpoint: Url = endpoint.parse()?;
        let auth = AuthorizationToken::primary_key(key)?;
        Ok(Self {
            pipeline: CosmosPipeline::new(endpoint, auth)?,
            databases_link: ResourceLink::root(ResourceType::Databases),
        })
    }
}

impl CosmosClientMethods for CosmosClient {
    type Database = DatabaseClient;

    async fn create_database(&self, id: &str) -> crate::Result<DatabaseClient> {
        let request = CosmosRequest::new(Method::POST, self.databases_link.clone())
            .json(&DatabaseProperties::new(id))?;
        self.pipeline.send(request).await?;
        Ok(self.database_client(id))
    }

    fn database_client(&self, id: &str) -> DatabaseClient {
        DatabaseClient::new(self.pipeline.clone(), &self.databases_link, id)
    }
}
