// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use reqwest::Method;

use crate::{
    clients::{ContainerClient, ContainerClientMethods},
    models::{ContainerProperties, DatabaseProperties},
    pipeline::{CosmosPipeline, CosmosRequest},
    resource_context::{ResourceLink, ResourceType},
};

/// Defines the methods provided by a [`DatabaseClient`]
///
/// This trait is intended to allow you to mock out the `DatabaseClient` when testing your application.
/// Rather than depending on `DatabaseClient`, you can depend on a generic parameter constrained by this trait, or an `impl DatabaseClientMethods` type.
pub trait DatabaseClientMethods {
    type Container: ContainerClientMethods;

    /// Returns the identifier of the Cosmos database.
    fn id(&self) -> &str;

    /// Reads the properties of the database.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) if the database does not exist.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn doc() {
    /// # use azure_data_cosmos_quickstart::clients::{DatabaseClient, DatabaseClientMethods};
    /// # let database_client: DatabaseClient = panic!("this is a non-running example");
    /// let properties = database_client.read().await.unwrap();
    /// println!("database {} has _rid {:?}", properties.id, properties.system_properties.resource_id);
    /// # }
    /// ```
    #[allow(async_fn_in_trait)] // REASON: See https://github.com/Azure/azure-sdk-for-rust/issues/1796 for detailed justification
    async fn read(&self) -> crate::Result<DatabaseProperties>;

    /// Deletes the database and everything in it.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) if the database does not exist.
    #[allow(async_fn_in_trait)] // REASON: See https://github.com/Azure/azure-sdk-for-rust/issues/1796 for detailed justification
    async fn delete(&self) -> crate::Result<()>;

    /// Creates a container in this database.
    ///
    /// Fails with [`Error::AlreadyExists`](crate::Error::AlreadyExists) if a container with this id exists.
    #[allow(async_fn_in_trait)] // REASON: See https://github.com/Azure/azure-sdk-for-rust/issues/1796 for detailed justification
    async fn create_container(
        &self,
        properties: ContainerProperties,
    ) -> crate::Result<Self::Container>;

    /// Gets a client for the container with the specified id.
    ///
    /// # Arguments
    /// * `id` - The id of the container.
    fn container_client(&self, id: &str) -> Self::Container;
}

/// A client for working with a specific database in a Cosmos DB account.
///
/// You can get a `DatabaseClient` by calling [`CosmosClient::database_client()`](crate::clients::CosmosClientMethods::database_client()).
#[derive(Clone, Debug)]
pub struct DatabaseClient {
    database_id: String,
    link: ResourceLink,
    pipeline: CosmosPipeline,
}

impl DatabaseClient {
    pub(crate) fn new(pipeline: CosmosPipeline, databases_link: &ResourceLink, id: &str) -> Self {
        Self {
            database_id: id.to_string(),
            link: databases_link.item(id),
            pipeline,
        }
    }
}

impl DatabaseClientMethods for DatabaseClient {
    type Container = ContainerClient;

    fn id(&self) -> &str {
        &self.database_id
    }

    async fn read(&self) -> crate::Result<DatabaseProperties> {
        self.pipeline
            .send(CosmosRequest::new(Method::GET, self.link.clone()))
            .await?
            .json()
    }

    async fn delete(&self) -> crate::Result<()> {
        self.pipeline
            .send(CosmosRequest::new(Method::DELETE, self.link.clone()))
            .await?;
        Ok(())
    }

    async fn create_container(
        &self,
        properties: ContainerProperties,
    ) -> crate::Result<ContainerClient> {
        let request = CosmosRequest::new(Method::POST, self.link.feed(ResourceType::Containers))
            .json(&properties)?;
        self.pipeline.send(request).await?;
        Ok(self.container_client(&properties.id))
    }

    fn container_client(&self, id: &str) -> ContainerClient {
        ContainerClient::new(self.pipeline.clone(), &self.link, id)
    }
}
