// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Create-or-find provisioning for the quickstart database and container.

use tracing::info;

use crate::{
    clients::{ContainerClientMethods, CosmosClientMethods, DatabaseClientMethods},
    models::ContainerProperties,
    Error,
};

/// The partition key path of the quickstart container.
pub const PARTITION_KEY_PATH: &str = "/partitionKey";

/// The result of an idempotent create.
#[derive(Debug)]
pub enum Provisioned<T> {
    Created(T),
    AlreadyExisted(T),
}

impl<T> Provisioned<T> {
    pub fn was_created(&self) -> bool {
        matches!(self, Provisioned::Created(_))
    }

    pub fn get(&self) -> &T {
        match self {
            Provisioned::Created(value) | Provisioned::AlreadyExisted(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Provisioned::Created(value) | Provisioned::AlreadyExisted(value) => value,
        }
    }
}

/// Creates the database `id`, or finds it if it already exists.
pub async fn ensure_database<C: CosmosClientMethods>(
    client: &C,
    id: &str,
) -> crate::Result<Provisioned<C::Database>> {
    match client.create_database(id).await {
        Ok(database) => {
            info!("Database with id '{}' created", id);
            Ok(Provisioned::Created(database))
        }
        Err(Error::AlreadyExists { .. }) => {
            let database = client.database_client(id);
            database.read().await?;
            info!("Database with id '{}' was found", id);
            Ok(Provisioned::AlreadyExisted(database))
        }
        Err(e) => Err(e),
    }
}

/// Creates the container `id`, partitioned on [`PARTITION_KEY_PATH`], or finds it if it already exists.
pub async fn ensure_container<D: DatabaseClientMethods>(
    database: &D,
    id: &str,
) -> crate::Result<Provisioned<D::Container>> {
    match database
        .create_container(ContainerProperties::new(id, PARTITION_KEY_PATH))
        .await
    {
        Ok(container) => {
            info!("Container with id '{}' created", id);
            Ok(Provisioned::Created(container))
        }
        Err(Error::AlreadyExists { .. }) => {
            let container = database.container_client(id);
            container.read().await?;
            info!("Container with id '{}' was found", id);
            Ok(Provisioned::AlreadyExisted(container))
        }
        Err(e) => Err(e),
    }
}
