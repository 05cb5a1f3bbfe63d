// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Item operations used by the quickstart, each a single call against a provisioned container.
//!
//! None of these swallow errors. Callers match on the conditions they expect.

use serde::{de::DeserializeOwned, Serialize};

use crate::{clients::ContainerClientMethods, FeedPager, PartitionKey, Query, QueryOptions};

/// The filter used by [`query_by_partition_key`].
///
/// It filters on the `partitionKey` field like any other property. The service still routes it
/// across partitions; it is not the same as a partition-scoped read.
pub const PARTITION_KEY_QUERY: &str = "SELECT * FROM r WHERE r.partitionKey = @account_number";

/// An item that knows its own id and partition key.
pub trait CosmosItem {
    fn id(&self) -> &str;
    fn partition_key(&self) -> PartitionKey;
}

/// Creates `item`. Fails with [`Error::AlreadyExists`](crate::Error::AlreadyExists) if its id is taken in its partition.
pub async fn insert<C, T>(container: &C, item: &T) -> crate::Result<T>
where
    C: ContainerClientMethods,
    T: CosmosItem + Serialize + DeserializeOwned,
{
    container.create_item(item.partition_key(), item).await
}

/// Reads one item by id and partition key.
pub async fn point_read<C, T>(
    container: &C,
    id: &str,
    partition_key: impl Into<PartitionKey>,
) -> crate::Result<T>
where
    C: ContainerClientMethods,
    T: DeserializeOwned,
{
    container.read_item(partition_key.into(), id).await
}

/// Lazily reads every item in the container, at most `page_size` per round trip.
pub fn scan<C, T>(container: &C, page_size: u32) -> FeedPager<T>
where
    C: ContainerClientMethods,
    T: DeserializeOwned + 'static,
{
    container.read_all_items(Some(QueryOptions {
        max_item_count: Some(page_size),
    }))
}

/// Queries for the items whose `partitionKey` field equals `value`.
pub fn query_by_partition_key<C, T>(container: &C, value: &str) -> crate::Result<FeedPager<T>>
where
    C: ContainerClientMethods,
    T: DeserializeOwned + 'static,
{
    let query = Query::from(PARTITION_KEY_QUERY).with_parameter("@account_number", value)?;
    Ok(container.query_items(query, None))
}

/// Reads an item, applies `mutate`, and writes it back.
///
/// The write is unconditional: a concurrent change between the read and the write is overwritten.
pub async fn replace<C, T, F>(
    container: &C,
    id: &str,
    partition_key: impl Into<PartitionKey>,
    mutate: F,
) -> crate::Result<T>
where
    C: ContainerClientMethods,
    T: Serialize + DeserializeOwned,
    F: FnOnce(&mut T),
{
    let partition_key = partition_key.into();
    let mut item: T = container.read_item(partition_key.clone(), id).await?;
    mutate(&mut item);
    container.replace_item(partition_key, id, &item).await
}

/// Like [`replace`], but writes with an upsert.
pub async fn upsert<C, T, F>(
    container: &C,
    id: &str,
    partition_key: impl Into<PartitionKey>,
    mutate: F,
) -> crate::Result<T>
where
    C: ContainerClientMethods,
    T: Serialize + DeserializeOwned,
    F: FnOnce(&mut T),
{
    let partition_key = partition_key.into();
    let mut item: T = container.read_item(partition_key.clone(), id).await?;
    mutate(&mut item);
    container.upsert_item(partition_key, &item).await
}

/// Deletes one item. Fails with [`Error::NotFound`](crate::Error::NotFound) if it isn't there.
pub async fn delete<C>(
    container: &C,
    id: &str,
    partition_key: impl Into<PartitionKey>,
) -> crate::Result<()>
where
    C: ContainerClientMethods,
{
    container.delete_item(partition_key.into(), id).await
}
