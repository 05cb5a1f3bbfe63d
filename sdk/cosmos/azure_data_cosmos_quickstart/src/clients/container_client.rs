// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    constants,
    feed::DocumentFeed,
    models::{ContainerProperties, ThroughputProperties},
    pipeline::{CosmosPipeline, CosmosRequest, CosmosResponse},
    resource_context::{ResourceLink, ResourceType},
    Error, FeedPage, FeedPager, PartitionKey, Query, QueryOptions,
};

/// Defines the methods provided by a [`ContainerClient`]
///
/// This trait is intended to allow you to mock out the `ContainerClient` when testing your application.
/// Rather than depending on `ContainerClient`, you can depend on a generic parameter constrained by this trait, or an `impl ContainerClientMethods` type.
pub trait ContainerClientMethods {
    /// Returns the identifier of the container.
    fn id(&self) -> &str;

    /// Reads the properties of the container.
    ///
    /// Fails with [`Error::NotFound`] if the container does not exist.
    #[allow(async_fn_in_trait)] // REASON: See https://github.com/Azure/azure-sdk-for-rust/issues/1796 for detailed justification
    async fn read(&self) -> crate::Result<ContainerProperties>;

    /// Reads the throughput offer provisioned for this container.
    ///
    /// Fails with [`Error::Unsupported`] when the account can't report one, for example on serverless
    /// accounts or when the throughput is shared at the database level.
    #[allow(async_fn_in_trait)] // REASON: See https://github.com/Azure/azure-sdk-for-rust/issues/1796 for detailed justification
    async fn read_throughput(&self) -> crate::Result<ThroughputProperties>;

    async fn replace_throughput(
        &self,
        throughput: ThroughputProperties,
    ) -> crate::Result<ThroughputProperties>;

    async fn create_item<T: Serialize + DeserializeOwned>(
        &self,
        partition_key: PartitionKey,
        item: &T,
    ) -> crate::Result<T>;

    async fn read_item<T: DeserializeOwned>(
        &self,
        partition_key: PartitionKey,
        item_id: &str,
    ) -> crate::Result<T>;

    /// Replaces an existing item.
    ///
    /// Fails with [`Error::NotFound`] if there is no such item in the partition.
    #[allow(async_fn_in_trait)] // REASON: See https://github.com/Azure/azure-sdk-for-rust/issues/1796 for detailed justification
    async fn replace_item<T: Serialize + DeserializeOwned>(
        &self,
        partition_key: PartitionKey,
        item_id: &str,
        item: &T,
    ) -> crate::Result<T>;

    /// Creates the item, or replaces it if it already exists.
    #[allow(async_fn_in_trait)] // REASON: See https://github.com/Azure/azure-sdk-for-rust/issues/1796 for detailed justification
    async fn upsert_item<T: Serialize + DeserializeOwned>(
        &self,
        partition_key: PartitionKey,
        item: &T,
    ) -> crate::Result<T>;

    async fn delete_item(&self, partition_key: PartitionKey, item_id: &str) -> crate::Result<()>;

    /// Executes a query against the items in the container.
    ///
    /// Nothing is sent until the first page is polled.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn doc() {
    /// # use azure_data_cosmos_quickstart::{clients::{ContainerClient, ContainerClientMethods}, Query};
    /// # use futures::TryStreamExt;
    /// # let container_client: ContainerClient = panic!("this is a non-running example");
    /// let query = Query::from("SELECT * FROM r WHERE r.partitionKey = @pk")
    ///     .with_parameter("@pk", "Account1")
    ///     .unwrap();
    /// let mut pages = container_client.query_items::<serde_json::Value>(query, None);
    /// while let Some(page) = pages.try_next().await.unwrap() {
    ///     println!("{} items", page.items().len());
    /// }
    /// # }
    /// ```
    fn query_items<T: DeserializeOwned + 'static>(
        &self,
        query: Query,
        options: Option<QueryOptions>,
    ) -> FeedPager<T>;

    /// Reads every item in the container, one page at a time.
    fn read_all_items<T: DeserializeOwned + 'static>(
        &self,
        options: Option<QueryOptions>,
    ) -> FeedPager<T> {
        self.query_items(Query::from("SELECT * FROM root"), options)
    }
}

/// A client for working with a specific container in a Cosmos DB account.
///
/// You can get a `ContainerClient` by calling [`DatabaseClient::container_client()`](crate::clients::DatabaseClientMethods::container_client()).
#[derive(Clone, Debug)]
pub struct ContainerClient {
    container_id: String,
    link: ResourceLink,
    items_link: ResourceLink,
    pipeline: CosmosPipeline,
}

impl ContainerClient {
    pub(crate) fn new(pipeline: CosmosPipeline, database_link: &ResourceLink, id: &str) -> Self {
        let link = database_link.feed(ResourceType::Containers).item(id);
        let items_link = link.feed(ResourceType::Items);
        Self {
            container_id: id.to_string(),
            link,
            items_link,
            pipeline,
        }
    }

    fn item_request(
        &self,
        method: Method,
        partition_key: &PartitionKey,
        item_id: &str,
    ) -> crate::Result<CosmosRequest> {
        Ok(
            CosmosRequest::new(method, self.items_link.item(item_id))
                .header(constants::PARTITION_KEY, partition_key.to_header_value()?),
        )
    }

    /// Builds the POST that creates `item`, or upserts it when `upsert` is set.
    fn write_item_request<T: Serialize>(
        &self,
        partition_key: &PartitionKey,
        item: &T,
        upsert: bool,
    ) -> crate::Result<CosmosRequest> {
        let request = CosmosRequest::new(Method::POST, self.items_link.clone())
            .header(constants::PARTITION_KEY, partition_key.to_header_value()?);
        let request = if upsert {
            request.header(constants::IS_UPSERT, "True")
        } else {
            request
        };
        request.json(item)
    }
}

/// Builds one page request of a cross-partition query against `items_link`.
fn query_request(
    items_link: &ResourceLink,
    query: &Query,
    max_item_count: Option<u32>,
    continuation: Option<String>,
) -> crate::Result<CosmosRequest> {
    let mut request = CosmosRequest::new(Method::POST, items_link.clone())
        .header(constants::QUERY_ENABLE_CROSS_PARTITION, "True")
        .query(query)?;
    if let Some(count) = max_item_count {
        request = request.header(constants::MAX_ITEM_COUNT, count.to_string());
    }
    if let Some(continuation) = continuation {
        request = request.header(constants::CONTINUATION, continuation);
    }
    Ok(request)
}

fn feed_page<T: DeserializeOwned>(response: CosmosResponse) -> crate::Result<FeedPage<T>> {
    let continuation = response.continuation();
    let feed: DocumentFeed<T> = response.json()?;
    Ok(FeedPage::new(feed.documents, continuation))
}

// Offers are looked up by the container's resource id, not its name.
fn offers_query_request(rid: String) -> crate::Result<CosmosRequest> {
    let query = Query::from("SELECT * FROM root WHERE root.offerResourceId = @rid")
        .with_parameter("@rid", rid)?;
    CosmosRequest::new(Method::POST, ResourceLink::root(ResourceType::Offers)).query(&query)
}

/// Picks the container's offer out of an offers query result.
///
/// A `400` and an empty result both mean the account has no dedicated offer for the container.
fn first_offer(
    response: crate::Result<CosmosResponse>,
    container_id: &str,
) -> crate::Result<ThroughputProperties> {
    #[derive(Deserialize)]
    struct OfferResults {
        #[serde(rename = "Offers")]
        pub offers: Vec<ThroughputProperties>,
    }

    let results: OfferResults = match response {
        Ok(response) => response.json()?,
        Err(Error::Service {
            status: StatusCode::BAD_REQUEST,
            message,
            ..
        }) => return Err(Error::Unsupported { message }),
        Err(e) => return Err(e),
    };

    results
        .offers
        .into_iter()
        .next()
        .ok_or_else(|| Error::Unsupported {
            message: format!("container '{container_id}' has no dedicated throughput offer"),
        })
}

fn replace_offer_request(throughput: &ThroughputProperties) -> crate::Result<CosmosRequest> {
    let link = ResourceLink::root(ResourceType::Offers).item(&throughput.offer_id);
    CosmosRequest::new(Method::PUT, link).json(throughput)
}

impl ContainerClientMethods for ContainerClient {
    fn id(&self) -> &str {
        &self.container_id
    }

    async fn read(&self) -> crate::Result<ContainerProperties> {
        self.pipeline
            .send(CosmosRequest::new(Method::GET, self.link.clone()))
            .await?
            .json()
    }

    async fn read_throughput(&self) -> crate::Result<ThroughputProperties> {
        #[derive(Deserialize)]
        struct OfferResults {
            #[serde(rename = "Offers")]
            pub offers: Vec<ThroughputProperties>,
        }

        // Offers are looked up by the container's resource id, not its name.
        let properties = self.read().await?;
        let rid = properties
            .system_properties
            .resource_id
            .ok_or_else(|| Error::MalformedResponse {
                message: format!("container '{}' has no '_rid'", self.container_id),
            })?;

        let query = Query::from("SELECT * FROM root WHERE root.offerResourceId = @rid")
            .with_parameter("@rid", rid)?;
        let request =
            CosmosRequest::new(Method::POST, ResourceLink::root(ResourceType::Offers)).query(&query)?;
        let results: OfferResults = match self.pipeline.send(request).await {
            Ok(response) => response.json()?,
            Err(Error::Service {
                status: StatusCode::BAD_REQUEST,
                message,
                ..
            }) => return Err(Error::Unsupported { message }),
            Err(e) => return Err(e),
        };

        results
            .offers
            .into_iter()
            .next()
            .ok_or_else(|| Error::Unsupported {
                message: format!(
                    "container '{}' has no dedicated throughput offer",
                    self.container_id
                ),
            })
    }

    async fn replace_throughput(
        &self,
        throughput: ThroughputProperties,
    ) -> crate::Result<ThroughputProperties> {
        let link = ResourceLink::root(ResourceType::Offers).item(&throughput.offer_id);
        let request = CosmosRequest::new(Method::PUT, link).json(&throughput)?;
        self.pipeline.send(request).await?.json()
    }

    async fn create_item<T: Serialize + DeserializeOwned>(
        &self,
        partition_key: PartitionKey,
        item: &T,
    ) -> crate::Result<T> {
        let request = CosmosRequest::new(Method::POST, self.items_link.clone())
            .header(constants::PARTITION_KEY, partition_key.to_header_value()?)
            .json(item)?;
        self.pipeline.send(request).await?.json()
    }

    async fn read_item<T: DeserializeOwned>(
        &self,
        partition_key: PartitionKey,
        item_id: &str,
    ) -> crate::Result<T> {
        let request = self.item_request(Method::GET, &partition_key, item_id)?;
        self.pipeline.send(request).await?.json()
    }

    async fn replace_item<T: Serialize + DeserializeOwned>(
        &self,
        partition_key: PartitionKey,
        item_id: &str,
        item: &T,
    ) -> crate::Result<T> {
        let request = self
            .item_request(Method::PUT, &partition_key, item_id)?
            .json(item)?;
        self.pipeline.send(request).await?.json()
    }

    async fn upsert_item<T: Serialize + DeserializeOwned>(
        &self,
        partition_key: PartitionKey,
        item: &T,
    ) -> crate::Result<T> {
        let request = CosmosRequest::new(Method::POST, self.items_link.clone())
            .header(constants::PARTITION_KEY, partition_key.to_header_value()?)
            .header(constants::IS_UPSERT, "True")
            .json(item)?;
        self.pipeline.send(request).await?.json()
    }

    async fn delete_item(&self, partition_key: PartitionKey, item_id: &str) -> crate::Result<()> {
        let request = self.item_request(Method::DELETE, &partition_key, item_id)?;
        self.pipeline.send(request).await?;
        Ok(())
    }

    fn query_items<T: DeserializeOwned + 'static>(
        &self,
        query: Query,
        options: Option<QueryOptions>,
    ) -> FeedPager<T> {
        let pipeline = self.pipeline.clone();
        let items_link = self.items_link.clone();
        let max_item_count = options.unwrap_or_default().max_item_count;

        FeedPager::from_callback(move |continuation: Option<String>| {
            let pipeline = pipeline.clone();
            let request = query_request(&items_link, &query, max_item_count, continuation);
            async move { feed_page(pipeline.send(request?).await?) }
        })
    }
}
