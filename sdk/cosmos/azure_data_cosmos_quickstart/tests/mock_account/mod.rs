// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! An in-memory Cosmos DB account for tests.
//!
//! Documents are kept as JSON keyed by `(partitionKey, id)`. Queries support
//! `SELECT * FROM x [WHERE x.field = @param [AND ...]]` and page their results with
//! numeric continuation tokens.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    rc::Rc,
};

use azure_data_cosmos_quickstart::{
    clients::{ContainerClientMethods, CosmosClientMethods, DatabaseClientMethods},
    models::{ContainerProperties, DatabaseProperties, SystemProperties, ThroughputProperties},
    Error, FeedPage, FeedPager, PartitionKey, Query, QueryOptions,
};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Throughput given to every new container unless the account is serverless.
pub const INITIAL_THROUGHPUT: i32 = 400;

/// Page size used when a query doesn't set one.
pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Default)]
struct ContainerState {
    partition_key_path: String,
    items: BTreeMap<(String, String), Value>,
    throughput: Option<i32>,
}

#[derive(Debug, Default)]
struct DatabaseState {
    containers: BTreeMap<String, ContainerState>,
}

#[derive(Debug, Default)]
struct AccountState {
    databases: BTreeMap<String, DatabaseState>,
    throughput: Option<i32>,
    faults: HashMap<String, StatusCode>,
    calls: Vec<String>,
}

impl AccountState {
    /// Records a call to `operation`, failing it if a fault is registered.
    fn call(&mut self, operation: &str, resource: &str) -> azure_data_cosmos_quickstart::Result<()> {
        self.calls.push(operation.to_string());
        match self.faults.get(operation) {
            Some(status) => Err(status_error(*status, resource)),
            None => Ok(()),
        }
    }

    fn container(
        &mut self,
        database_id: &str,
        container_id: &str,
    ) -> azure_data_cosmos_quickstart::Result<&mut ContainerState> {
        self.databases
            .get_mut(database_id)
            .and_then(|db| db.containers.get_mut(container_id))
            .ok_or_else(|| Error::NotFound {
                resource: format!("dbs/{database_id}/colls/{container_id}"),
            })
    }
}

/// Builds the error the REST client would return for `status`.
fn status_error(status: StatusCode, resource: &str) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound {
            resource: resource.to_string(),
        },
        StatusCode::CONFLICT => Error::AlreadyExists {
            resource: resource.to_string(),
        },
        _ => Error::Service {
            status,
            code: status.canonical_reason().map(|r| r.replace(' ', "")),
            message: format!("injected failure for '{resource}'"),
        },
    }
}

fn bad_request(message: impl Into<String>) -> Error {
    Error::Service {
        status: StatusCode::BAD_REQUEST,
        code: Some("BadRequest".to_string()),
        message: message.into(),
    }
}

/// An in-memory account. Clones share the same state.
#[derive(Clone, Debug, Default)]
pub struct MockAccount {
    state: Rc<RefCell<AccountState>>,
}

impl MockAccount {
    /// An account with provisioned throughput on every container.
    pub fn new() -> Self {
        Self::with_throughput(Some(INITIAL_THROUGHPUT))
    }

    /// An account that can't report throughput, like a serverless one.
    pub fn serverless() -> Self {
        Self::with_throughput(None)
    }

    pub fn with_throughput(throughput: Option<i32>) -> Self {
        let account = Self::default();
        account.state.borrow_mut().throughput = throughput;
        account
    }

    /// Makes every later call to `operation` fail with `status`.
    pub fn fail(&self, operation: &str, status: StatusCode) {
        self.state
            .borrow_mut()
            .faults
            .insert(operation.to_string(), status);
    }

    pub fn clear_faults(&self) {
        self.state.borrow_mut().faults.clear();
    }

    pub fn has_database(&self, id: &str) -> bool {
        self.state.borrow().databases.contains_key(id)
    }

    pub fn database_count(&self) -> usize {
        self.state.borrow().databases.len()
    }

    pub fn container_count(&self, database_id: &str) -> usize {
        self.state
            .borrow()
            .databases
            .get(database_id)
            .map_or(0, |db| db.containers.len())
    }

    pub fn partition_key_path(&self, database_id: &str, container_id: &str) -> Option<String> {
        let state = self.state.borrow();
        let container = state.databases.get(database_id)?.containers.get(container_id)?;
        Some(container.partition_key_path.clone())
    }

    pub fn item_count(&self, database_id: &str, container_id: &str) -> usize {
        self.state
            .borrow()
            .databases
            .get(database_id)
            .and_then(|db| db.containers.get(container_id))
            .map_or(0, |c| c.items.len())
    }

    pub fn throughput(&self, database_id: &str, container_id: &str) -> Option<i32> {
        self.state
            .borrow()
            .databases
            .get(database_id)
            .and_then(|db| db.containers.get(container_id))
            .and_then(|c| c.throughput)
    }

    /// How many times `operation` was called, including failed calls.
    pub fn calls_to(&self, operation: &str) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| c.as_str() == operation)
            .count()
    }
}

impl CosmosClientMethods for MockAccount {
    type Database = MockDatabase;

    async fn create_database(
        &self,
        id: &str,
    ) -> azure_data_cosmos_quickstart::Result<MockDatabase> {
        let mut state = self.state.borrow_mut();
        state.call("create_database", "dbs")?;
        if state.databases.contains_key(id) {
            return Err(Error::AlreadyExists {
                resource: format!("dbs/{id}"),
            });
        }
        state.databases.insert(id.to_string(), DatabaseState::default());
        drop(state);
        Ok(self.database_client(id))
    }

    fn database_client(&self, id: &str) -> MockDatabase {
        MockDatabase {
            account: self.clone(),
            id: id.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MockDatabase {
    account: MockAccount,
    id: String,
}

impl DatabaseClientMethods for MockDatabase {
    type Container = MockContainer;

    fn id(&self) -> &str {
        &self.id
    }

    async fn read(&self) -> azure_data_cosmos_quickstart::Result<DatabaseProperties> {
        let link = format!("dbs/{}", self.id);
        let mut state = self.account.state.borrow_mut();
        state.call("read_database", &link)?;
        if !state.databases.contains_key(&self.id) {
            return Err(Error::NotFound { resource: link });
        }
        Ok(DatabaseProperties::new(&self.id))
    }

    async fn delete(&self) -> azure_data_cosmos_quickstart::Result<()> {
        let link = format!("dbs/{}", self.id);
        let mut state = self.account.state.borrow_mut();
        state.call("delete_database", &link)?;
        match state.databases.remove(&self.id) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound { resource: link }),
        }
    }

    async fn create_container(
        &self,
        properties: ContainerProperties,
    ) -> azure_data_cosmos_quickstart::Result<MockContainer> {
        let link = format!("dbs/{}/colls", self.id);
        let mut state = self.account.state.borrow_mut();
        state.call("create_container", &link)?;
        let throughput = state.throughput;
        let database = state
            .databases
            .get_mut(&self.id)
            .ok_or_else(|| Error::NotFound {
                resource: format!("dbs/{}", self.id),
            })?;
        if database.containers.contains_key(&properties.id) {
            return Err(Error::AlreadyExists {
                resource: format!("{link}/{}", properties.id),
            });
        }
        database.containers.insert(
            properties.id.clone(),
            ContainerState {
                partition_key_path: properties.partition_key.paths.join(","),
                items: BTreeMap::new(),
                throughput,
            },
        );
        drop(state);
        Ok(self.container_client(&properties.id))
    }

    fn container_client(&self, id: &str) -> MockContainer {
        MockContainer {
            account: self.account.clone(),
            database_id: self.id.clone(),
            id: id.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MockContainer {
    account: MockAccount,
    database_id: String,
    id: String,
}

impl MockContainer {
    fn item_link(&self, item_id: &str) -> String {
        format!("dbs/{}/colls/{}/docs/{item_id}", self.database_id, self.id)
    }

    /// Serializes `item` and checks that its `id` and `partitionKey` agree with the request.
    fn to_document<T: Serialize>(
        item: &T,
        partition_key: &PartitionKey,
    ) -> azure_data_cosmos_quickstart::Result<(String, Value)> {
        let document = serde_json::to_value(item)?;
        let id = document
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| bad_request("the document has no 'id'"))?
            .to_string();
        if document.get("partitionKey").and_then(Value::as_str) != Some(partition_key.value()) {
            return Err(bad_request(
                "partition key provided doesn't match the one in the document",
            ));
        }
        Ok((id, document))
    }
}

impl ContainerClientMethods for MockContainer {
    fn id(&self) -> &str {
        &self.id
    }

    async fn read(&self) -> azure_data_cosmos_quickstart::Result<ContainerProperties> {
        let mut state = self.account.state.borrow_mut();
        state.call("read_container", &self.id)?;
        let container = state.container(&self.database_id, &self.id)?;
        Ok(ContainerProperties {
            id: self.id.clone(),
            partition_key: container.partition_key_path.as_str().into(),
            system_properties: SystemProperties {
                resource_id: Some(format!("{}-rid", self.id)),
                ..Default::default()
            },
        })
    }

    async fn read_throughput(&self) -> azure_data_cosmos_quickstart::Result<ThroughputProperties> {
        let mut state = self.account.state.borrow_mut();
        state.call("read_throughput", "offers")?;
        let container = state.container(&self.database_id, &self.id)?;
        match container.throughput {
            Some(throughput) => Ok(ThroughputProperties::manual(throughput)),
            None => Err(Error::Unsupported {
                message: "Reading or replacing offers is not supported for serverless accounts."
                    .to_string(),
            }),
        }
    }

    async fn replace_throughput(
        &self,
        throughput: ThroughputProperties,
    ) -> azure_data_cosmos_quickstart::Result<ThroughputProperties> {
        let mut state = self.account.state.borrow_mut();
        state.call("replace_throughput", "offers")?;
        let container = state.container(&self.database_id, &self.id)?;
        if container.throughput.is_none() {
            return Err(bad_request("the container has no offer"));
        }
        container.throughput = Some(throughput.throughput());
        Ok(throughput)
    }

    async fn create_item<T: Serialize + DeserializeOwned>(
        &self,
        partition_key: PartitionKey,
        item: &T,
    ) -> azure_data_cosmos_quickstart::Result<T> {
        let (id, document) = Self::to_document(item, &partition_key)?;
        let link = self.item_link(&id);
        let mut state = self.account.state.borrow_mut();
        state.call("create_item", &link)?;
        let container = state.container(&self.database_id, &self.id)?;
        let key = (partition_key.value().to_string(), id);
        if container.items.contains_key(&key) {
            return Err(Error::AlreadyExists { resource: link });
        }
        container.items.insert(key, document.clone());
        Ok(serde_json::from_value(document)?)
    }

    async fn read_item<T: DeserializeOwned>(
        &self,
        partition_key: PartitionKey,
        item_id: &str,
    ) -> azure_data_cosmos_quickstart::Result<T> {
        let link = self.item_link(item_id);
        let mut state = self.account.state.borrow_mut();
        state.call("read_item", &link)?;
        let container = state.container(&self.database_id, &self.id)?;
        let key = (partition_key.value().to_string(), item_id.to_string());
        let document = container
            .items
            .get(&key)
            .cloned()
            .ok_or(Error::NotFound { resource: link })?;
        Ok(serde_json::from_value(document)?)
    }

    async fn replace_item<T: Serialize + DeserializeOwned>(
        &self,
        partition_key: PartitionKey,
        item_id: &str,
        item: &T,
    ) -> azure_data_cosmos_quickstart::Result<T> {
        let (id, document) = Self::to_document(item, &partition_key)?;
        let link = self.item_link(item_id);
        if id != item_id {
            return Err(bad_request("the document id doesn't match the request"));
        }
        let mut state = self.account.state.borrow_mut();
        state.call("replace_item", &link)?;
        let container = state.container(&self.database_id, &self.id)?;
        let key = (partition_key.value().to_string(), id);
        match container.items.get_mut(&key) {
            Some(stored) => *stored = document.clone(),
            None => return Err(Error::NotFound { resource: link }),
        }
        Ok(serde_json::from_value(document)?)
    }

    async fn upsert_item<T: Serialize + DeserializeOwned>(
        &self,
        partition_key: PartitionKey,
        item: &T,
    ) -> azure_data_cosmos_quickstart::Result<T> {
        let (id, document) = Self::to_document(item, &partition_key)?;
        let link = self.item_link(&id);
        let mut state = self.account.state.borrow_mut();
        state.call("upsert_item", &link)?;
        let container = state.container(&self.database_id, &self.id)?;
        container
            .items
            .insert((partition_key.value().to_string(), id), document.clone());
        Ok(serde_json::from_value(document)?)
    }

    async fn delete_item(
        &self,
        partition_key: PartitionKey,
        item_id: &str,
    ) -> azure_data_cosmos_quickstart::Result<()> {
        let link = self.item_link(item_id);
        let mut state = self.account.state.borrow_mut();
        state.call("delete_item", &link)?;
        let container = state.container(&self.database_id, &self.id)?;
        let key = (partition_key.value().to_string(), item_id.to_string());
        match container.items.remove(&key) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound { resource: link }),
        }
    }

    fn query_items<T: DeserializeOwned + 'static>(
        &self,
        query: Query,
        options: Option<QueryOptions>,
    ) -> FeedPager<T> {
        let container = self.clone();
        let page_size = options
            .and_then(|o| o.max_item_count)
            .map_or(DEFAULT_PAGE_SIZE, |n| n as usize);

        FeedPager::from_callback(move |continuation: Option<String>| {
            futures::future::ready(container.query_page(&query, page_size, continuation))
        })
    }
}

impl MockContainer {
    fn query_page<T: DeserializeOwned>(
        &self,
        query: &Query,
        page_size: usize,
        continuation: Option<String>,
    ) -> azure_data_cosmos_quickstart::Result<FeedPage<T>> {
        let filters = parse_query(query)?;
        let mut state = self.account.state.borrow_mut();
        state.call("query_items", &self.id)?;
        let container = state.container(&self.database_id, &self.id)?;

        let matching: Vec<&Value> = container
            .items
            .values()
            .filter(|doc| {
                filters
                    .iter()
                    .all(|(field, value)| doc.get(field.as_str()) == Some(value))
            })
            .collect();

        let start = match continuation {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| bad_request(format!("invalid continuation '{token}'")))?,
            None => 0,
        };
        let end = (start + page_size.max(1)).min(matching.len());
        let items = matching
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|doc| serde_json::from_value((*doc).clone()))
            .collect::<Result<Vec<T>, _>>()?;
        let next = (end < matching.len()).then(|| end.to_string());
        Ok(FeedPage::new(items, next))
    }
}

/// Parses `SELECT * FROM x [WHERE x.f = @p [AND x.g = @q ...]]` into `(field, value)` equality filters.
fn parse_query(query: &Query) -> azure_data_cosmos_quickstart::Result<Vec<(String, Value)>> {
    let unsupported = || bad_request(format!("unsupported query '{}'", query.text()));

    let text = query.text().trim();
    let rest = text.strip_prefix("SELECT * FROM ").ok_or_else(unsupported)?;
    let (alias, predicate) = match rest.split_once(" WHERE ") {
        Some((alias, predicate)) => (alias.trim(), Some(predicate)),
        None => (rest.trim(), None),
    };
    if alias.is_empty() || alias.contains(' ') {
        return Err(unsupported());
    }

    let Some(predicate) = predicate else {
        return Ok(Vec::new());
    };
    predicate
        .split(" AND ")
        .map(|condition| {
            let (left, right) = condition.split_once('=').ok_or_else(unsupported)?;
            let field = left
                .trim()
                .strip_prefix(alias)
                .and_then(|f| f.strip_prefix('.'))
                .ok_or_else(unsupported)?;
            let value = query
                .parameter(right.trim())
                .cloned()
                .ok_or_else(|| bad_request(format!("parameter '{}' is not bound", right.trim())))?;
            Ok((field.to_string(), value))
        })
        .collect()
}
