// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::Serialize;

/// A Cosmos DB SQL query, with its parameters.
///
/// Most of the time you can pass a string wherever a [`Query`] is expected.
/// Bind values with [`Query::with_parameter`] instead of formatting them into the text:
///
/// ```rust
/// # use azure_data_cosmos_quickstart::Query;
/// let query = Query::from("SELECT * FROM r WHERE r.partitionKey = @account_number")
///     .with_parameter("@account_number", "Account1")
///     .unwrap();
/// assert_eq!(query.text(), "SELECT * FROM r WHERE r.partitionKey = @account_number");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Query {
    #[serde(rename = "query")]
    text: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    parameters: Vec<QueryParameter>,
}

/// A named value bound into a [`Query`].
#[derive(Clone, Debug, PartialEq, Serialize)]
struct QueryParameter {
    name: String,
    value: serde_json::Value,
}

impl Query {
    /// Binds `value` to the parameter `name`, which should include the leading `@`.
    ///
    /// Fails only if `value` cannot be serialized to JSON.
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Serialize,
    ) -> crate::Result<Self> {
        self.parameters.push(QueryParameter {
            name: name.into(),
            value: serde_json::to_value(value)?,
        });
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Looks up a bound parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&serde_json::Value> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            parameters: Vec::new(),
        }
    }
}

impl From<String> for Query {
    fn from(text: String) -> Self {
        Self {
            text,
            parameters: Vec::new(),
        }
    }
}

/// Options for query and read-feed operations.
#[derive(Clone, Debug, Default)]
pub struct QueryOptions {
    /// The most items the service should return in one page.
    pub max_item_count: Option<u32>,
}
