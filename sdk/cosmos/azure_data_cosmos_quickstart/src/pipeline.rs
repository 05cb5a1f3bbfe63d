// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use std::sync::Arc;

use reqwest::{header, Method};
use serde::{de::DeserializeOwned, Serialize};
use time::{macros::format_description, OffsetDateTime};
use url::{ParseError, Url};

use crate::{
    authorization::AuthorizationToken, constants, resource_context::ResourceLink, Error, Query,
};

/// A request to a single Cosmos DB resource link.
#[derive(Debug)]
pub(crate) struct CosmosRequest {
    method: Method,
    link: ResourceLink,
    headers: Vec<(&'static str, String)>,
    body: Option<(&'static str, Vec<u8>)>,
}

impl CosmosRequest {
    pub fn new(method: Method, link: ResourceLink) -> Self {
        Self {
            method,
            link,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn json(mut self, body: &impl Serialize) -> crate::Result<Self> {
        self.body = Some((constants::CONTENT_TYPE_JSON, serde_json::to_vec(body)?));
        Ok(self)
    }

    /// Sets the body to `query` and marks the request as a query.
    pub fn query(mut self, query: &Query) -> crate::Result<Self> {
        self.body = Some((constants::CONTENT_TYPE_QUERY_JSON, serde_json::to_vec(query)?));
        Ok(self.header(constants::QUERY, "True"))
    }

    #[cfg(test)]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[cfg(test)]
    pub fn link(&self) -> &ResourceLink {
        &self.link
    }

    /// The last value set for `name`, if any.
    #[cfg(test)]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    pub fn body(&self) -> Option<(&str, &[u8])> {
        self.body.as_ref().map(|(ct, b)| (*ct, b.as_slice()))
    }
}

/// A successful response, with its body already read.
pub(crate) struct CosmosResponse {
    headers: header::HeaderMap,
    body: Vec<u8>,
}

impl CosmosResponse {
    pub fn new(headers: header::HeaderMap, body: Vec<u8>) -> Self {
        Self { headers, body }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn continuation(&self) -> Option<String> {
        self.header(constants::CONTINUATION).map(str::to_string)
    }

    pub fn json<T: DeserializeOwned>(&self) -> crate::Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Sends signed requests to one Cosmos DB account.
///
/// Cloning is cheap; clones share the HTTP connection pool.
#[derive(Clone, Debug)]
pub(crate) struct CosmosPipeline {
    inner: Arc<PipelineInner>,
}

#[derive(Debug)]
struct PipelineInner {
    endpoint: Url,
    auth: AuthorizationToken,
    http: reqwest::Client,
}

impl CosmosPipeline {
    pub fn new(endpoint: Url, auth: AuthorizationToken) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(constants::USER_AGENT)
            .build()?;
        Ok(Self {
            inner: Arc::new(PipelineInner {
                endpoint,
                auth,
                http,
            }),
        })
    }

    pub fn url(&self, link: &ResourceLink) -> crate::Result<Url> {
        let mut url = self.inner.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Endpoint(ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(link.segments());
        Ok(url)
    }

    /// Signs and sends `request`.
    ///
    /// Non-success statuses are turned into errors with [`Error::from_response`].
    pub async fn send(&self, request: CosmosRequest) -> crate::Result<CosmosResponse> {
        let CosmosRequest {
            method,
            link,
            headers,
            body,
        } = request;

        let url = self.url(&link)?;
        let date = http_date(OffsetDateTime::now_utc())?;
        let authorization = self.inner.auth.sign(&method, &link, &date)?;

        let mut builder = self
            .inner
            .http
            .request(method.clone(), url)
            .header(header::AUTHORIZATION, authorization)
            .header(constants::MS_DATE, date.as_str())
            .header(constants::VERSION, constants::API_VERSION);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if let Some((content_type, body)) = body {
            builder = builder.header(header::CONTENT_TYPE, content_type).body(body);
        }

        tracing::debug!(%method, path = %link.path(), "sending request");
        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(%method, path = %link.path(), %status, "received response");

        if !status.is_success() {
            return Err(Error::from_response(status, &body, link.path()));
        }
        Ok(CosmosResponse::new(headers, body))
    }
}

/// Formats `now` as an HTTP date, e.g. `Tue, 01 Nov 1994 08:12:31 GMT`.
fn http_date(now: OffsetDateTime) -> crate::Result<String> {
    let date = now.format(format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    ))?;
    Ok(date)
}
