// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

/// The kinds of resource the quickstart addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ResourceType {
    Databases,
    Containers,
    Items,
    Offers,
}

impl ResourceType {
    /// The path segment for a feed of this resource type, which is also the type that gets signed.
    pub fn path_segment(self) -> &'static str {
        match self {
            ResourceType::Databases => "dbs",
            ResourceType::Containers => "colls",
            ResourceType::Items => "docs",
            ResourceType::Offers => "offers",
        }
    }
}

/// A link to a resource, or to a feed of resources, relative to the account endpoint.
///
/// A feed link such as `dbs/ToDoList/colls` is signed with the link of its parent (`dbs/ToDoList`).
/// An item link such as `dbs/ToDoList` is signed with itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ResourceLink {
    resource_type: ResourceType,
    segments: Vec<String>,
    is_feed: bool,
}

impl ResourceLink {
    /// A feed at the root of the account, e.g. `dbs` or `offers`.
    pub fn root(resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            segments: vec![resource_type.path_segment().to_string()],
            is_feed: true,
        }
    }

    /// The feed of `resource_type` resources under this item, e.g. `dbs/{db}` -> `dbs/{db}/colls`.
    pub fn feed(&self, resource_type: ResourceType) -> Self {
        let mut segments = self.segments.clone();
        segments.push(resource_type.path_segment().to_string());
        Self {
            resource_type,
            segments,
            is_feed: true,
        }
    }

    /// The item named `id` in this feed, e.g. `dbs` -> `dbs/{id}`.
    pub fn item(&self, id: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        Self {
            resource_type: self.resource_type,
            segments,
            is_feed: false,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// The resource link that goes into the authorization signature.
    pub fn link_for_signing(&self) -> String {
        if self.is_feed {
            return self.segments[..self.segments.len() - 1].join("/");
        }
        match self.resource_type {
            // Offers are addressed by resource id, which is signed lower-cased.
            ResourceType::Offers => self
                .segments
                .last()
                .map(|id| id.to_lowercase())
                .unwrap_or_default(),
            _ => self.path(),
        }
    }
}
