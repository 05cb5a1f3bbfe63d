// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Account and resource settings for the quickstart.

use azure_core::credentials::Secret;

pub const ACCOUNT_HOST_ENV: &str = "ACCOUNT_HOST";
pub const ACCOUNT_KEY_ENV: &str = "ACCOUNT_KEY";
pub const DATABASE_ENV: &str = "COSMOS_DATABASE";
pub const CONTAINER_ENV: &str = "COSMOS_CONTAINER";

pub const DEFAULT_ACCOUNT_HOST: &str = "https://260025lab6.documents.azure.com:443/";
pub const DEFAULT_ACCOUNT_KEY: &str = "secret:)";
pub const DEFAULT_DATABASE: &str = "ToDoList";
pub const DEFAULT_CONTAINER: &str = "Items";

/// Settings for a single quickstart run.
///
/// Built once at startup and handed to the workflow by reference.
#[derive(Clone, Debug)]
pub struct Settings {
    /// The account endpoint, e.g. `https://myaccount.documents.azure.com:443/`.
    pub host: String,
    /// The account's primary or secondary key.
    pub master_key: Secret,
    pub database_id: String,
    pub container_id: String,
}

impl Settings {
    /// Reads the settings from the process environment, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves the settings through `lookup`, falling back to the defaults for anything it doesn't return.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        Self {
            host: get(ACCOUNT_HOST_ENV, DEFAULT_ACCOUNT_HOST),
            master_key: Secret::new(get(ACCOUNT_KEY_ENV, DEFAULT_ACCOUNT_KEY)),
            database_id: get(DATABASE_ENV, DEFAULT_DATABASE),
            container_id: get(CONTAINER_ENV, DEFAULT_CONTAINER),
        }
    }
}
