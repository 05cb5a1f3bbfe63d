// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use std::process::ExitCode;

use azure_data_cosmos_quickstart::{clients::CosmosClient, quickstart::Quickstart, Settings};
use tracing::{error, info, instrument::WithSubscriber};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();

    let settings = Settings::from_env();
    run(&settings).with_subscriber(subscriber).await
}

async fn run(settings: &Settings) -> ExitCode {
    info!("Running demo app");

    let client = match CosmosClient::with_key(&settings.host, &settings.master_key) {
        Ok(client) => client,
        Err(e) => {
            error!("could not create the Cosmos client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = Quickstart::new(&client, settings).run().await;
    if report.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
