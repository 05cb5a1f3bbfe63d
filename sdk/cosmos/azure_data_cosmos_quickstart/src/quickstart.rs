// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! The quickstart workflow: provision, populate, verify, mutate and clean up.

use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::{
    clients::{CosmosClientMethods, DatabaseClientMethods},
    items,
    models::{sales_order, sales_order_v2, sales_order_v3, SalesOrder},
    provision::{ensure_container, ensure_database},
    throughput::{scale_up, ScaleOutcome, THROUGHPUT_INCREMENT},
    Error, Settings,
};

/// Page size used when scanning the container.
pub const SCAN_PAGE_SIZE: u32 = 10;

const ORDER_ID: &str = "SalesOrder1";
const ORDER_ACCOUNT: &str = "Account1";

/// The part of a listed document the workflow logs. The container may hold documents that aren't orders.
#[derive(Deserialize)]
struct ListedItem {
    id: String,
}

/// A point in the workflow. Each variant is reached once the step it names has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Init,
    DbReady,
    ContainerReady,
    Scaled,
    Populated,
    Verified,
    Mutated,
    Cleaned,
    Done,
    Failed,
}

/// What happened during a [`Quickstart::run`].
#[derive(Debug)]
pub struct RunReport {
    /// Every stage reached, in order, starting with [`Stage::Init`].
    pub stages: Vec<Stage>,
    /// The error that moved the run to [`Stage::Failed`].
    pub error: Option<Error>,
    /// An error raised while deleting the database, other than it being already gone.
    pub cleanup_error: Option<Error>,
    pub scale: Option<ScaleOutcome>,
}

impl RunReport {
    fn new() -> Self {
        Self {
            stages: vec![Stage::Init],
            error: None,
            cleanup_error: None,
            scale: None,
        }
    }

    fn reach(&mut self, stage: Stage) {
        debug!(?stage, "stage reached");
        self.stages.push(stage);
    }

    pub fn final_stage(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Init)
    }

    /// Whether the workflow reached [`Stage::Done`] without a recorded error.
    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.final_stage() == Stage::Done
    }
}

/// Runs the quickstart against one account.
pub struct Quickstart<'a, C> {
    client: &'a C,
    settings: &'a Settings,
}

impl<'a, C: CosmosClientMethods> Quickstart<'a, C> {
    pub fn new(client: &'a C, settings: &'a Settings) -> Self {
        Self { client, settings }
    }

    /// Runs every step in order, then deletes the database.
    ///
    /// Errors never escape: the first one stops the workflow and is kept in the report, and the database
    /// is deleted regardless.
    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::new();

        if let Err(e) = self.run_steps(&mut report).await {
            error!("quickstart has caught an error. {}", e);
            report.reach(Stage::Failed);
            report.error = Some(e);
            self.cleanup(&mut report).await;
        }

        info!("quickstart done");
        report
    }

    async fn run_steps(&self, report: &mut RunReport) -> crate::Result<()> {
        let database = ensure_database(self.client, &self.settings.database_id)
            .await?
            .into_inner();
        report.reach(Stage::DbReady);

        let container = ensure_container(&database, &self.settings.container_id)
            .await?
            .into_inner();
        report.reach(Stage::ContainerReady);

        report.scale = Some(scale_up(&container, THROUGHPUT_INCREMENT).await);
        report.reach(Stage::Scaled);

        info!("Creating Items");
        for order in [
            sales_order("SalesOrder1"),
            sales_order_v2("SalesOrder2"),
            sales_order_v3("SalesOrder3"),
        ] {
            items::insert(&container, &order).await?;
            info!("Created item '{}'", order.id);
        }
        report.reach(Stage::Populated);

        info!("Reading all items in a container");
        let all: Vec<ListedItem> = items::scan(&container, SCAN_PAGE_SIZE).into_items().await?;
        info!("Found {} items", all.len());
        for item in &all {
            info!("Item Id: {}", item.id);
        }

        info!("Reading Item by Id");
        let order: SalesOrder = items::point_read(&container, ORDER_ID, ORDER_ACCOUNT).await?;
        info!("Item read by Id {}", order.id);
        info!("Partition Key: {}", order.partition_key);
        info!("Subtotal: {}", order.subtotal);

        info!("Querying for an Item by Partition Key");
        let matches: Vec<ListedItem> = items::query_by_partition_key(&container, ORDER_ACCOUNT)?
            .into_items()
            .await?;
        match matches.first() {
            Some(first) => info!("Item queried by Partition Key {}", first.id),
            None => info!("No items found for Partition Key {}", ORDER_ACCOUNT),
        }
        report.reach(Stage::Verified);

        info!("Replace an Item");
        let replaced: SalesOrder =
            items::replace(&container, ORDER_ID, ORDER_ACCOUNT, add_to_subtotal).await?;
        info!(
            "Replaced Item's Id is {}, new subtotal={}",
            replaced.id, replaced.subtotal
        );

        info!("Upserting an item");
        let upserted: SalesOrder =
            items::upsert(&container, ORDER_ID, ORDER_ACCOUNT, add_to_subtotal).await?;
        info!(
            "Upserted Item's Id is {}, new subtotal={}",
            upserted.id, upserted.subtotal
        );

        info!("Deleting Item by Id");
        items::delete(&container, ORDER_ID, ORDER_ACCOUNT).await?;
        info!("Deleted item's Id is {}", ORDER_ID);
        report.reach(Stage::Mutated);

        self.cleanup(report).await;
        report.reach(Stage::Cleaned);
        report.reach(Stage::Done);
        Ok(())
    }

    /// Deletes the database. A database that is already gone is not an error.
    async fn cleanup(&self, report: &mut RunReport) {
        let database = self.client.database_client(&self.settings.database_id);
        match database.delete().await {
            Ok(()) => info!("DB deleted"),
            Err(e) if e.is_not_found() => {
                debug!("database '{}' was already gone", database.id())
            }
            Err(e) => {
                warn!("could not delete database '{}': {}", database.id(), e);
                report.cleanup_error = Some(e);
            }
        }
    }
}

fn add_to_subtotal(order: &mut SalesOrder) {
    order.subtotal += 1.0;
}
