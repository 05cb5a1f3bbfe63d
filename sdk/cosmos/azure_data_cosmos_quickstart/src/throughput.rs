// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Best-effort throughput scaling.

use reqwest::StatusCode;
use tracing::{info, warn};

use crate::{clients::ContainerClientMethods, Error};

/// RU/s added by [`scale_up`] in the quickstart.
pub const THROUGHPUT_INCREMENT: i32 = 100;

/// What [`scale_up`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScaleOutcome {
    Scaled { previous: i32, current: i32 },
    /// The account can't report or change this container's throughput.
    Unsupported { reason: String },
    /// Scaling failed for another reason and was skipped.
    Skipped { reason: String },
}

/// Reads the container's throughput and raises it by `increment`.
///
/// This never fails. [`Error::Unsupported`] and `400 Bad Request` mean the account can't scale the
/// container. Any other error, including other client errors, skips scaling with a warning.
pub async fn scale_up<C: ContainerClientMethods>(container: &C, increment: i32) -> ScaleOutcome {
    info!("Scaling Container");

    match try_scale_up(container, increment).await {
        Ok(outcome) => outcome,
        Err(Error::Unsupported { message }) => {
            info!("Cannot read container throughput.");
            info!("{}", message);
            ScaleOutcome::Unsupported { reason: message }
        }
        Err(e) if e.http_status() == Some(StatusCode::BAD_REQUEST) => {
            info!("Cannot read container throughput.");
            info!("{}", e);
            ScaleOutcome::Unsupported {
                reason: e.to_string(),
            }
        }
        Err(e) => {
            warn!("Skipping throughput scaling: {}", e);
            ScaleOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    }
}

async fn try_scale_up<C: ContainerClientMethods>(
    container: &C,
    increment: i32,
) -> crate::Result<ScaleOutcome> {
    let mut offer = container.read_throughput().await?;
    let previous = offer.throughput();
    info!("Found Offer and its throughput is '{}'", previous);

    offer.set_throughput(previous + increment);
    let current = container.replace_throughput(offer).await?.throughput();
    info!("Replaced Offer. Offer Throughput is now '{}'", current);

    Ok(ScaleOutcome::Scaled { previous, current })
}
