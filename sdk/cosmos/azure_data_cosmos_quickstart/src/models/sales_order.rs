// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};
use time::{macros::date, Date};

use crate::{items::CosmosItem, PartitionKey};

/// Seconds before the service expires a sample order.
pub const SALES_ORDER_TTL: u32 = 60 * 60 * 24 * 30;

/// A sales order, stored with the account number as its partition key.
///
/// The v1 orders reference products by id. Later versions denormalize the product details onto each line,
/// without any migration of the v1 documents already stored.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SalesOrder {
    pub id: String,
    #[serde(rename = "partitionKey")]
    pub partition_key: String,
    pub purchase_order_number: String,
    #[serde(with = "ctime")]
    pub order_date: Date,
    #[serde(default, with = "ctime::option", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
    #[serde(default, with = "ctime::option", skip_serializing_if = "Option::is_none")]
    pub shipped_date: Option<Date>,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub freight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amt: Option<f64>,
    pub total_due: f64,
    pub items: Vec<LineItem>,
    pub ttl: u32,
}

impl CosmosItem for SalesOrder {
    fn id(&self) -> &str {
        &self.id
    }

    fn partition_key(&self) -> PartitionKey {
        PartitionKey::from(self.partition_key.as_str())
    }
}

/// A line on a [`SalesOrder`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LineItem {
    /// A line that references the product by id.
    Product {
        order_qty: u32,
        product_id: u32,
        unit_price: f64,
        line_price: f64,
    },
    /// A line that carries the product details itself.
    Denormalized {
        order_qty: u32,
        product_code: String,
        product_name: String,
        currency_symbol: String,
        currency_code: String,
        unit_price: f64,
        line_price: f64,
    },
}

/// Builds the v1 sample order for account `Account1`.
pub fn sales_order(id: impl Into<String>) -> SalesOrder {
    SalesOrder {
        id: id.into(),
        partition_key: "Account1".to_string(),
        purchase_order_number: "PO18009186470".to_string(),
        order_date: date!(2005 - 01 - 10),
        due_date: None,
        shipped_date: None,
        subtotal: 419.4589,
        tax_amount: 12.5838,
        freight: 472.3108,
        discount_amt: None,
        total_due: 985.018,
        items: vec![LineItem::Product {
            order_qty: 1,
            product_id: 100,
            unit_price: 418.4589,
            line_price: 418.4589,
        }],
        ttl: SALES_ORDER_TTL,
    }
}

/// Builds the v2 sample order for account `Account2`, with denormalized lines.
pub fn sales_order_v2(id: impl Into<String>) -> SalesOrder {
    SalesOrder {
        id: id.into(),
        partition_key: "Account2".to_string(),
        purchase_order_number: "PO15428132599".to_string(),
        order_date: date!(2005 - 07 - 11),
        due_date: Some(date!(2005 - 07 - 21)),
        shipped_date: Some(date!(2005 - 07 - 15)),
        subtotal: 6107.0820,
        tax_amount: 586.1203,
        freight: 183.1626,
        discount_amt: Some(1982.872),
        total_due: 4893.3929,
        items: vec![LineItem::Denormalized {
            order_qty: 3,
            product_code: "A-123".to_string(),
            product_name: "Product 1".to_string(),
            currency_symbol: "$".to_string(),
            currency_code: "USD".to_string(),
            unit_price: 17.1,
            line_price: 5.7,
        }],
        ttl: SALES_ORDER_TTL,
    }
}

/// Builds the v3 sample order.
///
/// The v3 shape has not diverged from v2 yet, so this returns the v2 order.
pub fn sales_order_v3(id: impl Into<String>) -> SalesOrder {
    sales_order_v2(id)
}

/// Serializes dates the way C's `%c` does in the default locale, e.g. `Mon Jan 10 00:00:00 2005`.
mod ctime {
    use serde::{de, ser, Deserialize, Deserializer, Serializer};
    use time::{macros::format_description, Date, PrimitiveDateTime};

    pub(super) fn format(date: &Date) -> Result<String, time::error::Format> {
        date.midnight().format(format_description!(
            "[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second] [year]"
        ))
    }

    pub(super) fn parse(s: &str) -> Result<Date, time::error::Parse> {
        PrimitiveDateTime::parse(
            s,
            format_description!(
                "[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second] [year]"
            ),
        )
        .map(|dt| dt.date())
    }

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = format(date).map_err(<S::Error as ser::Error>::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(de::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| super::parse(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
