//! Types for the order query endpoints.

use serde::{Deserialize, Serialize};

use crate::types::pagination::PageSummary;
use crate::types::serde_helpers::null_as_default;
use crate::types::validation::{Checks, Validate, ValidationErrors};

/// Default page size for order listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Request for [`SellerClient::list_orders`](crate::rest::SellerClient::list_orders).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListRequest {
    /// 1-based page number.
    pub page_number: u32,
    /// Items per page, must be positive.
    pub page_size: u32,
    /// Platform order-state filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<i32>,
    /// Restrict to these parent order numbers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_order_sn_list: Option<Vec<String>>,
    /// Time zone the platform renders times in, e.g. `UTC+8`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl Default for OrderListRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            query_type: None,
            parent_order_sn_list: None,
            time_zone: None,
        }
    }
}

impl OrderListRequest {
    /// First page with the given page size.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Set the page number.
    pub fn page(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Set the order-state filter.
    pub fn query_type(mut self, query_type: i32) -> Self {
        self.query_type = Some(query_type);
        self
    }

    /// Restrict to specific parent orders.
    pub fn parent_orders<I, S>(mut self, order_sns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parent_order_sn_list = Some(order_sns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the time zone.
    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    /// The same query for the following page.
    pub(crate) fn next_page(&self) -> Self {
        Self {
            page_number: self.page_number.max(1) + 1,
            ..self.clone()
        }
    }
}

impl Validate for OrderListRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .ensure("pageSize", self.page_size > 0, "must be positive")
            .finish()
    }
}

/// One page of orders.
#[derive(Debug, Clone)]
pub struct OrderPage {
    /// Orders on this page.
    pub items: Vec<Order>,
    /// Totals for the whole listing.
    pub summary: PageSummary,
}

/// A parent order with its sub-orders.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    /// Parent order details.
    #[serde(rename = "parentOrderMap", deserialize_with = "null_as_default::deserialize")]
    pub parent: ParentOrder,
    /// Sub-orders, one per SKU.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub order_list: Vec<SubOrder>,
}

/// Parent order details.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentOrder {
    /// Parent order number.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub parent_order_sn: String,
    /// Order state code.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub parent_order_status: i32,
    /// Creation time, epoch seconds.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub parent_order_time: i64,
    /// Region the order ships to.
    pub region_name: Option<String>,
}

/// A single SKU line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubOrder {
    /// Sub-order number.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub order_sn: String,
    /// Product SKU identifier.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub product_sku_id: i64,
    /// Ordered quantity.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub quantity: i64,
    /// Sub-order state code.
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub order_status: i32,
    /// Product title.
    pub goods_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct OrderListResult {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub(crate) total_item_num: u64,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub(crate) page_items: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = OrderListRequest::new(50)
            .page(2)
            .query_type(2)
            .parent_orders(["PO-1", "PO-2"])
            .time_zone("UTC+8");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "pageNumber": 2,
                "pageSize": 50,
                "queryType": 2,
                "parentOrderSnList": ["PO-1", "PO-2"],
                "timeZone": "UTC+8"
            })
        );
    }

    #[test]
    fn test_next_page_keeps_filters() {
        let request = OrderListRequest::new(10).query_type(1).page(0);
        let next = request.next_page();
        assert_eq!(next.page_number, 2);
        assert_eq!(next.query_type, Some(1));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = OrderListRequest::new(0).validate().unwrap_err();
        assert!(err.has_field("pageSize"));
    }

    #[test]
    fn test_order_tolerates_missing_fields() {
        let result: OrderListResult = serde_json::from_str(
            r#"{"totalItemNum":1,"pageItems":[{"parentOrderMap":{"parentOrderSn":"PO-1"},"orderList":null}]}"#,
        )
        .unwrap();
        assert_eq!(result.total_item_num, 1);
        assert_eq!(result.page_items[0].parent.parent_order_sn, "PO-1");
        assert!(result.page_items[0].order_list.is_empty());
    }

    #[test]
    fn test_null_scalars_fall_back_to_defaults() {
        let result: OrderListResult = serde_json::from_str(
            r#"{
                "totalItemNum": null,
                "pageItems": [
                    {"parentOrderMap": null, "orderList": [{"orderSn": null, "quantity": null, "productSkuId": 7}]},
                    {"parentOrderMap": {"parentOrderSn": "PO-2", "parentOrderStatus": null, "parentOrderTime": null}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(result.total_item_num, 0);
        assert_eq!(result.page_items[0].parent.parent_order_sn, "");
        assert_eq!(result.page_items[0].order_list[0].quantity, 0);
        assert_eq!(result.page_items[0].order_list[0].product_sku_id, 7);
        assert_eq!(result.page_items[1].parent.parent_order_status, 0);
    }
}
