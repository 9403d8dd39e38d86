//! Order query endpoints.

mod types;

pub use types::*;

use futures_util::stream::{self, Stream, TryStreamExt};

use crate::error::SellerError;
use crate::rest::SellerClient;
use crate::rest::client::required;
use crate::rest::endpoints::marketplace;
use crate::types::pagination::page_summary;
use crate::types::validation::Validate;

impl SellerClient {
    /// List one page of recent orders.
    pub async fn list_orders(&self, request: &OrderListRequest) -> Result<OrderPage, SellerError> {
        request.validate()?;
        let result: OrderListResult = required(
            self.marketplace_post(marketplace::RECENT_ORDER_LIST, request)
                .await?,
        )?;

        Ok(OrderPage {
            summary: page_summary(request.page_number, request.page_size, result.total_item_num),
            items: result.page_items,
        })
    }

    /// Stream every order, fetching pages lazily from `request`'s page onward.
    ///
    /// Stops after the last page or the first empty one. The first error ends
    /// the stream.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use futures_util::TryStreamExt;
    /// use std::sync::Arc;
    /// use temu_seller_client::auth::EnvAntiContent;
    /// use temu_seller_client::rest::SellerClient;
    /// use temu_seller_client::rest::orders::OrderListRequest;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = SellerClient::builder()
    ///         .anti_content(Arc::new(EnvAntiContent::from_env()))
    ///         .build()?;
    ///
    ///     let orders: Vec<_> = client
    ///         .orders_stream(OrderListRequest::new(50))
    ///         .try_collect()
    ///         .await?;
    ///     println!("{} orders", orders.len());
    ///     Ok(())
    /// }
    /// ```
    pub fn orders_stream(
        &self,
        request: OrderListRequest,
    ) -> impl Stream<Item = Result<Order, SellerError>> + Send + '_ {
        stream::try_unfold(Some(request), move |next| async move {
            let Some(request) = next else {
                return Ok::<_, SellerError>(None);
            };

            let page = self.list_orders(&request).await?;
            let next = if page.summary.is_last_page || page.items.is_empty() {
                None
            } else {
                Some(request.next_page())
            };

            let items = stream::iter(page.items.into_iter().map(Ok::<_, SellerError>));
            Ok(Some((items, next)))
        })
        .try_flatten()
    }
}
