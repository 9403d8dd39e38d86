//! Example: Walking every recent order with the paging stream.
//!
//! Requires an authenticated session and `TEMU_ANTI_CONTENT`.
//!
//! Run with: cargo run --example recent_orders

use std::sync::Arc;

use futures_util::TryStreamExt;
use temu_seller_client::auth::EnvAntiContent;
use temu_seller_client::rest::SellerClient;
use temu_seller_client::rest::orders::OrderListRequest;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt::init();

    let client = SellerClient::builder()
        .anti_content(Arc::new(EnvAntiContent::from_env()))
        .max_retries(5)
        .build()?;

    let first = client.list_orders(&OrderListRequest::new(50)).await?;
    println!(
        "{} orders over {} pages",
        first.summary.total, first.summary.total_pages
    );

    let mut orders = std::pin::pin!(client.orders_stream(OrderListRequest::new(50)));
    while let Some(order) = orders.try_next().await? {
        let quantity: i64 = order.order_list.iter().map(|line| line.quantity).sum();
        println!(
            "{}  status={}  items={}",
            order.parent.parent_order_sn, order.parent.parent_order_status, quantity
        );
    }

    Ok(())
}
