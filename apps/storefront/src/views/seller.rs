//! Seller dashboard: own listings (editable) plus a read-only sales list.

use tracing::{debug, warn};

use bookmart_client::MarketApi;
use bookmart_core::{ListKind, Mutation, Order, UserId};

use super::books::BookManager;

pub struct SellerDashboard {
    seller: UserId,
    manager: BookManager,
    sales: Vec<Order>,
}

impl SellerDashboard {
    pub fn new(seller: UserId) -> Self {
        SellerDashboard {
            seller,
            manager: BookManager::for_seller(seller),
            sales: Vec::new(),
        }
    }

    pub fn manager(&self) -> &BookManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut BookManager {
        &mut self.manager
    }

    pub fn sales(&self) -> &[Order] {
        &self.sales
    }

    pub async fn load(&mut self, api: &dyn MarketApi) {
        self.manager.load(api).await;
        self.load_sales(api).await;
    }

    pub async fn load_sales(&mut self, api: &dyn MarketApi) {
        match api.seller_orders(self.seller).await {
            Ok(sales) => {
                debug!(count = sales.len(), "Seller orders loaded");
                self.sales = sales;
            }
            Err(e) => warn!("Error fetching sales: {}", e),
        }
    }

    pub async fn refresh_after(&mut self, api: &dyn MarketApi, mutation: Mutation) {
        self.manager.refresh_after(api, mutation).await;
        if !mutation.stale_among(&[ListKind::SellerOrders]).is_empty() {
            self.load_sales(api).await;
        }
    }
}
