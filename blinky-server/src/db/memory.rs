//! In-memory store for tests
//!
//! Writes are staged per unit of work and applied on commit. The daily
//! sequence counter behaves like the PostgreSQL upsert: a unit of work holds
//! the (site, date) counter lock from its first increment until it ends,
//! and a rollback restores the previous value.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{
    Customer, ModifierOption, Order, OrderDetail, OrderItem, OrderItemDetail, OrderItemOption,
    Product, StoreSite,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

use super::{BoxError, Catalog, OrderStore, OrderTx};

type SequenceKey = (Uuid, NaiveDate);

#[derive(Clone, Default)]
struct Tables {
    customers: HashMap<Uuid, Customer>,
    store_sites: HashMap<Uuid, StoreSite>,
    products: HashMap<Uuid, Product>,
    modifier_options: HashMap<Uuid, ModifierOption>,
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    item_options: Vec<OrderItemOption>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    sequences: Arc<Mutex<HashMap<SequenceKey, Arc<tokio::sync::Mutex<i32>>>>>,
    pending_deletes: Arc<Mutex<HashMap<Uuid, usize>>>,
    fail_option_inserts: Arc<AtomicBool>,
    fail_order_detail: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    fn counter(&self, key: SequenceKey) -> Arc<tokio::sync::Mutex<i32>> {
        self.sequences
            .lock()
            .unwrap()
            .entry(key)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(0)))
            .clone()
    }

    // ── Seeding ──

    pub fn seed_customer(&self, name: &str) -> Customer {
        let customer = Customer {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", name.to_lowercase()),
            name: name.to_string(),
            phone_number: None,
        };
        self.tables()
            .customers
            .insert(customer.id, customer.clone());
        customer
    }

    pub fn seed_store_site(&self, latitude: Option<f64>, longitude: Option<f64>) -> StoreSite {
        let site = StoreSite {
            id: Uuid::new_v4(),
            store_id: Uuid::new_v4(),
            name: Some("Casablanca Maarif".to_string()),
            address: Some("Bd Zerktouni".to_string()),
            phone: None,
            latitude,
            longitude,
        };
        self.tables().store_sites.insert(site.id, site.clone());
        site
    }

    pub fn seed_product(&self, store_id: Uuid, name: &str, price: f64) -> Product {
        let product = Product {
            id: Uuid::new_v4(),
            store_id,
            name: name.to_string(),
            description: None,
            price,
            enabled: true,
        };
        self.tables().products.insert(product.id, product.clone());
        product
    }

    pub fn seed_modifier_option(&self, product_id: Uuid, name: &str, price: f64) -> ModifierOption {
        let option = ModifierOption {
            id: Uuid::new_v4(),
            product_id: Some(product_id),
            name: name.to_string(),
            price,
        };
        self.tables()
            .modifier_options
            .insert(option.id, option.clone());
        option
    }

    /// Let `reads` more reads see product `id`, then delete it before the
    /// next one, as a concurrent writer would
    pub fn delete_product_after_reads(&self, id: Uuid, reads: usize) {
        self.pending_deletes.lock().unwrap().insert(id, reads);
    }

    pub async fn set_sequence(&self, store_site_id: Uuid, date: NaiveDate, value: i32) {
        *self.counter((store_site_id, date)).lock().await = value;
    }

    pub async fn sequence(&self, store_site_id: Uuid, date: NaiveDate) -> i32 {
        *self.counter((store_site_id, date)).lock().await
    }

    /// Make every subsequent option insert fail
    pub fn fail_option_inserts(&self) {
        self.fail_option_inserts.store(true, Ordering::SeqCst);
    }

    /// Make every subsequent order read-back fail
    pub fn fail_order_detail(&self) {
        self.fail_order_detail.store(true, Ordering::SeqCst);
    }

    fn count_down_delete(&self, id: Uuid) {
        let mut pending = self.pending_deletes.lock().unwrap();
        match pending.get_mut(&id) {
            Some(0) => {
                pending.remove(&id);
                self.tables().products.remove(&id);
            }
            Some(left) => *left -= 1,
            None => {}
        }
    }

    // ── Inspection ──

    pub fn orders(&self) -> Vec<Order> {
        self.tables().orders.clone()
    }

    pub fn items(&self) -> Vec<OrderItem> {
        self.tables().items.clone()
    }

    pub fn item_options(&self) -> Vec<OrderItemOption> {
        self.tables().item_options.clone()
    }
}

#[async_trait]
impl Catalog for MemoryStore {
    async fn customer(&self, id: Uuid) -> Result<Option<Customer>, BoxError> {
        Ok(self.tables().customers.get(&id).cloned())
    }

    async fn store_site(&self, id: Uuid) -> Result<Option<StoreSite>, BoxError> {
        Ok(self.tables().store_sites.get(&id).cloned())
    }

    async fn product(&self, id: Uuid) -> Result<Option<Product>, BoxError> {
        self.count_down_delete(id);
        Ok(self.tables().products.get(&id).cloned())
    }

    async fn modifier_option(&self, id: Uuid) -> Result<Option<ModifierOption>, BoxError> {
        Ok(self.tables().modifier_options.get(&id).cloned())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn OrderTx>, BoxError> {
        Ok(Box::new(MemoryTx {
            store: self.clone(),
            orders: Vec::new(),
            items: Vec::new(),
            item_options: Vec::new(),
            held: Vec::new(),
            finished: false,
        }))
    }

    async fn order_detail(&self, id: Uuid) -> Result<Option<OrderDetail>, BoxError> {
        if self.fail_order_detail.load(Ordering::SeqCst) {
            return Err("simulated order read failure".into());
        }
        let tables = self.tables();
        let Some(order) = tables.orders.iter().find(|o| o.id == id).cloned() else {
            return Ok(None);
        };
        let items = tables
            .items
            .iter()
            .filter(|i| i.order_id == id)
            .map(|item| OrderItemDetail {
                options: tables
                    .item_options
                    .iter()
                    .filter(|o| o.order_item_id == item.id)
                    .cloned()
                    .collect(),
                item: item.clone(),
            })
            .collect();
        let customer = tables
            .customers
            .get(&order.customer_id)
            .cloned()
            .ok_or("customer missing")?;
        let store_site = tables
            .store_sites
            .get(&order.store_site_id)
            .cloned()
            .ok_or("store site missing")?;

        Ok(Some(OrderDetail {
            order,
            items,
            customer,
            store_site,
        }))
    }
}

struct HeldCounter {
    key: SequenceKey,
    guard: OwnedMutexGuard<i32>,
    before: i32,
}

pub struct MemoryTx {
    store: MemoryStore,
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    item_options: Vec<OrderItemOption>,
    held: Vec<HeldCounter>,
    finished: bool,
}

impl MemoryTx {
    fn restore_counters(&mut self) {
        for mut counter in self.held.drain(..) {
            *counter.guard = counter.before;
        }
    }
}

impl Drop for MemoryTx {
    fn drop(&mut self) {
        if !self.finished {
            self.restore_counters();
        }
    }
}

#[async_trait]
impl OrderTx for MemoryTx {
    async fn customer(&mut self, id: Uuid) -> Result<Option<Customer>, BoxError> {
        self.store.customer(id).await
    }

    async fn store_site(&mut self, id: Uuid) -> Result<Option<StoreSite>, BoxError> {
        self.store.store_site(id).await
    }

    async fn product(&mut self, id: Uuid) -> Result<Option<Product>, BoxError> {
        self.store.product(id).await
    }

    async fn modifier_option(&mut self, id: Uuid) -> Result<Option<ModifierOption>, BoxError> {
        self.store.modifier_option(id).await
    }

    async fn next_daily_sequence(
        &mut self,
        store_site_id: Uuid,
        date: NaiveDate,
    ) -> Result<i32, BoxError> {
        let key = (store_site_id, date);
        if let Some(counter) = self.held.iter_mut().find(|c| c.key == key) {
            *counter.guard += 1;
            return Ok(*counter.guard);
        }

        let mut guard = self.store.counter(key).lock_owned().await;
        let before = *guard;
        *guard += 1;
        let value = *guard;
        self.held.push(HeldCounter { key, guard, before });
        Ok(value)
    }

    async fn insert_order(&mut self, order: &Order) -> Result<(), BoxError> {
        self.orders.push(order.clone());
        Ok(())
    }

    async fn insert_item(&mut self, item: &OrderItem) -> Result<(), BoxError> {
        self.items.push(item.clone());
        Ok(())
    }

    async fn insert_item_option(&mut self, option: &OrderItemOption) -> Result<(), BoxError> {
        if self.store.fail_option_inserts.load(Ordering::SeqCst) {
            return Err("simulated option insert failure".into());
        }
        self.item_options.push(option.clone());
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<(), BoxError> {
        {
            let mut tables = self.store.tables();
            tables.orders.append(&mut self.orders);
            tables.items.append(&mut self.items);
            tables.item_options.append(&mut self.item_options);
        }
        self.finished = true;
        self.held.clear();
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<(), BoxError> {
        self.restore_counters();
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 17).unwrap()
    }

    #[tokio::test]
    async fn test_sequence_starts_at_one_and_survives_commit() {
        let store = MemoryStore::new();
        let site = Uuid::new_v4();

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.next_daily_sequence(site, today()).await.unwrap(), 1);
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.next_daily_sequence(site, today()).await.unwrap(), 2);
        tx.commit().await.unwrap();

        assert_eq!(store.sequence(site, today()).await, 2);
    }

    #[tokio::test]
    async fn test_rollback_and_drop_restore_sequence() {
        let store = MemoryStore::new();
        let site = Uuid::new_v4();

        let mut tx = store.begin().await.unwrap();
        tx.next_daily_sequence(site, today()).await.unwrap();
        tx.rollback().await.unwrap();
        assert_eq!(store.sequence(site, today()).await, 0);

        let mut tx = store.begin().await.unwrap();
        tx.next_daily_sequence(site, today()).await.unwrap();
        drop(tx);
        assert_eq!(store.sequence(site, today()).await, 0);
    }

    #[tokio::test]
    async fn test_writes_invisible_until_commit() {
        let store = MemoryStore::new();
        let site = store.seed_store_site(Some(1.0), Some(2.0));
        let customer = store.seed_customer("Amina");
        let order = Order {
            id: Uuid::new_v4(),
            customer_id: customer.id,
            store_site_id: site.id,
            order_code: "2410170001".to_string(),
            delivery_address: "Rue 1".to_string(),
            delivery_latitude: 1.0,
            delivery_longitude: 2.0,
            special_instructions: None,
            total_amount: Default::default(),
            items_amount: Default::default(),
            tax_amount: Default::default(),
            service_fee: Default::default(),
            delivery_price: Default::default(),
            approximated_distance: 0.0,
            status: "pending".to_string(),
            created_at: 0,
        };

        let mut tx = store.begin().await.unwrap();
        tx.insert_order(&order).await.unwrap();
        assert!(store.orders().is_empty());
        tx.commit().await.unwrap();

        let detail = store.order_detail(order.id).await.unwrap().unwrap();
        assert_eq!(detail.order.order_code, "2410170001");
        assert_eq!(detail.customer.name, "Amina");
        assert!(detail.items.is_empty());
    }
}
