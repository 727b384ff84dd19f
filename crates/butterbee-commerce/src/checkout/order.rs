//! Order submission: the request, the placed order and the order book.

use async_trait::async_trait;
use butterbee_cache::{Cache, KvStore};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::OrderId;

/// Storage key prefix for placed orders.
pub const ORDER_KEY_PREFIX: &str = "butterbee.order";

/// Shortest summary the order book accepts.
pub const MIN_SUMMARY_LEN: usize = 5;

/// Attempts at allocating an unused public id before giving up.
pub const PUBLIC_ID_ATTEMPTS: u32 = 5;

/// Characters used in public ids. No 0/O or 1/I.
pub const PUBLIC_ID_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Received, not yet looked at.
    #[default]
    New,
    /// Confirmed with the customer.
    Confirmed,
    /// Handed over at the door.
    Delivered,
    /// Cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Payload handed to an [`OrderSubmitter`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRequest {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl OrderRequest {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            status: None,
        }
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.summary.chars().count() < MIN_SUMMARY_LEN {
            return Err(CommerceError::InvalidOrder(format!(
                "summary must be at least {} characters",
                MIN_SUMMARY_LEN
            )));
        }
        Ok(())
    }
}

/// An order accepted by the back office.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacedOrder {
    /// Opaque id shown to the customer (e.g., "BB-9X7Q-2DG-VH3").
    pub public_id: OrderId,
    pub status: OrderStatus,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Accepts finalized orders.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit(&self, request: OrderRequest) -> Result<PlacedOrder, CommerceError>;
}

/// Draw a public id such as `BB-9X7Q-2DG-VH3`.
pub fn make_public_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let chars: Vec<char> = (0..10)
        .map(|_| {
            let byte: u8 = rng.gen();
            PUBLIC_ID_ALPHABET[byte as usize % PUBLIC_ID_ALPHABET.len()] as char
        })
        .collect();
    let part = |range: std::ops::Range<usize>| chars[range].iter().collect::<String>();
    format!("BB-{}-{}-{}", part(0..4), part(4..7), part(7..10))
}

type IdSource = Box<dyn Fn() -> String + Send + Sync>;

/// Orders kept in a key-value store, one entry per public id.
pub struct OrderBook<S> {
    cache: Cache<S>,
    next_id: IdSource,
}

impl<S: KvStore> OrderBook<S> {
    pub fn new(store: S) -> Self {
        Self {
            cache: Cache::new(store),
            next_id: Box::new(|| make_public_id(&mut rand::thread_rng())),
        }
    }

    /// Use a custom public id generator.
    pub fn with_id_source(store: S, next_id: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self {
            cache: Cache::new(store),
            next_id: Box::new(next_id),
        }
    }

    /// Store a new order under a fresh public id.
    pub fn create(&self, request: OrderRequest) -> Result<PlacedOrder, CommerceError> {
        request.validate()?;
        for attempt in 1..=PUBLIC_ID_ATTEMPTS {
            let public_id = (self.next_id)();
            let key = order_key(&public_id);
            if self.cache.exists(&key)? {
                tracing::debug!(attempt, public_id = %public_id, "public id collision");
                continue;
            }
            let order = PlacedOrder {
                public_id: OrderId::new(public_id),
                status: request.status.unwrap_or_default(),
                summary: request.summary,
                created_at: Utc::now(),
            };
            self.cache.set(&key, &order)?;
            return Ok(order);
        }
        Err(CommerceError::OrderIdExhausted(PUBLIC_ID_ATTEMPTS))
    }

    pub fn get(&self, public_id: &OrderId) -> Result<Option<PlacedOrder>, CommerceError> {
        Ok(self.cache.get(&order_key(public_id.as_str()))?)
    }

    /// All orders, newest first.
    pub fn list(&self) -> Result<Vec<PlacedOrder>, CommerceError> {
        let prefix = format!("{}:", ORDER_KEY_PREFIX);
        let mut orders = Vec::new();
        for key in self.cache.keys()? {
            if !key.starts_with(&prefix) {
                continue;
            }
            if let Some(order) = self.cache.get::<PlacedOrder>(&key)? {
                orders.push(order);
            }
        }
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}

#[async_trait]
impl<S: KvStore> OrderSubmitter for OrderBook<S> {
    async fn submit(&self, request: OrderRequest) -> Result<PlacedOrder, CommerceError> {
        self.create(request)
    }
}

fn order_key(public_id: &str) -> String {
    format!("{}:{}", ORDER_KEY_PREFIX, public_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use butterbee_cache::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_public_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let id = make_public_id(&mut rng);
            assert_eq!(id.len(), 15);
            let parts: Vec<&str> = id.split('-').collect();
            assert_eq!(parts[0], "BB");
            assert_eq!(
                parts[1..].iter().map(|p| p.len()).collect::<Vec<_>>(),
                vec![4, 3, 3]
            );
            assert!(parts[1..]
                .iter()
                .flat_map(|p| p.bytes())
                .all(|b| PUBLIC_ID_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_create_defaults_to_new() {
        let book = OrderBook::new(MemoryStore::new());
        let order = book.create(OrderRequest::new("Order from ButterBee")).unwrap();
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(book.get(&order.public_id).unwrap(), Some(order));
    }

    #[test]
    fn test_short_summary_rejected() {
        let book = OrderBook::new(MemoryStore::new());
        assert!(matches!(
            book.create(OrderRequest::new("hi")),
            Err(CommerceError::InvalidOrder(_))
        ));
    }

    #[test]
    fn test_collision_retries_then_gives_up() {
        let book = OrderBook::with_id_source(MemoryStore::new(), || "BB-AAAA-AAA-AAA".to_string());
        assert!(book.create(OrderRequest::new("first order")).is_ok());
        let err = book.create(OrderRequest::new("second order")).unwrap_err();
        assert!(matches!(err, CommerceError::OrderIdExhausted(5)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_collision_then_fresh_id() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let calls = AtomicUsize::new(0);
        let book = OrderBook::with_id_source(MemoryStore::new(), move || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                "BB-AAAA-AAA-AAA".to_string()
            } else {
                format!("BB-BBBB-BBB-BB{}", n)
            }
        });
        book.create(OrderRequest::new("first order")).unwrap();
        let second = book.create(OrderRequest::new("second order")).unwrap();
        assert_eq!(second.public_id.as_str(), "BB-BBBB-BBB-BB2");
        assert_eq!(book.list().unwrap().len(), 2);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&OrderStatus::New).unwrap(), "\"NEW\"");
    }
}
