//! Transient success banner and the order-detail cache shared by dashboards.

use pasapas_commerce::checkout::Order;
use pasapas_commerce::ids::OrderId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a success message stays up.
pub const BANNER_TTL: Duration = Duration::from_secs(4);

/// A message shown for [`BANNER_TTL`] after a successful mutation.
#[derive(Debug, Clone, Default)]
pub struct SuccessBanner {
    current: Option<(String, Instant)>,
}

impl SuccessBanner {
    pub fn show(&mut self, message: impl Into<String>) {
        self.show_at(message, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some((message.into(), now));
    }

    /// The message, if it is still within its TTL at `now`.
    pub fn message_at(&self, now: Instant) -> Option<&str> {
        match &self.current {
            Some((message, shown)) if now.saturating_duration_since(*shown) < BANNER_TTL => {
                Some(message)
            }
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message_at(Instant::now())
    }
}

/// Order details fetched this session, by id.
#[derive(Debug, Clone, Default)]
pub struct OrderDetails {
    by_id: HashMap<OrderId, Order>,
}

impl OrderDetails {
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.by_id.get(id)
    }

    pub fn get_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        self.by_id.get_mut(id)
    }

    pub fn insert(&mut self, order: Order) -> &Order {
        let id = order.id.clone();
        self.by_id.insert(id.clone(), order);
        &self.by_id[&id]
    }

    pub fn remove(&mut self, id: &OrderId) -> Option<Order> {
        self.by_id.remove(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_expires() {
        let start = Instant::now();
        let mut banner = SuccessBanner::default();
        assert_eq!(banner.message_at(start), None);

        banner.show_at("Profile updated", start);
        assert_eq!(banner.message_at(start + Duration::from_secs(3)), Some("Profile updated"));
        assert_eq!(banner.message_at(start + BANNER_TTL), None);
    }

    #[test]
    fn test_details_cache() {
        let mut details = OrderDetails::default();
        details.insert(Order::new("7"));
        assert!(details.get(&OrderId::new("7")).is_some());
        assert!(details.remove(&OrderId::new("7")).is_some());
        assert!(details.is_empty());
    }
}
