//! The cart state manager.

use std::sync::Arc;

use aictronics_core::Price;
use tracing::{debug, info, warn};

use super::{CartLine, CartSnapshot, persisted};
use crate::catalog::Catalog;
use crate::store::CartStore;

type Listener = Box<dyn Fn(&CartSnapshot)>;

/// Handle returned by [`CartManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the session's cart.
///
/// All operations run to completion on the caller's thread. Every accepted
/// mutation persists the full snapshot, even when the cart ends up unchanged,
/// so a save that failed earlier is retried. Subscribers are notified in
/// registration order only when the cart actually changed, and the return
/// value reports the same. Adds for unknown products or with a non-positive
/// quantity are rejected before anything is saved.
///
/// No operation fails: a store that cannot be written is logged and the
/// in-memory cart stays authoritative.
pub struct CartManager {
    catalog: Arc<Catalog>,
    store: Box<dyn CartStore>,
    lines: Vec<CartLine>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    last_persist_error: Option<String>,
}

impl std::fmt::Debug for CartManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("lines", &self.lines)
            .field("listeners", &self.listeners.len())
            .field("last_persist_error", &self.last_persist_error)
            .finish_non_exhaustive()
    }
}

impl CartManager {
    /// Restore the cart from `store`, falling back to an empty cart when the
    /// store is empty, unreadable, or holds a corrupt blob.
    pub fn open(catalog: Arc<Catalog>, store: Box<dyn CartStore>) -> Self {
        let lines = match store.load() {
            Ok(Some(blob)) => match persisted::decode(&blob) {
                Ok(lines) => {
                    info!(lines = lines.len(), "Restored cart from store");
                    lines
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable cart snapshot");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No stored cart, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load cart, starting empty");
                Vec::new()
            }
        };

        Self {
            catalog,
            store,
            lines,
            listeners: Vec::new(),
            next_subscription: 0,
            last_persist_error: None,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` of a catalog product.
    ///
    /// An existing line keeps its name, price, and position and has its
    /// quantity increased. Otherwise a new line is appended with the
    /// product's current name and price. Unknown products and non-positive
    /// quantities are ignored.
    pub fn add_item(&mut self, product_id: &str, quantity: i64) -> bool {
        let Some(quantity) = positive_quantity(quantity) else {
            debug!(product_id, quantity, "Ignoring add with non-positive quantity");
            return false;
        };
        let Some(product) = self.catalog.find_by_id(product_id) else {
            debug!(product_id, "Ignoring add for unknown product");
            return false;
        };

        match self
            .lines
            .iter_mut()
            .find(|line| line.product_id.as_str() == product_id)
        {
            Some(line) => {
                let updated = line.quantity.saturating_add(quantity);
                if updated == line.quantity {
                    return self.commit("add_item", false);
                }
                line.quantity = updated;
            }
            None => self.lines.push(CartLine::from_product(product, quantity)),
        }

        self.commit("add_item", true)
    }

    /// Add a single unit of a catalog product.
    pub fn add_one(&mut self, product_id: &str) -> bool {
        self.add_item(product_id, 1)
    }

    /// Set a line's quantity, clamped to at least 1.
    ///
    /// This never deletes a line; use [`Self::remove_from_cart`] for that.
    /// A product not in the cart leaves the lines as they are.
    pub fn update_quantity(&mut self, product_id: &str, new_quantity: i64) -> bool {
        let quantity = u32::try_from(new_quantity.max(1)).unwrap_or(u32::MAX);

        let changed = match self
            .lines
            .iter_mut()
            .find(|line| line.product_id.as_str() == product_id)
        {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            Some(_) => false,
            None => {
                debug!(product_id, "Quantity update for product not in cart");
                false
            }
        };

        self.lines.retain(|line| line.quantity > 0);
        self.commit("update_quantity", changed)
    }

    /// Remove a product's line.
    pub fn remove_from_cart(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id.as_str() != product_id);
        let changed = self.lines.len() != before;

        self.commit("remove_from_cart", changed)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) -> bool {
        let changed = !self.lines.is_empty();
        self.lines.clear();

        self.commit("clear_cart", changed)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Owned copy of the lines in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    /// Read-only view of the lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.product_id.as_str() == product_id)
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        super::total_items(&self.lines)
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        super::subtotal(&self.lines)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Owned projection of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from_lines(&self.lines)
    }

    /// The catalog products are resolved against.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Error from the most recent save, cleared by the next successful one.
    #[must_use]
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a listener called with a fresh snapshot after every change.
    pub fn subscribe(&mut self, listener: impl Fn(&CartSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Persist the current lines, then notify subscribers if `changed`.
    /// Returns `changed`.
    fn commit(&mut self, operation: &'static str, changed: bool) -> bool {
        self.persist();
        if !changed {
            debug!(operation, "Cart unchanged, snapshot saved again");
            return false;
        }

        let snapshot = self.snapshot();
        debug!(
            operation,
            lines = snapshot.lines.len(),
            total_items = snapshot.total_items,
            subtotal = %snapshot.subtotal,
            "Cart updated"
        );

        for (_, listener) in &self.listeners {
            listener(&snapshot);
        }
        true
    }

    fn persist(&mut self) {
        let result = persisted::encode(&self.lines)
            .map_err(|e| e.to_string())
            .and_then(|blob| self.store.save(&blob).map_err(|e| e.to_string()));

        match result {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!(error = %e, "Failed to persist cart, keeping in-memory state");
                self.last_persist_error = Some(e);
            }
        }
    }
}

/// Convert a caller-supplied quantity to a line quantity, rejecting zero and
/// negatives.
fn positive_quantity(quantity: i64) -> Option<u32> {
    (quantity > 0).then(|| u32::try_from(quantity).unwrap_or(u32::MAX))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use aictronics_core::{ProductId, Theme};

    use super::*;
    use crate::catalog::Product;
    use crate::store::MemoryStore;

    fn manager_with(store: &MemoryStore) -> CartManager {
        CartManager::open(Arc::new(Catalog::builtin()), Box::new(store.clone()))
    }

    fn manager() -> (CartManager, MemoryStore) {
        let store = MemoryStore::new();
        (manager_with(&store), store)
    }

    #[test]
    fn test_add_item_appends_snapshot_of_product() {
        let (mut cart, _) = manager();

        assert!(cart.add_item("iphone-air", 2));

        let line = cart.line("iphone-air").unwrap();
        assert_eq!(line.name, "Aictronics Phone Air");
        assert_eq!(line.price, Price::from_whole(999));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_add_item_accumulates_in_place() {
        let (mut cart, _) = manager();
        cart.add_one("iphone-17-pro");
        cart.add_one("airpods-pro-3");
        cart.add_item("iphone-17-pro", 4);

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["iphone-17-pro", "airpods-pro-3"]);
        assert_eq!(cart.line("iphone-17-pro").unwrap().quantity, 5);
    }

    #[test]
    fn test_add_item_ignores_unknown_and_non_positive() {
        let (mut cart, store) = manager();

        assert!(!cart.add_item("nonexistent-id", 5));
        assert!(!cart.add_item("iphone-air", 0));
        assert!(!cart.add_item("iphone-air", -3));

        assert!(cart.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_add_item_saturates_quantity() {
        let (mut cart, _) = manager();
        cart.add_item("iphone-air", i64::MAX);
        assert_eq!(cart.line("iphone-air").unwrap().quantity, u32::MAX);
        assert!(!cart.add_one("iphone-air"));
    }

    #[test]
    fn test_update_quantity_clamps_to_one() {
        let (mut cart, _) = manager();
        cart.add_item("macbook-pro-m5", 3);

        for requested in [1, 0, -1, i64::MIN] {
            cart.update_quantity("macbook-pro-m5", requested);
            assert_eq!(cart.line("macbook-pro-m5").unwrap().quantity, 1);
        }
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let (mut cart, _) = manager();
        cart.add_one("airpods-pro-3");

        assert!(cart.update_quantity("airpods-pro-3", 7));
        assert_eq!(cart.total_items(), 7);
        assert_eq!(cart.subtotal(), Price::from_whole(2093));
    }

    #[test]
    fn test_update_quantity_missing_line_leaves_lines() {
        let (mut cart, store) = manager();
        assert!(!cart.update_quantity("iphone-air", 4));
        assert!(cart.is_empty());
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_remove_from_cart() {
        let (mut cart, _) = manager();
        cart.add_one("iphone-air");
        cart.add_one("airpods-pro-3");

        assert!(cart.remove_from_cart("iphone-air"));
        assert!(!cart.remove_from_cart("iphone-air"));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_clear_cart_is_idempotent() {
        let (mut cart, store) = manager();
        cart.add_one("iphone-air");

        assert!(cart.clear_cart());
        assert!(!cart.clear_cart());

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Price::ZERO);
        assert_eq!(store.save_count(), 3);
    }

    #[test]
    fn test_unchanged_mutations_still_save_but_do_not_notify() {
        let (mut cart, store) = manager();
        cart.add_item("iphone-air", 2);
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        cart.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(!cart.update_quantity("iphone-air", 2));
        assert!(!cart.remove_from_cart("macbook-pro-m5"));
        cart.clear_cart();
        assert!(!cart.clear_cart());

        assert_eq!(store.save_count(), 5);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_unchanged_mutation_retries_failed_save() {
        let (mut cart, store) = manager();
        cart.add_item("iphone-17-pro", 2);

        store.set_fail_saves(true);
        assert!(cart.clear_cart());
        assert!(cart.last_persist_error().is_some());

        store.set_fail_saves(false);
        assert!(!cart.clear_cart());
        assert!(cart.last_persist_error().is_none());
        assert!(persisted::decode(&store.blob().unwrap()).unwrap().is_empty());
    }

    #[test]
    fn test_every_change_is_persisted() {
        let (mut cart, store) = manager();
        cart.add_item("iphone-17-pro", 2);
        cart.update_quantity("iphone-17-pro", 5);

        let restored = persisted::decode(&store.blob().unwrap()).unwrap();
        assert_eq!(restored, cart.items());
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn test_open_restores_lines() {
        let store = MemoryStore::new();
        {
            let mut cart = manager_with(&store);
            cart.add_item("iphone-air", 2);
            cart.add_one("macbook-pro-m5");
        }

        let cart = manager_with(&store);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.lines()[0].product_id.as_str(), "iphone-air");
    }

    #[test]
    fn test_open_with_corrupt_blob_starts_empty() {
        let store = MemoryStore::with_blob("{{{ not a cart");
        let cart = manager_with(&store);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_open_with_failing_store_starts_empty() {
        let store = MemoryStore::with_blob("[]");
        store.set_fail_loads(true);
        assert!(manager_with(&store).is_empty());
    }

    #[test]
    fn test_save_failure_keeps_mutation() {
        let (mut cart, store) = manager();
        store.set_fail_saves(true);

        assert!(cart.add_item("iphone-air", 2));
        assert_eq!(cart.total_items(), 2);
        assert!(cart.last_persist_error().is_some());
        assert!(store.blob().is_none());

        store.set_fail_saves(false);
        cart.add_one("iphone-air");
        assert!(cart.last_persist_error().is_none());
        let restored = persisted::decode(&store.blob().unwrap()).unwrap();
        assert_eq!(restored[0].quantity, 3);
    }

    #[test]
    fn test_snapshot_price_survives_catalog_change() {
        let store = MemoryStore::new();
        manager_with(&store).add_item("iphone-17-pro", 1);

        let mut repriced = Catalog::builtin().products().to_vec();
        repriced[0].price = Price::from_whole(1499);
        repriced[0].name = "Renamed".to_string();
        let catalog = Arc::new(Catalog::new(repriced).unwrap());

        let mut cart = CartManager::open(catalog, Box::new(store.clone()));
        cart.add_item("iphone-17-pro", 2);

        let line = cart.line("iphone-17-pro").unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.price, Price::from_whole(1199));
        assert_eq!(line.name, "Aictronics Phone Pro");
        assert_eq!(cart.subtotal(), Price::from_whole(3597));
    }

    #[test]
    fn test_lines_for_products_missing_from_catalog_are_kept() {
        let store = MemoryStore::new();
        manager_with(&store).add_one("iphone-air");

        let only_case = Product {
            id: ProductId::new("case"),
            name: "Case".to_string(),
            hero_title: "Case".to_string(),
            tagline: String::new(),
            description_short: String::new(),
            description_long: String::new(),
            price: Price::from_whole(10),
            image: String::new(),
            theme: Theme::Light,
            eyebrow: None,
        };
        let catalog = Arc::new(Catalog::new(vec![only_case]).unwrap());
        let mut cart = CartManager::open(catalog, Box::new(store));

        assert_eq!(cart.total_items(), 1);
        assert!(cart.update_quantity("iphone-air", 4));
        assert!(!cart.add_one("iphone-air"));
    }

    #[test]
    fn test_subscribers_notified_in_order_after_change() {
        let (mut cart, _) = manager();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        cart.subscribe(move |snapshot| first.borrow_mut().push(("first", snapshot.total_items)));
        let second = Rc::clone(&seen);
        cart.subscribe(move |snapshot| second.borrow_mut().push(("second", snapshot.total_items)));

        cart.add_item("iphone-air", 2);
        cart.add_item("nonexistent-id", 1);

        assert_eq!(*seen.borrow(), [("first", 2), ("second", 2)]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let (mut cart, _) = manager();
        let calls = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&calls);
        let id = cart.subscribe(move |_| *counter.borrow_mut() += 1);

        cart.add_one("iphone-air");
        assert!(cart.unsubscribe(id));
        assert!(!cart.unsubscribe(id));
        cart.add_one("iphone-air");

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_subscribers_see_state_after_persist() {
        let (mut cart, store) = manager();
        let observed = Rc::new(RefCell::new(None));

        let sink = Rc::clone(&observed);
        let handle = store.clone();
        cart.subscribe(move |snapshot| {
            *sink.borrow_mut() = Some((snapshot.subtotal, handle.save_count()));
        });

        cart.add_item("macbook-pro-m5", 2);
        assert_eq!(*observed.borrow(), Some((Price::from_whole(3998), 1)));
    }
}
