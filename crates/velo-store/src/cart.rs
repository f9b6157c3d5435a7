//! # Cart Store
//!
//! One cart per user, created lazily on first access.
//!
//! ## Mutation Serialization
//! ```text
//! Two concurrent add_item calls for the same user:
//!
//!   call A ──► lock ──► mutate + reprice ──► unlock
//!   call B ──────────────── blocked ──────► lock ──► mutate + reprice
//! ```
//! The closure passed to [`CartStore::upsert_mut`] / [`CartStore::try_mut`]
//! runs under the store lock, so a cart's persisted total is always
//! consistent with its persisted lines.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;
use uuid::Uuid;

use velo_core::Cart;

/// In-memory cart storage keyed by user id. A user has at most one cart;
/// the map key is the uniqueness constraint.
#[derive(Debug, Default)]
pub struct CartStore {
    carts: Mutex<HashMap<String, Cart>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's cart, if one exists.
    pub fn find_by_user(&self, user_id: &str) -> Option<Cart> {
        self.lock().get(user_id).cloned()
    }

    /// The user's cart, creating an empty one (total 0, no lines) on first
    /// access. Idempotent per user.
    pub fn get_or_create(&self, user_id: &str) -> Cart {
        let mut carts = self.lock();
        carts
            .entry(user_id.to_string())
            .or_insert_with(|| {
                debug!(user_id = %user_id, "Creating empty cart");
                Cart::new(Uuid::new_v4().to_string(), user_id)
            })
            .clone()
    }

    /// Mutates the user's cart under the store lock, creating an empty cart
    /// first if none exists. Returns the closure's result.
    pub fn upsert_mut<R>(&self, user_id: &str, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut carts = self.lock();
        let cart = carts
            .entry(user_id.to_string())
            .or_insert_with(|| Cart::new(Uuid::new_v4().to_string(), user_id));
        f(cart)
    }

    /// Mutates the user's cart under the store lock, or returns None when
    /// the user has no cart.
    pub fn try_mut<R>(&self, user_id: &str, f: impl FnOnce(&mut Cart) -> R) -> Option<R> {
        let mut carts = self.lock();
        carts.get_mut(user_id).map(f)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Cart>> {
        self.carts.lock().expect("cart store mutex poisoned")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
