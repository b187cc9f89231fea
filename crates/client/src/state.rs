//! Shared store context handed to UI code.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::api::{ApiClient, HttpTransport, Transport};
use crate::config::ClientConfig;
use crate::error::{AppError, Result};
use crate::lifecycle::{OpState, lock};
use crate::storage::{LocalStore, keys};
use crate::stores::{CartState, OrderState, ProductState, SessionState};

/// The single handle through which views reach the data layer.
///
/// Cheaply cloneable via `Arc`. In-memory store slices are mutated only by
/// their own operations' lifecycle transitions; views read snapshots through
/// the `*_state()` accessors and never hold a lock across a suspension point.
#[derive(Clone)]
pub struct StoreContext {
    inner: Arc<StoreContextInner>,
}

struct StoreContextInner {
    api: ApiClient,
    storage: LocalStore,
    products: Mutex<ProductState>,
    session: Mutex<SessionState>,
    cart: Mutex<CartState>,
    orders: Mutex<OrderState>,
}

impl StoreContext {
    /// Create a context over the real HTTP transport.
    ///
    /// Rehydrates the cart and session from durable storage before returning,
    /// so the first render already sees the restored state.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be opened or a stored
    /// value is corrupt.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config.api_base_url));
        let storage = LocalStore::open(&config.storage_dir)?;
        Self::with_parts(transport, storage)
    }

    /// Create a context over an arbitrary transport (tests substitute a
    /// scripted stub here).
    ///
    /// # Errors
    ///
    /// Returns an error if a stored value is corrupt.
    pub fn with_parts(transport: Arc<dyn Transport>, storage: LocalStore) -> Result<Self> {
        let cart = CartState {
            items: storage.get(keys::CART_ITEMS)?.unwrap_or_default(),
            shipping_address: storage.get(keys::SHIPPING_ADDRESS)?,
            payment_method: storage.get(keys::PAYMENT_METHOD)?,
            ..CartState::default()
        };
        let session = SessionState {
            user_info: storage.get(keys::USER_INFO)?,
            ..SessionState::default()
        };

        Ok(Self {
            inner: Arc::new(StoreContextInner {
                api: ApiClient::new(transport),
                storage,
                products: Mutex::new(ProductState::default()),
                session: Mutex::new(session),
                cart: Mutex::new(cart),
                orders: Mutex::new(OrderState::default()),
            }),
        })
    }

    /// Snapshot of the product store.
    #[must_use]
    pub fn products_state(&self) -> ProductState {
        lock(&self.inner.products).clone()
    }

    /// Snapshot of the session store.
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        lock(&self.inner.session).clone()
    }

    /// Snapshot of the cart store.
    #[must_use]
    pub fn cart_state(&self) -> CartState {
        lock(&self.inner.cart).clone()
    }

    /// Snapshot of the order store.
    #[must_use]
    pub fn orders_state(&self) -> OrderState {
        lock(&self.inner.orders).clone()
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub(crate) fn storage(&self) -> &LocalStore {
        &self.inner.storage
    }

    pub(crate) fn products(&self) -> &Mutex<ProductState> {
        &self.inner.products
    }

    pub(crate) fn session(&self) -> &Mutex<SessionState> {
        &self.inner.session
    }

    pub(crate) fn cart(&self) -> &Mutex<CartState> {
        &self.inner.cart
    }

    pub(crate) fn orders(&self) -> &Mutex<OrderState> {
        &self.inner.orders
    }

    /// Bearer token of the current session, read at call time so a logout
    /// invalidates the token used on the next call, not in-flight ones.
    pub(crate) fn current_token(&self) -> Option<String> {
        lock(&self.inner.session)
            .user_info
            .as_ref()
            .map(|info| info.token.clone())
    }

    /// Persist `value` under `key`; on failure, record the reason on the
    /// selected slice so the settled operation surfaces the storage fault.
    pub(crate) fn persist_on<S, T: Serialize>(
        &self,
        slice: &Mutex<S>,
        select: impl Fn(&mut S) -> &mut OpState,
        key: &str,
        value: &T,
    ) -> Result<()> {
        if let Err(err) = self.inner.storage.put(key, value) {
            let err = AppError::from(err);
            select(&mut lock(slice)).reject(err.reason());
            return Err(err);
        }
        Ok(())
    }
}
