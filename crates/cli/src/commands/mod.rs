//! CLI command implementations.
//!
//! Each command renders into any `Write` so tests can capture output.

pub mod cart;
pub mod catalog;
pub mod checkout;

/// Result type shared by all commands.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

#[cfg(test)]
pub(crate) mod test_support {
    use aictronics_storefront::config::StorefrontConfig;
    use aictronics_storefront::state::AppState;
    use aictronics_storefront::store::MemoryStore;

    /// State backed by an in-memory store.
    #[allow(clippy::unwrap_used)]
    pub fn state() -> (AppState, MemoryStore) {
        let store = MemoryStore::new();
        let state = AppState::with_store(StorefrontConfig::default(), Box::new(store.clone())).unwrap();
        (state, store)
    }

    /// Run a command and return what it printed.
    #[allow(clippy::unwrap_used)]
    pub fn render(f: impl FnOnce(&mut Vec<u8>) -> super::CommandResult) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }
}
