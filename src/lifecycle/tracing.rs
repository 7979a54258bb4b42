//! # Observability & Tracing
//!
//! Structured logging for the whole process via the `tracing` crate.
//!
//! Repository actors log with an `entity_type` field instead of module paths, so the
//! subscriber hides targets (`with_target(false)`) and uses the compact format, which
//! renders spans inline (`place_order:reserve_stock: ...`). HTTP requests get their own
//! span from `tower_http::trace::TraceLayer`.
//!
//! ```bash
//! RUST_LOG=info cargo run      # default
//! RUST_LOG=debug cargo run     # payloads at client entry points
//! RUST_LOG=storefront=debug,tower_http=info cargo run
//! ```
//!
//! With `RUST_LOG=info` a successful checkout reads:
//!
//! ```text
//! INFO Sending place_order to actor user=user_2 lines=1
//! INFO Action ok entity_type="Product" id=product_1
//! INFO Order priced order=ORD-3F9A0C21B7D4 total=210.0
//! INFO Created entity_type="Order" id=order_1 size=1
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins; otherwise `info`.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type replaces module paths
        .compact()
        .init();
}
