//! Shared application state.

use neo_engine::Engine;

/// The engine is stateless, so handlers share one instance behind an `Arc`.
pub struct AppState {
  pub engine: Engine,
}
