//! Chatbridge - one chat request in, one provider call out, one normalized reply back.

// ============================================================================
// Always Available
// ============================================================================

pub mod build_info;
pub mod config;
pub mod llm;

// ============================================================================
// Server-only (behind `server` feature)
// ============================================================================

#[cfg(feature = "server")]
pub mod handlers;
#[cfg(feature = "server")]
pub mod response;
#[cfg(feature = "server")]
pub mod server;
