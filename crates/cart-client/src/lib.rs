//! Clothy Cart Client - local cart mirror with server reconciliation.
//!
//! Gives unauthenticated visitors a usable cart backed by local state only,
//! and keeps that state reconciled against the server-authoritative cart
//! once a credential appears.
//!
//! # Design
//!
//! - No ambient auth state: every call takes an explicit [`SessionContext`].
//!   Auth transitions (login, logout, app start) all funnel through one
//!   entry point, [`CartMirror::reconcile`].
//! - The server wins: reconciliation overwrites the mirror field-for-field
//!   with whatever the last successful fetch returned.
//! - The user is never blocked: mutations try the server first and fall back
//!   to the local mirror when the request fails, accepting divergence until
//!   the next successful sync.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod mirror;
pub mod session;
pub mod transport;

pub use mirror::{CartMirror, LineRef, MirrorLine, MutationOutcome};
pub use session::SessionContext;
pub use transport::{CartTransport, HttpTransport, RemoteCartLine, TransportError};
