//! The local cart mirror and its reconciliation protocol.

use rust_decimal::Decimal;

use clothy_core::CartLineId;

use crate::session::SessionContext;
use crate::transport::{CartTransport, TransportError};

/// Identity of a mirror line.
///
/// Server lines carry the server's id; lines created by a local fallback
/// only exist here and get a mirror-local id until the next successful sync
/// replaces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRef {
    /// A line the server knows about.
    Server(CartLineId),
    /// A line that exists only in this mirror.
    Local(u64),
}

/// One line of the mirrored cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorLine {
    pub id: LineRef,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    /// Owner display name, present only on server-sourced lines.
    pub owner_name: Option<String>,
}

/// How a mutation was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server accepted the mutation; the mirror reflects it.
    Synced,
    /// The server was unavailable (or there is no credential); only the
    /// local mirror changed. The next successful reconcile wins.
    LocalOnly,
}

/// A local cache of cart state, reconciled against the server whenever a
/// credential is present.
#[derive(Debug)]
pub struct CartMirror<T> {
    transport: T,
    lines: Vec<MirrorLine>,
    next_local_id: u64,
}

impl<T: CartTransport> CartMirror<T> {
    /// Create an empty mirror over the given transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            lines: Vec::new(),
            next_local_id: 0,
        }
    }

    /// Current mirror contents.
    #[must_use]
    pub fn lines(&self) -> &[MirrorLine] {
        &self.lines
    }

    /// Number of lines in the mirror.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the mirror is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Reconcile the mirror with the current authentication state.
    ///
    /// Call this on every auth transition: app start, login, logout.
    ///
    /// - Without a credential the mirror is wiped; guest carts do not
    ///   survive sessions.
    /// - With a credential the authoritative list is fetched and the mirror
    ///   overwritten field-for-field. Local-only lines added while a fetch
    ///   was in flight are not merged; the last fetch wins.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the fetch fails; the mirror is left
    /// untouched in that case.
    pub async fn reconcile(&mut self, ctx: &SessionContext) -> Result<(), TransportError> {
        if !ctx.is_authenticated() {
            self.lines.clear();
            return Ok(());
        }

        let remote = self.transport.fetch_lines(ctx).await?;
        self.lines = remote
            .into_iter()
            .map(|line| MirrorLine {
                id: LineRef::Server(line.id),
                product_name: line.product_name,
                unit_price: line.unit_price,
                quantity: line.quantity,
                owner_name: Some(line.display_name),
            })
            .collect();

        Ok(())
    }

    /// Add a product to the cart.
    ///
    /// With a credential the server is tried first and the mirror refreshed
    /// from it. Without one, or when the request fails, a local line is
    /// appended so the user is never blocked.
    pub async fn add(
        &mut self,
        ctx: &SessionContext,
        product_name: &str,
        price: Decimal,
    ) -> MutationOutcome {
        if ctx.is_authenticated() {
            match self.transport.add_line(ctx, product_name, price).await {
                Ok(()) => {
                    // Best effort: a failed refresh leaves the mirror stale,
                    // not wrong enough to block on.
                    if let Err(e) = self.reconcile(ctx).await {
                        tracing::warn!("cart refresh after add failed: {e}");
                    }
                    return MutationOutcome::Synced;
                }
                Err(e) => {
                    tracing::warn!("server add failed, falling back to local mirror: {e}");
                }
            }
        }

        let id = LineRef::Local(self.next_local_id);
        self.next_local_id += 1;
        self.lines.push(MirrorLine {
            id,
            product_name: product_name.to_owned(),
            unit_price: price,
            quantity: 1,
            owner_name: None,
        });

        MutationOutcome::LocalOnly
    }

    /// Remove one line from the cart.
    ///
    /// Server lines are removed server-first with the same local fallback as
    /// `add`; local-only lines never touch the server.
    pub async fn remove_one(&mut self, ctx: &SessionContext, id: LineRef) -> MutationOutcome {
        if let LineRef::Server(server_id) = id
            && ctx.is_authenticated()
        {
            match self.transport.remove_line(ctx, server_id).await {
                Ok(()) => {
                    if let Err(e) = self.reconcile(ctx).await {
                        tracing::warn!("cart refresh after remove failed: {e}");
                        self.lines.retain(|line| line.id != id);
                    }
                    return MutationOutcome::Synced;
                }
                Err(e) => {
                    tracing::warn!("server remove failed, falling back to local mirror: {e}");
                }
            }
        }

        self.lines.retain(|line| line.id != id);
        MutationOutcome::LocalOnly
    }

    /// Empty the cart.
    ///
    /// The mirror is emptied either way; the outcome reports whether the
    /// server saw it too.
    pub async fn clear(&mut self, ctx: &SessionContext) -> MutationOutcome {
        let outcome = if ctx.is_authenticated() {
            match self.transport.clear(ctx).await {
                Ok(()) => MutationOutcome::Synced,
                Err(e) => {
                    tracing::warn!("server clear failed, clearing local mirror only: {e}");
                    MutationOutcome::LocalOnly
                }
            }
        } else {
            MutationOutcome::LocalOnly
        };

        self.lines.clear();
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::transport::RemoteCartLine;

    /// In-memory stand-in for the server.
    #[derive(Default)]
    struct FakeTransport {
        lines: RefCell<Vec<RemoteCartLine>>,
        next_id: Cell<i32>,
        fail: Cell<bool>,
    }

    impl FakeTransport {
        fn seeded(lines: Vec<RemoteCartLine>) -> Self {
            Self {
                lines: RefCell::new(lines),
                next_id: Cell::new(100),
                fail: Cell::new(false),
            }
        }

        fn check(&self) -> Result<(), TransportError> {
            if self.fail.get() {
                Err(TransportError::Status(500))
            } else {
                Ok(())
            }
        }
    }

    fn remote(id: i32, name: &str, price: i64, quantity: i32) -> RemoteCartLine {
        RemoteCartLine {
            id: CartLineId::new(id),
            product_name: name.to_owned(),
            unit_price: Decimal::from(price),
            quantity,
            display_name: "Ada Lovelace".to_owned(),
        }
    }

    impl CartTransport for FakeTransport {
        async fn fetch_lines(
            &self,
            _ctx: &SessionContext,
        ) -> Result<Vec<RemoteCartLine>, TransportError> {
            self.check()?;
            Ok(self.lines.borrow().clone())
        }

        async fn add_line(
            &self,
            _ctx: &SessionContext,
            product_name: &str,
            price: Decimal,
        ) -> Result<(), TransportError> {
            self.check()?;
            let mut lines = self.lines.borrow_mut();
            if let Some(line) = lines.iter_mut().find(|l| l.product_name == product_name) {
                line.quantity += 1;
            } else {
                let id = self.next_id.get();
                self.next_id.set(id + 1);
                lines.push(RemoteCartLine {
                    id: CartLineId::new(id),
                    product_name: product_name.to_owned(),
                    unit_price: price,
                    quantity: 1,
                    display_name: "Ada Lovelace".to_owned(),
                });
            }
            Ok(())
        }

        async fn remove_line(
            &self,
            _ctx: &SessionContext,
            id: CartLineId,
        ) -> Result<(), TransportError> {
            self.check()?;
            self.lines.borrow_mut().retain(|l| l.id != id);
            Ok(())
        }

        async fn clear(&self, _ctx: &SessionContext) -> Result<(), TransportError> {
            self.check()?;
            self.lines.borrow_mut().clear();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_reconcile_without_credential_wipes_mirror() {
        let mut mirror = CartMirror::new(FakeTransport::seeded(vec![remote(1, "Tee", 300, 1)]));

        // Seed some local state, then lose the credential.
        mirror
            .add(&SessionContext::anonymous(), "Jeans", Decimal::from(900))
            .await;
        assert_eq!(mirror.len(), 1);

        mirror.reconcile(&SessionContext::anonymous()).await.unwrap();
        assert!(mirror.is_empty());
    }

    #[tokio::test]
    async fn test_reconcile_overwrites_field_for_field() {
        let transport = FakeTransport::seeded(vec![remote(7, "Tee", 300, 2)]);
        let mut mirror = CartMirror::new(transport);
        let ctx = SessionContext::authenticated("cred");

        // A stale local line must not survive the fetch.
        mirror.add(&SessionContext::anonymous(), "Stale", Decimal::ONE).await;

        mirror.reconcile(&ctx).await.unwrap();

        assert_eq!(mirror.len(), 1);
        let line = &mirror.lines()[0];
        assert_eq!(line.id, LineRef::Server(CartLineId::new(7)));
        assert_eq!(line.product_name, "Tee");
        assert_eq!(line.unit_price, Decimal::from(300));
        assert_eq!(line.quantity, 2);
        assert_eq!(line.owner_name.as_deref(), Some("Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_reconcile_failure_leaves_mirror_untouched() {
        let transport = FakeTransport::seeded(vec![remote(7, "Tee", 300, 2)]);
        let mut mirror = CartMirror::new(transport);
        let ctx = SessionContext::authenticated("cred");

        mirror.reconcile(&ctx).await.unwrap();
        mirror.transport.fail.set(true);

        let result = mirror.reconcile(&ctx).await;
        assert!(result.is_err());
        assert_eq!(mirror.len(), 1);
    }

    #[tokio::test]
    async fn test_add_syncs_when_server_reachable() {
        let mut mirror = CartMirror::new(FakeTransport::default());
        let ctx = SessionContext::authenticated("cred");

        let outcome = mirror.add(&ctx, "Tee", Decimal::from(300)).await;

        assert_eq!(outcome, MutationOutcome::Synced);
        assert_eq!(mirror.len(), 1);
        assert!(matches!(mirror.lines()[0].id, LineRef::Server(_)));
    }

    #[tokio::test]
    async fn test_add_falls_back_to_local_on_failure() {
        let transport = FakeTransport::default();
        transport.fail.set(true);
        let mut mirror = CartMirror::new(transport);
        let ctx = SessionContext::authenticated("cred");

        let outcome = mirror.add(&ctx, "Tee", Decimal::from(300)).await;

        assert_eq!(outcome, MutationOutcome::LocalOnly);
        assert_eq!(mirror.len(), 1);
        assert_eq!(mirror.lines()[0].id, LineRef::Local(0));
        assert_eq!(mirror.lines()[0].owner_name, None);
    }

    #[tokio::test]
    async fn test_guest_add_is_local_only() {
        let mut mirror = CartMirror::new(FakeTransport::default());

        let outcome = mirror
            .add(&SessionContext::anonymous(), "Tee", Decimal::from(300))
            .await;

        assert_eq!(outcome, MutationOutcome::LocalOnly);
        assert!(mirror.transport.lines.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_remove_server_line_syncs() {
        let transport = FakeTransport::seeded(vec![remote(7, "Tee", 300, 1)]);
        let mut mirror = CartMirror::new(transport);
        let ctx = SessionContext::authenticated("cred");
        mirror.reconcile(&ctx).await.unwrap();

        let outcome = mirror
            .remove_one(&ctx, LineRef::Server(CartLineId::new(7)))
            .await;

        assert_eq!(outcome, MutationOutcome::Synced);
        assert!(mirror.is_empty());
        assert!(mirror.transport.lines.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_remove_falls_back_to_local_on_failure() {
        let transport = FakeTransport::seeded(vec![remote(7, "Tee", 300, 1)]);
        let mut mirror = CartMirror::new(transport);
        let ctx = SessionContext::authenticated("cred");
        mirror.reconcile(&ctx).await.unwrap();

        mirror.transport.fail.set(true);
        let outcome = mirror
            .remove_one(&ctx, LineRef::Server(CartLineId::new(7)))
            .await;

        assert_eq!(outcome, MutationOutcome::LocalOnly);
        // Gone locally even though the server still has it.
        assert!(mirror.is_empty());
        assert_eq!(mirror.transport.lines.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_local_line_never_calls_server() {
        let mut mirror = CartMirror::new(FakeTransport::default());
        let ctx = SessionContext::anonymous();
        mirror.add(&ctx, "Tee", Decimal::from(300)).await;
        let id = mirror.lines()[0].id;

        let outcome = mirror
            .remove_one(&SessionContext::authenticated("cred"), id)
            .await;

        assert_eq!(outcome, MutationOutcome::LocalOnly);
        assert!(mirror.is_empty());
    }

    #[tokio::test]
    async fn test_clear_empties_mirror_even_when_server_fails() {
        let transport = FakeTransport::seeded(vec![remote(7, "Tee", 300, 1)]);
        let mut mirror = CartMirror::new(transport);
        let ctx = SessionContext::authenticated("cred");
        mirror.reconcile(&ctx).await.unwrap();

        mirror.transport.fail.set(true);
        let outcome = mirror.clear(&ctx).await;

        assert_eq!(outcome, MutationOutcome::LocalOnly);
        assert!(mirror.is_empty());
    }
}
