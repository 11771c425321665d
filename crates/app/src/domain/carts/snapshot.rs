//! Cart Snapshots
//!
//! A priced, read-only view of a cart taken before checkout. It is advisory: stock and
//! prices are re-read under lock inside the checkout transaction.

use sqlx::{Postgres, Transaction};
use thiserror::Error;

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        records::CartUuid,
        repositories::{PgCartItemsRepository, PgCartsRepository},
    },
    products::records::ProductRecord,
    users::UserUuid,
};

/// A line subtotal or cart total does not fit in the amount type.
#[derive(Debug, Error)]
#[error("amount overflow while pricing {product_name}")]
pub struct PricingOverflow {
    pub product_name: String,
}

/// One cart line with its product fully resolved.
#[derive(Debug, Clone)]
pub struct SnapshotLine {
    pub product: ProductRecord,
    pub quantity: u64,
}

impl SnapshotLine {
    /// Line subtotal at the current catalog price.
    #[must_use]
    pub fn subtotal(&self) -> Option<u64> {
        self.product.price.checked_mul(self.quantity)
    }
}

/// A non-empty cart priced at current catalog prices.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    pub cart_uuid: CartUuid,
    pub lines: Vec<SnapshotLine>,
    pub total: u64,
}

impl CartSnapshot {
    /// Price the given lines. `None` means the cart is empty.
    ///
    /// # Errors
    ///
    /// Returns [`PricingOverflow`] naming the line that overflowed.
    pub fn price(
        cart_uuid: CartUuid,
        lines: Vec<SnapshotLine>,
    ) -> Result<Option<Self>, PricingOverflow> {
        if lines.is_empty() {
            return Ok(None);
        }

        let mut total: u64 = 0;

        for line in &lines {
            total = line
                .subtotal()
                .and_then(|subtotal| total.checked_add(subtotal))
                .ok_or_else(|| PricingOverflow {
                    product_name: line.product.name.clone(),
                })?;
        }

        Ok(Some(Self {
            cart_uuid,
            lines,
            total,
        }))
    }

    /// First line whose quantity exceeds the stock seen when the snapshot was taken.
    #[must_use]
    pub fn first_short_line(&self) -> Option<&SnapshotLine> {
        self.lines
            .iter()
            .find(|line| line.quantity > line.product.available_quantity)
    }
}

/// Reads a user's cart as a [`CartSnapshot`] without locking or reserving anything.
#[derive(Debug, Clone, Default)]
pub(crate) struct PgSnapshotReader {
    carts: PgCartsRepository,
    items: PgCartItemsRepository,
}

impl PgSnapshotReader {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            carts: PgCartsRepository::new(),
            items: PgCartItemsRepository::new(),
        }
    }

    /// `None` when the user has no cart or the cart has no lines.
    pub(crate) async fn read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartSnapshot>, CartsServiceError> {
        let Some(cart) = self.carts.find_cart(tx, user).await? else {
            return Ok(None);
        };

        let lines = self.items.get_snapshot_lines(tx, cart.uuid).await?;

        Ok(CartSnapshot::price(cart.uuid, lines)?)
    }

    /// Lock `cart` and read its lines again as of now.
    ///
    /// Once this returns, no other transaction can check the same cart out until this one
    /// ends. A cart emptied by a checkout that committed first reads as `None`.
    pub(crate) async fn read_locked(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Option<CartSnapshot>, CartsServiceError> {
        if self.carts.lock_cart(tx, cart).await?.is_none() {
            return Ok(None);
        }

        let lines = self.items.get_snapshot_lines(tx, cart).await?;

        Ok(CartSnapshot::price(cart, lines)?)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::domain::products::records::ProductUuid;

    use super::*;

    fn line(name: &str, price: u64, available_quantity: u64, quantity: u64) -> SnapshotLine {
        SnapshotLine {
            product: ProductRecord {
                uuid: ProductUuid::new(),
                name: name.to_string(),
                price,
                available_quantity,
                low_stock_threshold: 5,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            quantity,
        }
    }

    #[test]
    fn empty_lines_price_to_none() {
        let snapshot = CartSnapshot::price(CartUuid::new(), Vec::new());

        assert!(matches!(snapshot, Ok(None)));
    }

    #[test]
    fn total_sums_line_subtotals() -> TestResult {
        let snapshot = CartSnapshot::price(
            CartUuid::new(),
            vec![line("A", 10_00, 5, 2), line("B", 25_00, 3, 1)],
        )?
        .ok_or("expected a snapshot")?;

        assert_eq!(snapshot.total, 45_00);
        assert!(snapshot.first_short_line().is_none());

        Ok(())
    }

    #[test]
    fn overflow_names_the_product() {
        let result = CartSnapshot::price(CartUuid::new(), vec![line("Huge", u64::MAX, 9, 2)]);

        assert_eq!(
            result.err().map(|overflow| overflow.product_name).as_deref(),
            Some("Huge")
        );
    }

    #[test]
    fn first_short_line_finds_oversized_quantity() -> TestResult {
        let snapshot = CartSnapshot::price(
            CartUuid::new(),
            vec![line("A", 10_00, 5, 2), line("B", 25_00, 1, 2)],
        )?
        .ok_or("expected a snapshot")?;

        assert_eq!(
            snapshot.first_short_line().map(|line| line.product.name.as_str()),
            Some("B")
        );

        Ok(())
    }
}
