//! Checkout service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, instrument, warn};

use crate::{
    database::Db,
    domain::{
        alerts::AlertQueue,
        carts::{
            repositories::PgCartItemsRepository,
            snapshot::{CartSnapshot, PgSnapshotReader},
        },
        checkout::errors::CheckoutError,
        inventory::{InventoryError, ledger::PgInventoryLedger},
        orders::{
            data::{NewOrder, NewOrderItem},
            records::{OrderItemUuid, OrderRecord, OrderStatus, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        products::records::ProductUuid,
        users::UserUuid,
    },
};

/// A committed order and the products it left at or below their threshold.
#[derive(Debug)]
struct PlacedOrder {
    order: OrderRecord,
    low_stock: Vec<ProductUuid>,
}

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    snapshots: PgSnapshotReader,
    cart_items_repository: PgCartItemsRepository,
    orders_repository: PgOrdersRepository,
    order_items_repository: PgOrderItemsRepository,
    ledger: PgInventoryLedger,
    alerts: AlertQueue,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db, alerts: AlertQueue) -> Self {
        Self {
            db,
            snapshots: PgSnapshotReader::new(),
            cart_items_repository: PgCartItemsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
            order_items_repository: PgOrderItemsRepository::new(),
            ledger: PgInventoryLedger::new(),
            alerts,
        }
    }

    async fn read_snapshot(&self, user: UserUuid) -> Result<CartSnapshot, CheckoutError> {
        let mut tx = self.db.begin_transaction().await?;

        let snapshot = self.snapshots.read(&mut tx, user).await?;

        tx.commit().await?;

        snapshot.ok_or(CheckoutError::EmptyCart)
    }

    /// Everything that must happen atomically. The caller owns commit and rollback.
    ///
    /// `snapshot` only names the cart. Its lines are read again under the cart lock, so a
    /// second checkout of the same cart waits here and then finds it empty.
    async fn place(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        snapshot: &CartSnapshot,
    ) -> Result<PlacedOrder, CheckoutError> {
        let current = self
            .snapshots
            .read_locked(tx, snapshot.cart_uuid)
            .await?
            .ok_or(CheckoutError::EmptyCart)?;

        let products: Vec<ProductUuid> = current
            .lines
            .iter()
            .map(|line| line.product.uuid)
            .collect();

        let locked = self.ledger.lock(tx, &products).await?;

        let mut priced = Vec::with_capacity(current.lines.len());
        let mut total: u64 = 0;

        for line in &current.lines {
            let level = locked
                .get(&line.product.uuid)
                .ok_or_else(|| CheckoutError::ProductUnavailable {
                    product_name: line.product.name.clone(),
                })?;

            total = level
                .price
                .checked_mul(line.quantity)
                .and_then(|subtotal| total.checked_add(subtotal))
                .ok_or(CheckoutError::AmountOverflow)?;

            priced.push((line, level.price));
        }

        let mut order = self
            .orders_repository
            .create_order(
                tx,
                NewOrder {
                    uuid: OrderUuid::new(),
                    user_uuid: user,
                    status: OrderStatus::Completed,
                    total_amount: total,
                },
            )
            .await?;

        let mut low_stock = Vec::new();

        for (line, price) in priced {
            let item = self
                .order_items_repository
                .create_order_item(
                    tx,
                    order.uuid,
                    NewOrderItem {
                        uuid: OrderItemUuid::new(),
                        product_uuid: line.product.uuid,
                        quantity: line.quantity,
                        price,
                    },
                )
                .await?;

            let level = self
                .ledger
                .decrement(tx, line.product.uuid, line.quantity)
                .await
                .map_err(|error| match error {
                    InventoryError::NotFound => CheckoutError::ProductUnavailable {
                        product_name: line.product.name.clone(),
                    },
                    error => error.into(),
                })?;

            if level.is_low() {
                low_stock.push(level.product_uuid);
            }

            order.items.push(item);
        }

        let cleared = self
            .cart_items_repository
            .clear_cart_items(tx, current.cart_uuid)
            .await?;

        if usize::try_from(cleared) != Ok(current.lines.len()) {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(PlacedOrder { order, low_stock })
    }

    /// Run the transactional part of a checkout for an already validated snapshot.
    async fn complete(
        &self,
        user: UserUuid,
        snapshot: &CartSnapshot,
    ) -> Result<OrderRecord, CheckoutError> {
        let mut tx = self.db.begin_transaction().await?;

        let placed = match self.place(&mut tx, user, snapshot).await {
            Ok(placed) => {
                tx.commit().await?;

                placed
            }
            Err(error) => {
                if let Err(rollback_error) = tx.rollback().await {
                    warn!(error = %rollback_error, "checkout rollback failed");
                }

                info!(error = %error, "checkout aborted");

                return Err(error);
            }
        };

        info!(
            order = %placed.order.uuid,
            total_amount = placed.order.total_amount,
            lines = placed.order.items.len(),
            "order placed"
        );

        self.submit_alerts(&placed.low_stock);

        Ok(placed.order)
    }

    fn submit_alerts(&self, products: &[ProductUuid]) {
        for product in products {
            if let Err(error) = self.alerts.submit(*product) {
                warn!(product = %product, error = %error, "low stock alert not queued");
            }
        }
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[instrument(skip(self))]
    async fn place_order(&self, user: UserUuid) -> Result<OrderRecord, CheckoutError> {
        let snapshot = self.read_snapshot(user).await?;

        if let Some(line) = snapshot.first_short_line() {
            return Err(CheckoutError::InsufficientStock {
                product_name: line.product.name.clone(),
            });
        }

        self.complete(user, &snapshot).await
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Turn the user's cart into a completed order.
    ///
    /// Either the order, its lines, the stock decrements and the cart clear all commit
    /// together, or nothing changes.
    async fn place_order(&self, user: UserUuid) -> Result<OrderRecord, CheckoutError>;
}
