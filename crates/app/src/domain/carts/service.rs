//! Carts service.
//!
//! Stock checks here are advisory: they keep a cart from obviously exceeding what is on the
//! shelf, but only the checkout transaction decides whether the stock is really there.

use async_trait::async_trait;
use mockall::automock;
use tracing::instrument;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, CartRecord},
            repositories::{PgCartItemsRepository, PgCartsRepository},
            snapshot::{CartSnapshot, PgSnapshotReader},
        },
        inventory::ledger::PgInventoryLedger,
        users::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    snapshots: PgSnapshotReader,
    ledger: PgInventoryLedger,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            snapshots: PgSnapshotReader::new(),
            ledger: PgInventoryLedger::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        cart.items.extend(items);

        Ok(cart)
    }

    #[instrument(skip(self, item), fields(product = %item.product_uuid, quantity = item.quantity))]
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let existing = self
            .items_repository
            .find_cart_item_for_product(&mut tx, cart.uuid, item.product_uuid)
            .await?;

        let wanted = match &existing {
            Some(line) => line
                .quantity
                .checked_add(item.quantity)
                .ok_or(CartsServiceError::InvalidQuantity)?,
            None => item.quantity,
        };

        self.ledger
            .validate(&mut tx, item.product_uuid, wanted)
            .await?;

        let saved = match existing {
            Some(line) => {
                self.items_repository
                    .update_quantity(&mut tx, line.uuid, wanted)
                    .await?
            }
            None => {
                self.items_repository
                    .create_cart_item(&mut tx, cart.uuid, item)
                    .await?
            }
        };

        tx.commit().await?;

        Ok(saved)
    }

    #[instrument(skip(self))]
    async fn update_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u64,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let line = self
            .items_repository
            .get_user_cart_item(&mut tx, user, item)
            .await?;

        self.ledger
            .validate(&mut tx, line.product_uuid, quantity)
            .await?;

        let updated = self
            .items_repository
            .update_quantity(&mut tx, line.uuid, quantity)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let line = self
            .items_repository
            .get_user_cart_item(&mut tx, user, item)
            .await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, line.cart_uuid, line.uuid)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn snapshot(&self, user: UserUuid) -> Result<Option<CartSnapshot>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let snapshot = self.snapshots.read(&mut tx, user).await?;

        tx.commit().await?;

        Ok(snapshot)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart, creating an empty one on first access.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add a product to the user's cart, merging with an existing line for that product.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Set the quantity of one of the user's cart lines.
    async fn update_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u64,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove one of the user's cart lines.
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError>;

    /// Price the user's cart at current catalog prices. `None` means the cart is empty.
    async fn snapshot(&self, user: UserUuid) -> Result<Option<CartSnapshot>, CartsServiceError>;
}
