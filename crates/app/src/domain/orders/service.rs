//! Orders service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        orders::{
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository, attach_items},
        },
        users::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self.orders_repository.list_user_orders(&mut tx, user).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let items = self.items_repository.get_order_items(&mut tx, &uuids).await?;

        tx.commit().await?;

        attach_items(&mut orders, items);

        Ok(orders)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut order = self
            .orders_repository
            .get_user_order(&mut tx, user, order)
            .await?;

        let items = self
            .items_repository
            .get_order_items(&mut tx, &[order.uuid])
            .await?;

        tx.commit().await?;

        order.items = items;

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// The user's orders with their lines, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// One of the user's orders. Orders owned by someone else are reported as not found.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::checkout::CheckoutService,
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn list_orders_returns_newest_first_with_items() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let product = helpers::create_product(&ctx, "Travel Mug", 54_99, 40).await?;

        helpers::add_to_cart(&ctx, user, product.uuid, 1).await?;
        let first = ctx.checkout.place_order(user).await?;

        helpers::add_to_cart(&ctx, user, product.uuid, 2).await?;
        let second = ctx.checkout.place_order(user).await?;

        let orders = ctx.orders.list_orders(user).await?;
        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        assert_eq!(uuids, vec![second.uuid, first.uuid]);
        assert_eq!(
            orders.first().and_then(|order| order.items.first()).map(|item| item.quantity),
            Some(2)
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_for_user_without_orders_is_empty() -> TestResult {
        let ctx = TestContext::new().await;

        assert!(ctx.orders.list_orders(UserUuid::new()).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_order_returns_lines_in_cart_order() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let bag = helpers::create_product(&ctx, "Messenger Bag", 129_99, 18).await?;
        let pad = helpers::create_product(&ctx, "Charging Pad", 39_99, 60).await?;

        helpers::add_to_cart(&ctx, user, bag.uuid, 1).await?;
        helpers::add_to_cart(&ctx, user, pad.uuid, 3).await?;

        let placed = ctx.checkout.place_order(user).await?;
        let order = ctx.orders.get_order(user, placed.uuid).await?;
        let names: Vec<&str> = order
            .items
            .iter()
            .map(|item| item.product_name.as_str())
            .collect();

        assert_eq!(names, vec!["Messenger Bag", "Charging Pad"]);
        assert_eq!(order.total_amount, 129_99 + 3 * 39_99);

        Ok(())
    }

    #[tokio::test]
    async fn get_order_of_another_user_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = UserUuid::new();
        let product = helpers::create_product(&ctx, "Water Bottle", 45_99, 50).await?;

        helpers::add_to_cart(&ctx, owner, product.uuid, 1).await?;
        let order = ctx.checkout.place_order(owner).await?;

        let result = ctx.orders.get_order(UserUuid::new(), order.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
