//! Test Helpers

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError, data::NewCartItem, records::CartItemRecord},
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        users::UserUuid,
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
    available_quantity: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct::new(name, price, available_quantity))
        .await
}

pub(crate) async fn add_to_cart(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    quantity: u64,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            NewCartItem {
                product_uuid: product,
                quantity,
            },
        )
        .await
}

/// Everything checkout has queued for low-stock alerts so far, in submission order.
pub(crate) fn drain_alerts(ctx: &mut TestContext) -> Vec<ProductUuid> {
    std::iter::from_fn(|| ctx.alerts.try_recv()).collect()
}
