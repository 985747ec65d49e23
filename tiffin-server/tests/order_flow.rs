//! End-to-end order flow on the in-memory engine: seed menu → create →
//! transition → audit trail.

use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::{KitchenAction, OrderStatus, OrderType, PaymentMethod, PaymentStatus};
use tiffin_server::db;
use tiffin_server::db::models::{CategoryCreate, MenuItemCreate, OrderDraft, OrderDraftItem};
use tiffin_server::db::repository::{CategoryRepository, KitchenLogRepository, MenuItemRepository};
use tiffin_server::cart::{Cart, CartItemInput};
use tiffin_server::orders::OrderLifecycle;

struct Seeded {
    db: Surreal<Db>,
    burger_id: String,
    fries_id: String,
}

async fn seed() -> Seeded {
    let db = db::memory().await.expect("Failed to open in-memory db");

    let category = CategoryRepository::new(db.clone())
        .create(CategoryCreate {
            name: "Fast Food".to_string(),
            description: None,
            image: None,
            sort_order: None,
        })
        .await
        .expect("Failed to create category");
    let category_id = category.id.as_ref().unwrap().to_string();

    let menu = MenuItemRepository::new(db.clone());
    let burger = menu
        .create(MenuItemCreate {
            name: "Burger".to_string(),
            description: None,
            price: Decimal::from(150),
            image: None,
            category_id: category_id.clone(),
            is_veg: Some(false),
            is_available: Some(true),
            sort_order: Some(1),
        })
        .await
        .expect("Failed to create burger");
    let fries = menu
        .create(MenuItemCreate {
            name: "Fries".to_string(),
            description: None,
            price: Decimal::from(80),
            image: None,
            category_id,
            is_veg: Some(true),
            is_available: Some(true),
            sort_order: Some(2),
        })
        .await
        .expect("Failed to create fries");

    Seeded {
        burger_id: burger.id.unwrap().to_string(),
        fries_id: fries.id.unwrap().to_string(),
        db,
    }
}

/// Burger × 2 @ 150 + Fries × 1 @ 80, total 380; deliver by Bob; expect
/// delivered status, [received, completed] log, updated_at > created_at.
#[tokio::test]
async fn test_create_then_deliver_full_flow() {
    let seeded = seed().await;
    let lifecycle = OrderLifecycle::new(seeded.db.clone());
    let logs = KitchenLogRepository::new(seeded.db.clone());

    let order = lifecycle
        .create_order(OrderDraft {
            customer_name: "Ravi".to_string(),
            customer_type: Default::default(),
            user_id: None,
            order_type: OrderType::Delivery,
            apartment: Some("Green Residency".to_string()),
            flat_no: Some("4B".to_string()),
            address: Some("MG Road".to_string()),
            table_no: None,
            delivery_note: Some("Ring the bell".to_string()),
            items: vec![
                OrderDraftItem {
                    menu_item_id: seeded.burger_id.clone(),
                    quantity: 2,
                    special_request: None,
                },
                OrderDraftItem {
                    menu_item_id: seeded.fries_id.clone(),
                    quantity: 1,
                    special_request: None,
                },
            ],
            total_amount: Decimal::from(380),
            payment_method: None,
            staff_name: None,
        })
        .await
        .expect("Failed to create order");

    let order_id = order.id.as_ref().unwrap().to_string();
    assert_eq!(order.status, OrderStatus::OrderReceived);
    assert_eq!(order.total_amount, Decimal::from(380));

    let delivered = lifecycle
        .update_status(&order_id, OrderStatus::Delivered, Some("Bob".to_string()), None)
        .await
        .expect("Failed to deliver order");

    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert!(delivered.updated_at > delivered.created_at);

    let entries = logs.find_by_order(&order_id).await.unwrap();
    let actions: Vec<KitchenAction> = entries.iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![KitchenAction::Received, KitchenAction::Completed]);
    assert_eq!(entries[1].staff_name, "Bob");
}

/// Payment update without a note defaults the log note.
#[tokio::test]
async fn test_payment_update_writes_default_note() {
    let seeded = seed().await;
    let lifecycle = OrderLifecycle::new(seeded.db.clone());
    let logs = KitchenLogRepository::new(seeded.db.clone());

    let order = lifecycle
        .create_order(OrderDraft {
            customer_name: "Meera".to_string(),
            customer_type: Default::default(),
            user_id: Some("user:meera".to_string()),
            order_type: OrderType::WalkUp,
            apartment: None,
            flat_no: None,
            address: None,
            table_no: None,
            delivery_note: None,
            items: vec![OrderDraftItem {
                menu_item_id: seeded.fries_id.clone(),
                quantity: 2,
                special_request: None,
            }],
            total_amount: Decimal::from(160),
            payment_method: None,
            staff_name: Some("FrontDesk".to_string()),
        })
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    let paid = lifecycle
        .update_payment(
            &order_id,
            PaymentStatus::Paid,
            Some(PaymentMethod::Upi),
            Some("Carol".to_string()),
            None,
        )
        .await
        .unwrap();

    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert_eq!(paid.payment_method, Some(PaymentMethod::Upi));
    // Lifecycle status is untouched by the payment axis
    assert_eq!(paid.status, OrderStatus::OrderReceived);

    let entries = logs.find_by_order(&order_id).await.unwrap();
    let last = entries.last().unwrap();
    assert_eq!(last.action, KitchenAction::PaymentUpdated);
    assert_eq!(last.note.as_deref(), Some("Payment status updated to paid"));

    // The walk-up creation entry carried the supplied staff name
    assert_eq!(entries[0].staff_name, "FrontDesk");
}

/// Cart accumulation feeding checkout: the cart total matches the snapshot
/// sum, so the created dine-in order goes through.
#[tokio::test]
async fn test_cart_checkout_creates_dine_in_order() {
    let seeded = seed().await;
    let lifecycle = OrderLifecycle::new(seeded.db.clone());

    let mut cart = Cart::new();
    cart.add_item(CartItemInput {
        menu_item_id: seeded.burger_id.clone(),
        name: "Burger".to_string(),
        unit_price: Decimal::from(150),
        image: None,
    });
    cart.add_item(CartItemInput {
        menu_item_id: seeded.burger_id.clone(),
        name: "Burger".to_string(),
        unit_price: Decimal::from(150),
        image: None,
    });
    cart.add_item(CartItemInput {
        menu_item_id: seeded.fries_id.clone(),
        name: "Fries".to_string(),
        unit_price: Decimal::from(80),
        image: None,
    });

    assert_eq!(cart.total_amount(), Decimal::from(380));
    assert_eq!(cart.total_item_count(), 2);

    let draft = OrderDraft {
        customer_name: "Table Seven".to_string(),
        customer_type: Default::default(),
        user_id: None,
        order_type: OrderType::DineIn,
        apartment: None,
        flat_no: None,
        address: None,
        table_no: Some("7".to_string()),
        delivery_note: None,
        items: cart
            .entries()
            .iter()
            .map(|e| OrderDraftItem {
                menu_item_id: e.menu_item_id.clone(),
                quantity: e.quantity,
                special_request: None,
            })
            .collect(),
        total_amount: cart.total_amount(),
        payment_method: None,
        staff_name: None,
    };

    let order = lifecycle.create_order(draft).await.unwrap();
    assert_eq!(order.order_type, OrderType::DineIn);
    assert_eq!(order.table_no.as_deref(), Some("7"));
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.total_amount, Decimal::from(380));
}
