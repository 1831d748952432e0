use crate::helper::{seed_menu_item, spawn_app};
use canteen::db::drop_database;
use serde_json::Value;

#[tokio::test]
async fn placing_an_order_totals_the_line_items() {
    //arrange
    let app = spawn_app().await;
    let item_id = seed_menu_item(&app.db_pool, "Veg Burger", "Snacks", 60.0);

    //act
    let order_response = app
        .api_client
        .post(&format!("{}/api/orders", &app.address))
        .json(&serde_json::json!({
            "userEmail": app.test_user.email,
            "items": [{ "id": item_id, "qty": 2 }]
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    //assert
    let order_body = order_response.json::<Value>().await.unwrap();
    assert_eq!(order_body["success"], true);
    assert!(order_body["orderId"].as_i64().is_some());

    let my_orders = app
        .api_client
        .get(&format!(
            "{}/api/myorders?email={}",
            &app.address, app.test_user.email
        ))
        .send()
        .await
        .expect("Failed to execute request.")
        .json::<Value>()
        .await
        .unwrap();

    let orders = my_orders["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["total"], 120.0);
    assert_eq!(orders[0]["status"], "Placed");
    assert!(orders[0]["createdAt"].as_str().is_some());
    let items = orders[0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Veg Burger");
    assert_eq!(items[0]["price"], 60.0);
    assert_eq!(items[0]["qty"], 2);
    drop_database(&app.database_url);
}

#[tokio::test]
async fn lines_referencing_missing_menu_items_are_silently_skipped() {
    //arrange
    let app = spawn_app().await;
    let item_id = seed_menu_item(&app.db_pool, "Tea", "Beverages", 15.0);

    //act
    let order_response = app
        .api_client
        .post(&format!("{}/api/orders", &app.address))
        .json(&serde_json::json!({
            "userEmail": app.test_user.email,
            "items": [
                { "id": item_id, "qty": 1 },
                { "id": 999999, "qty": 3 }
            ]
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    //assert: no error surfaced, total only covers the line that existed
    assert_eq!(order_response.json::<Value>().await.unwrap()["success"], true);

    let my_orders = app
        .api_client
        .get(&format!(
            "{}/api/myorders?email={}",
            &app.address, app.test_user.email
        ))
        .send()
        .await
        .expect("Failed to execute request.")
        .json::<Value>()
        .await
        .unwrap();

    let orders = my_orders["orders"].as_array().unwrap();
    assert_eq!(orders[0]["total"], 15.0);
    assert_eq!(orders[0]["items"].as_array().unwrap().len(), 1);
    drop_database(&app.database_url);
}

#[tokio::test]
async fn an_order_without_items_is_rejected_and_nothing_is_written() {
    //arrange
    let app = spawn_app().await;

    //act
    let order_response = app
        .api_client
        .post(&format!("{}/api/orders", &app.address))
        .json(&serde_json::json!({
            "userEmail": app.test_user.email,
            "items": []
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    //assert
    let body = order_response.json::<Value>().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid order");

    let staff_orders = app
        .api_client
        .get(&format!("{}/api/staff/orders", &app.address))
        .send()
        .await
        .expect("Failed to execute request.")
        .json::<Value>()
        .await
        .unwrap();
    assert!(staff_orders["orders"].as_array().unwrap().is_empty());
    drop_database(&app.database_url);
}

#[tokio::test]
async fn an_order_without_an_email_is_rejected() {
    let app = spawn_app().await;
    let item_id = seed_menu_item(&app.db_pool, "Tea", "Beverages", 15.0);

    let order_response = app
        .api_client
        .post(&format!("{}/api/orders", &app.address))
        .json(&serde_json::json!({
            "userEmail": "",
            "items": [{ "id": item_id, "qty": 1 }]
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    let body = order_response.json::<Value>().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid order");
    drop_database(&app.database_url);
}

#[tokio::test]
async fn staff_see_every_order_newest_first_with_the_owner_email() {
    //arrange
    let app = spawn_app().await;
    let item_id = seed_menu_item(&app.db_pool, "Tea", "Beverages", 15.0);

    for email in ["first@example.com", "second@example.com"] {
        let response = app
            .api_client
            .post(&format!("{}/api/orders", &app.address))
            .json(&serde_json::json!({
                "userEmail": email,
                "items": [{ "id": item_id, "qty": 1 }]
            }))
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(response.json::<Value>().await.unwrap()["success"], true);
    }

    //act
    let staff_orders = app
        .api_client
        .get(&format!("{}/api/staff/orders", &app.address))
        .send()
        .await
        .expect("Failed to execute request.")
        .json::<Value>()
        .await
        .unwrap();

    //assert
    let orders = staff_orders["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["userEmail"], "second@example.com");
    assert_eq!(orders[1]["userEmail"], "first@example.com");
    drop_database(&app.database_url);
}

#[tokio::test]
async fn a_status_update_is_visible_on_the_next_read() {
    //arrange
    let app = spawn_app().await;
    let item_id = seed_menu_item(&app.db_pool, "Tea", "Beverages", 15.0);
    let order_id = place_test_order(&app, item_id).await;

    //act
    let update_response = app
        .api_client
        .put(&format!(
            "{}/api/staff/orders/{}/status",
            &app.address, order_id
        ))
        .json(&serde_json::json!({ "status": "Preparing" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(update_response.json::<Value>().await.unwrap()["success"], true);

    //assert
    let my_orders = app
        .api_client
        .get(&format!(
            "{}/api/myorders?email={}",
            &app.address, app.test_user.email
        ))
        .send()
        .await
        .expect("Failed to execute request.")
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(my_orders["orders"][0]["status"], "Preparing");
    drop_database(&app.database_url);
}

#[tokio::test]
async fn illegal_status_transitions_are_rejected() {
    //arrange
    let app = spawn_app().await;
    let item_id = seed_menu_item(&app.db_pool, "Tea", "Beverages", 15.0);
    let order_id = place_test_order(&app, item_id).await;

    // Placed -> Completed skips the workflow
    let skip_response = app
        .api_client
        .put(&format!(
            "{}/api/staff/orders/{}/status",
            &app.address, order_id
        ))
        .json(&serde_json::json!({ "status": "Completed" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(skip_response.status().as_u16(), 400);
    assert_eq!(skip_response.json::<Value>().await.unwrap()["success"], false);

    // Unknown labels never reach the store
    let unknown_response = app
        .api_client
        .put(&format!(
            "{}/api/staff/orders/{}/status",
            &app.address, order_id
        ))
        .json(&serde_json::json!({ "status": "Frozen" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(unknown_response.status().as_u16(), 400);

    // Cancelling a placed order is allowed
    let cancel_response = app
        .api_client
        .put(&format!(
            "{}/api/staff/orders/{}/status",
            &app.address, order_id
        ))
        .json(&serde_json::json!({ "status": "Cancelled" }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(cancel_response.json::<Value>().await.unwrap()["success"], true);
    drop_database(&app.database_url);
}

#[tokio::test]
async fn updating_the_status_of_a_missing_order_returns_404() {
    let app = spawn_app().await;
    let response = app
        .api_client
        .put(&format!("{}/api/staff/orders/9999/status", &app.address))
        .json(&serde_json::json!({ "status": "Preparing" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 404);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["success"], false);
    drop_database(&app.database_url);
}

#[tokio::test]
async fn deleting_a_menu_item_leaves_past_order_snapshots_untouched() {
    //arrange
    let app = spawn_app().await;
    let item_id = seed_menu_item(&app.db_pool, "Veg Burger", "Snacks", 60.0);
    place_test_order(&app, item_id).await;

    //act
    let delete_response = app
        .api_client
        .delete(&format!("{}/api/admin/menu/{}", &app.address, item_id))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(delete_response.json::<Value>().await.unwrap()["success"], true);

    //assert: the catalog no longer has the item, the order still does
    let listing = app
        .api_client
        .get(&format!("{}/api/menu", &app.address))
        .send()
        .await
        .expect("Failed to execute request.")
        .json::<Value>()
        .await
        .unwrap();
    assert!(listing["items"].as_array().unwrap().is_empty());

    let my_orders = app
        .api_client
        .get(&format!(
            "{}/api/myorders?email={}",
            &app.address, app.test_user.email
        ))
        .send()
        .await
        .expect("Failed to execute request.")
        .json::<Value>()
        .await
        .unwrap();
    let items = my_orders["orders"][0]["items"].as_array().unwrap();
    assert_eq!(items[0]["name"], "Veg Burger");
    assert_eq!(items[0]["price"], 60.0);
    drop_database(&app.database_url);
}

async fn place_test_order(app: &crate::helper::TestApp, item_id: i32) -> i64 {
    let response = app
        .api_client
        .post(&format!("{}/api/orders", &app.address))
        .json(&serde_json::json!({
            "userEmail": app.test_user.email,
            "items": [{ "id": item_id, "qty": 1 }]
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["success"], true);
    body["orderId"].as_i64().expect("orderId not found")
}
