use crate::db::SqlitePool;
use crate::db_models::{Order, OrderItem};
use crate::errors::custom::ApiError;
use crate::schema::menu_items::dsl as menu_dsl;
use crate::schema::order_items::dsl as item_dsl;
use crate::schema::orders::dsl as order_dsl;
use crate::validations::order_status::OrderStatus;
use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::instrument;

#[derive(Deserialize)]
pub struct LineRequest {
    pub id: i32,
    pub qty: i32,
}

#[derive(Deserialize)]
pub struct PlaceOrderBody {
    #[serde(rename = "userEmail", default)]
    pub user_email: String,
    #[serde(default)]
    pub items: Vec<LineRequest>,
}

#[derive(Deserialize)]
pub struct MyOrdersQuery {
    pub email: String,
}

#[derive(Deserialize)]
pub struct UpdateStatusBody {
    pub status: String,
}

/******************************************/
// New Order Creation route
/******************************************/
/**
 * @route   POST /api/orders
 * @access  Public
 */
#[instrument(name = "Place order", skip(req_order, pool), fields(user_email = %req_order.user_email))]
pub async fn place_order(
    pool: web::Data<SqlitePool>,
    req_order: web::Json<PlaceOrderBody>,
) -> Result<HttpResponse, ApiError> {
    let order_data = req_order.into_inner();
    if order_data.user_email.is_empty() || order_data.items.is_empty() {
        return Ok(HttpResponse::Ok().json(json!({
            "success": false,
            "message": "Invalid order"
        })));
    }

    let pool = pool.clone();
    let order_id = web::block(move || {
        let mut conn = pool
            .get()
            .map_err(|err| ApiError::DatabaseError(err.to_string()))?;

        // The order row and its line items land atomically: a failure mid-way
        // never leaves a total=0 order without items behind.
        conn.transaction::<i32, ApiError, _>(|conn| {
            let new_order_id: i32 = diesel::insert_into(order_dsl::orders)
                .values((
                    order_dsl::user_email.eq(&order_data.user_email),
                    order_dsl::total.eq(0.0),
                    order_dsl::status.eq(OrderStatus::Placed.as_str()),
                    order_dsl::created_at.eq(chrono::Utc::now().naive_utc()),
                ))
                .returning(order_dsl::id)
                .get_result(conn)?;

            let mut running_total = 0.0;
            for line in &order_data.items {
                // Unknown menu ids are skipped, not reported.
                let menu_item: Option<(String, f64)> = menu_dsl::menu_items
                    .find(line.id)
                    .select((menu_dsl::name, menu_dsl::price))
                    .first(conn)
                    .optional()?;
                let (item_name, item_price) = match menu_item {
                    Some(found) => found,
                    None => continue,
                };

                running_total += item_price * line.qty as f64;
                diesel::insert_into(item_dsl::order_items)
                    .values((
                        item_dsl::order_id.eq(new_order_id),
                        item_dsl::name.eq(item_name),
                        item_dsl::price.eq(item_price),
                        item_dsl::qty.eq(line.qty),
                    ))
                    .execute(conn)?;
            }

            diesel::update(order_dsl::orders.find(new_order_id))
                .set(order_dsl::total.eq(running_total))
                .execute(conn)?;
            Ok(new_order_id)
        })
    })
    .await
    .map_err(|err| ApiError::BlockingError(err.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "orderId": order_id })))
}

// Per-order child fetch. N+1 reads, fine at canteen scale.
fn load_order_items(
    conn: &mut SqliteConnection,
    for_order_id: i32,
) -> Result<Vec<OrderItem>, diesel::result::Error> {
    item_dsl::order_items
        .filter(item_dsl::order_id.eq(for_order_id))
        .load::<OrderItem>(conn)
}

fn orders_payload(
    conn: &mut SqliteConnection,
    order_rows: Vec<Order>,
    include_owner: bool,
) -> Result<Vec<Value>, diesel::result::Error> {
    let mut payload = Vec::with_capacity(order_rows.len());
    for order in order_rows {
        let items = load_order_items(conn, order.id)?;
        let mut entry = json!({
            "id": order.id,
            "total": order.total,
            "status": order.status,
            "createdAt": order.created_at,
            "items": items,
        });
        if include_owner {
            entry["userEmail"] = json!(order.user_email);
        }
        payload.push(entry);
    }
    Ok(payload)
}

/******************************************/
// Retrieving all orders of one user
/******************************************/
/**
 * @route   GET /api/myorders?email=
 * @access  Public
 */
#[instrument(name = "List my orders", skip(pool, query), fields(user_email = %query.email))]
pub async fn my_orders(
    pool: web::Data<SqlitePool>,
    query: web::Query<MyOrdersQuery>,
) -> Result<HttpResponse, ApiError> {
    let pool = pool.clone();
    let owner_email = query.into_inner().email;

    let orders = web::block(move || {
        let mut conn = pool
            .get()
            .map_err(|err| ApiError::DatabaseError(err.to_string()))?;
        let order_rows = order_dsl::orders
            .filter(order_dsl::user_email.eq(&owner_email))
            .order((order_dsl::created_at.desc(), order_dsl::id.desc()))
            .load::<Order>(&mut conn)?;
        Ok::<_, ApiError>(orders_payload(&mut conn, order_rows, false)?)
    })
    .await
    .map_err(|err| ApiError::BlockingError(err.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "orders": orders })))
}

/******************************************/
// Retrieving all orders (staff view)
/******************************************/
/**
 * @route   GET /api/staff/orders
 * @access  Staff
 */
#[instrument(name = "List all orders", skip(pool))]
pub async fn staff_orders(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let pool = pool.clone();

    let orders = web::block(move || {
        let mut conn = pool
            .get()
            .map_err(|err| ApiError::DatabaseError(err.to_string()))?;
        let order_rows = order_dsl::orders
            .order((order_dsl::created_at.desc(), order_dsl::id.desc()))
            .load::<Order>(&mut conn)?;
        Ok::<_, ApiError>(orders_payload(&mut conn, order_rows, true)?)
    })
    .await
    .map_err(|err| ApiError::BlockingError(err.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "orders": orders })))
}

/******************************************/
// Updating the status of an order
/******************************************/
/**
 * @route   PUT /api/staff/orders/{id}/status
 * @access  Staff
 */
#[instrument(name = "Update order status", skip(pool, req_status), fields(status = %req_status.status))]
pub async fn update_order_status(
    pool: web::Data<SqlitePool>,
    path_order_id: web::Path<i32>,
    req_status: web::Json<UpdateStatusBody>,
) -> Result<HttpResponse, ApiError> {
    let pool = pool.clone();
    let target_order_id = path_order_id.into_inner();
    let next_status =
        OrderStatus::parse(&req_status.status).map_err(ApiError::ValidationError)?;

    web::block(move || {
        let mut conn = pool
            .get()
            .map_err(|err| ApiError::DatabaseError(err.to_string()))?;

        let stored_status: String = order_dsl::orders
            .find(target_order_id)
            .select(order_dsl::status)
            .first(&mut conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound(format!("Order {}", target_order_id)))?;
        let current_status =
            OrderStatus::parse(&stored_status).map_err(ApiError::ValidationError)?;

        if !current_status.can_transition_to(next_status) {
            return Err(ApiError::ValidationError(format!(
                "Cannot move order from {} to {}",
                current_status.as_str(),
                next_status.as_str()
            )));
        }

        diesel::update(order_dsl::orders.find(target_order_id))
            .set(order_dsl::status.eq(next_status.as_str()))
            .execute(&mut conn)?;
        Ok(())
    })
    .await
    .map_err(|err| ApiError::BlockingError(err.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
