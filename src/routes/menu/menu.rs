use crate::db::SqlitePool;
use crate::db_models::MenuItem;
use crate::errors::custom::ApiError;
use crate::schema::menu_items::dsl::*;
use actix_web::{web, HttpResponse};
use diesel::prelude::*;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

#[derive(Deserialize)]
pub struct CreateMenuItemBody {
    pub name: String,
    pub category: String,
    // No price >= 0 guard here on purpose: the catalog stores whatever the
    // staff frontend sends.
    pub price: f64,
    pub desc: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateMenuItemBody {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub desc: Option<String>,
}

/******************************************/
// Listing the catalog (public and admin)
/******************************************/
/**
 * @route   GET /api/menu, GET /api/admin/menu
 * @access  Public
 */
#[instrument(name = "List menu", skip(pool))]
pub async fn list_menu(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let pool = pool.clone();
    let items = web::block(move || {
        let mut conn = pool
            .get()
            .map_err(|err| ApiError::DatabaseError(err.to_string()))?;
        let items = menu_items.load::<MenuItem>(&mut conn)?;
        Ok::<_, ApiError>(items)
    })
    .await
    .map_err(|err| ApiError::BlockingError(err.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "items": items })))
}

/******************************************/
// Creating a menu item
/******************************************/
/**
 * @route   POST /api/admin/menu
 * @access  Staff
 */
#[instrument(name = "Create menu item", skip(req_item, pool), fields(item_name = %req_item.name))]
pub async fn create_menu_item(
    pool: web::Data<SqlitePool>,
    req_item: web::Json<CreateMenuItemBody>,
) -> Result<HttpResponse, ApiError> {
    let pool = pool.clone();
    let item = req_item.into_inner();

    web::block(move || {
        let mut conn = pool
            .get()
            .map_err(|err| ApiError::DatabaseError(err.to_string()))?;
        diesel::insert_into(menu_items)
            .values((
                name.eq(&item.name),
                category.eq(&item.category),
                price.eq(item.price),
                description.eq(item.desc.as_deref().unwrap_or("")),
            ))
            .execute(&mut conn)?;
        Ok::<_, ApiError>(())
    })
    .await
    .map_err(|err| ApiError::BlockingError(err.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/******************************************/
// Updating a menu item (partial)
/******************************************/
/**
 * @route   PUT /api/admin/menu/{id}
 * @access  Staff
 */
#[instrument(name = "Update menu item", skip(req_item, pool))]
pub async fn update_menu_item(
    pool: web::Data<SqlitePool>,
    item_id: web::Path<i32>,
    req_item: web::Json<UpdateMenuItemBody>,
) -> Result<HttpResponse, ApiError> {
    let pool = pool.clone();
    let item_id = item_id.into_inner();
    let changes = req_item.into_inner();

    web::block(move || {
        let mut conn = pool
            .get()
            .map_err(|err| ApiError::DatabaseError(err.to_string()))?;

        let current = menu_items
            .find(item_id)
            .first::<MenuItem>(&mut conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound(format!("Menu item {}", item_id)))?;

        // Merge only the supplied fields, the rest keep their stored value.
        diesel::update(menu_items.find(item_id))
            .set((
                name.eq(changes.name.unwrap_or(current.name)),
                category.eq(changes.category.unwrap_or(current.category)),
                price.eq(changes.price.unwrap_or(current.price)),
                description.eq(changes.desc.or(current.description)),
            ))
            .execute(&mut conn)?;
        Ok::<_, ApiError>(())
    })
    .await
    .map_err(|err| ApiError::BlockingError(err.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/******************************************/
// Deleting a menu item
/******************************************/
/**
 * @route   DELETE /api/admin/menu/{id}
 * @access  Staff
 */
#[instrument(name = "Delete menu item", skip(pool))]
pub async fn delete_menu_item(
    pool: web::Data<SqlitePool>,
    item_id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let pool = pool.clone();
    let item_id = item_id.into_inner();

    web::block(move || {
        let mut conn = pool
            .get()
            .map_err(|err| ApiError::DatabaseError(err.to_string()))?;
        let deleted = diesel::delete(menu_items.find(item_id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(ApiError::NotFound(format!("Menu item {}", item_id)));
        }
        Ok(())
    })
    .await
    .map_err(|err| ApiError::BlockingError(err.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
