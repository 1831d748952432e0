use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

/// Identity record. `role` is an open string ("student"/"staff"/"admin" by
/// convention) rather than a closed enum; login matches on (email, role).
#[derive(Debug, Queryable)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Queryable, Serialize)]
pub struct MenuItem {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(rename = "desc")]
    pub description: Option<String>,
}

/// Purchase record. The payment columns are nullable and stay empty until a
/// caller of the payment simulator writes its outcome back; order placement
/// itself never populates them.
#[derive(Debug, Queryable)]
pub struct Order {
    pub id: i32,
    pub user_email: String,
    pub total: f64,
    pub status: String,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub transaction_id: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Line-item snapshot captured at order time. Later catalog edits never
/// retroactively change these rows.
#[derive(Debug, Queryable, Serialize)]
pub struct OrderItem {
    #[serde(skip_serializing)]
    pub id: i32,
    #[serde(skip_serializing)]
    pub order_id: i32,
    pub name: String,
    pub price: f64,
    pub qty: i32,
}
