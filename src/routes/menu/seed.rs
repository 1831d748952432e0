use crate::db::SqlitePool;
use crate::schema::menu_items::dsl as menu_dsl;
use diesel::prelude::*;

/******************************************/
// Adding seed data to the menu catalog
/******************************************/
// Runs from `main` after migrations, never from a request handler, and only
// touches an empty catalog.
pub fn seed_menu(pool: &SqlitePool) -> Result<(), diesel::result::Error> {
    let mut conn = pool.get().expect("Failed to get db connection from Pool");

    let existing: i64 = menu_dsl::menu_items.count().get_result(&mut conn)?;
    if existing > 0 {
        return Ok(());
    }

    let data = vec![
        ("Veg Burger", "Snacks", 60.0, "Crispy veg patty"),
        ("Tea", "Beverages", 15.0, "Hot tea"),
    ];
    for (name, category, price, desc) in data {
        diesel::insert_into(menu_dsl::menu_items)
            .values((
                menu_dsl::name.eq(name),
                menu_dsl::category.eq(category),
                menu_dsl::price.eq(price),
                menu_dsl::description.eq(desc),
            ))
            .execute(&mut conn)?;
    }

    tracing::info!("Seeded default menu items");
    Ok(())
}
