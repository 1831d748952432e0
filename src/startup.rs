use crate::db::SqlitePool;
use crate::routes::{
    auth::auth::{login_user, register_user},
    health_check::health_check,
    menu::menu::{create_menu_item, delete_menu_item, list_menu, update_menu_item},
    order::order::{my_orders, place_order, staff_orders, update_order_status},
};
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/**************************************************************/
// Application state to reuse the same code in main and tests
/***************************************************************/
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(port: u16, pool: SqlitePool) -> Result<Self, std::io::Error> {
        let listener = if port == 0 {
            TcpListener::bind("127.0.0.1:0")?
        } else {
            let address = format!("127.0.0.1:{}", port);
            TcpListener::bind(&address)?
        };

        let actual_port = listener.local_addr()?.port();

        let server = run_server(listener, pool.clone())?;
        Ok(Self {
            port: actual_port,
            server,
        })
    }
    pub fn port(&self) -> u16 {
        self.port
    }
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/******************************************/
// Running Server
/******************************************/
pub fn run_server(listener: TcpListener, pool: SqlitePool) -> Result<Server, std::io::Error> {
    let server = HttpServer::new(move || {
        // The frontend is served from elsewhere, so any origin may call us.
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(pool.clone()))
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .route("/register", web::post().to(register_user))
                    .route("/login", web::post().to(login_user))
                    .route("/menu", web::get().to(list_menu))
                    .route("/admin/menu", web::get().to(list_menu))
                    .route("/admin/menu", web::post().to(create_menu_item))
                    .route("/admin/menu/{id}", web::put().to(update_menu_item))
                    .route("/admin/menu/{id}", web::delete().to(delete_menu_item))
                    .route("/orders", web::post().to(place_order))
                    .route("/myorders", web::get().to(my_orders))
                    .route("/staff/orders", web::get().to(staff_orders))
                    .route("/staff/orders/{id}/status", web::put().to(update_order_status)),
            )
    })
    .listen(listener)?
    .run();
    Ok(server)
}
