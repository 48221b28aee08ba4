use std::env;

use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use stockbook::db::establish_connection_pool;
use stockbook::repository::DieselRepository;
use stockbook::routes::analytics::{
    show_low_stock, show_monthly_top, show_period_sales, show_report, show_totals,
};
use stockbook::routes::auth::{create_session, logout, show_profile, upgrade_account};
use stockbook::routes::bills::{add_bill, list_bills, show_bill};
use stockbook::routes::businesses::{add_business, list_businesses, show_business};
use stockbook::routes::notifications::{
    add_notification, list_notifications, mark_notification_read,
};
use stockbook::routes::products::{
    add_product, adjust_stock, delete_product, edit_product, find_by_barcode, list_low_stock,
    list_products, show_product,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret_key = match env::var("SECRET_KEY") {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(create_session)
            .service(logout)
            .service(show_profile)
            .service(upgrade_account)
            .service(add_business)
            .service(list_businesses)
            .service(show_business)
            .service(add_product)
            .service(list_products)
            // Literal product paths must come before the {product_id} routes.
            .service(list_low_stock)
            .service(find_by_barcode)
            .service(show_product)
            .service(edit_product)
            .service(delete_product)
            .service(adjust_stock)
            .service(add_bill)
            .service(list_bills)
            .service(show_bill)
            .service(list_notifications)
            .service(add_notification)
            .service(mark_notification_read)
            .service(show_totals)
            .service(show_report)
            .service(show_period_sales)
            .service(show_monthly_top)
            .service(show_low_stock)
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
