#[macro_use]
extern crate diesel;

mod appointments;
mod audit;
mod auth;
mod clinics;
mod consultations;
mod dashboard;
mod database;
mod models;
mod patients;
mod protocol;
mod schema;
mod settings;
mod users;
mod utils;

use actix_web::{web, App, HttpServer};
use diesel::{r2d2::ConnectionManager, MysqlConnection};

type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let conn_url = std::env::var("DATABASE_URL").expect("DATABASE_URL not found");
    let manager = ConnectionManager::<MysqlConnection>::new(conn_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create pool");

    database::seed_super_admin(&pool).expect("Failed to seed super-admin");

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting ZenMedix server on http://{}", bind);

    HttpServer::new(move || {
        App::new()
            .data(pool.clone())
            .service(web::scope("/auth").configure(auth::config))
            .service(web::scope("/patients").configure(patients::config))
            .service(web::scope("/appointments").configure(appointments::config))
            .service(web::scope("/consultations").configure(consultations::config))
            .service(web::scope("/clinics").configure(clinics::config))
            .service(web::scope("/users").configure(users::config))
            .service(web::scope("/audit").configure(audit::config))
            .service(web::scope("/dashboard").configure(dashboard::config))
            .service(web::scope("/settings").configure(settings::config))
    })
    .bind(bind)?
    .run()
    .await
}
