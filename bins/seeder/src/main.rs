//! Database seeder for Sabliere development and testing.
//!
//! Seeds a handful of drivers, their trucks, and regular clients so a
//! fresh local database can run the weighbridge flow end to end.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use sabliere_db::entities::{clients, drivers, trucks};
use uuid::Uuid;

/// Fixed IDs so re-running the seeder is a no-op.
const DRIVER_IDS: [u128; 3] = [0x11, 0x12, 0x13];
const TRUCK_IDS: [u128; 4] = [0x21, 0x22, 0x23, 0x24];
const CLIENT_IDS: [u128; 3] = [0x31, 0x32, 0x33];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = sabliere_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding drivers...");
    seed_drivers(&db).await;

    println!("Seeding trucks...");
    seed_trucks(&db).await;

    println!("Seeding clients...");
    seed_clients(&db).await;

    println!("Seeding complete!");
}

/// Seeds the demo drivers.
async fn seed_drivers(db: &DatabaseConnection) {
    let data: [(u128, &str, &str); 3] = [
        (DRIVER_IDS[0], "Hassan Alami", "+212 661 000 001"),
        (DRIVER_IDS[1], "Youssef Berrada", "+212 661 000 002"),
        (DRIVER_IDS[2], "Karim Tazi", "+212 661 000 003"),
    ];

    let mut inserted = 0;
    for (id, name, phone) in data {
        let id = Uuid::from_u128(id);
        if drivers::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            continue;
        }

        let driver = drivers::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            phone: Set(Some(phone.to_string())),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = driver.insert(db).await {
            eprintln!("Failed to insert driver {name}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} drivers");
}

/// Seeds the demo trucks, owned by the seeded drivers.
async fn seed_trucks(db: &DatabaseConnection) {
    let data: [(u128, &str, Decimal, u128); 4] = [
        (TRUCK_IDS[0], "12345-A-6", dec!(10), DRIVER_IDS[0]),
        (TRUCK_IDS[1], "67890-B-6", dec!(12.5), DRIVER_IDS[0]),
        (TRUCK_IDS[2], "24680-A-1", dec!(8), DRIVER_IDS[1]),
        (TRUCK_IDS[3], "13579-C-7", dec!(15), DRIVER_IDS[2]),
    ];

    let mut inserted = 0;
    for (id, plate, empty_weight, driver_id) in data {
        let id = Uuid::from_u128(id);
        if trucks::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            continue;
        }

        let truck = trucks::ActiveModel {
            id: Set(id),
            license_plate: Set(plate.to_string()),
            empty_weight: Set(empty_weight),
            driver_id: Set(Uuid::from_u128(driver_id)),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = truck.insert(db).await {
            eprintln!("Failed to insert truck {plate}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} trucks");
}

/// Seeds the demo clients, with and without an email on file.
async fn seed_clients(db: &DatabaseConnection) {
    let data: [(u128, &str, Option<&str>, Option<&str>); 3] = [
        (
            CLIENT_IDS[0],
            "Omar Benjelloun",
            Some("Atlas BTP"),
            Some("omar@atlasbtp.example"),
        ),
        (
            CLIENT_IDS[1],
            "Salma Idrissi",
            Some("Idrissi Construction"),
            Some("salma@idrissi.example"),
        ),
        (CLIENT_IDS[2], "Rachid Amrani", None, None),
    ];

    let mut inserted = 0;
    for (id, name, company, email) in data {
        let id = Uuid::from_u128(id);
        if clients::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            continue;
        }

        let client = clients::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            company: Set(company.map(ToString::to_string)),
            phone: Set(None),
            email: Set(email.map(ToString::to_string)),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = client.insert(db).await {
            eprintln!("Failed to insert client {name}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} clients");
}
