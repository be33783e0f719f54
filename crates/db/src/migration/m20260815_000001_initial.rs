//! Initial database migration.
//!
//! Creates the yard-operations schema: drivers, trucks, clients,
//! weighbridge transactions, and payments, plus the status enums and
//! the `updated_at` trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(DRIVERS_SQL).await?;
        db.execute_unprepared(TRUCKS_SQL).await?;
        db.execute_unprepared(CLIENTS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r"
            DROP TABLE IF EXISTS payments;
            DROP TABLE IF EXISTS transactions;
            DROP TABLE IF EXISTS clients;
            DROP TABLE IF EXISTS trucks;
            DROP TABLE IF EXISTS drivers;
            DROP FUNCTION IF EXISTS set_updated_at;
            DROP TYPE IF EXISTS payment_status;
            DROP TYPE IF EXISTS payment_method;
            DROP TYPE IF EXISTS transaction_status;
            ",
        )
        .await?;

        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE transaction_status AS ENUM ('PENDING', 'IN_PROGRESS', 'COMPLETED', 'CANCELLED');
CREATE TYPE payment_method AS ENUM ('CASH', 'BANK_TRANSFER');
CREATE TYPE payment_status AS ENUM ('PENDING', 'COMPLETED', 'FAILED');
";

const DRIVERS_SQL: &str = r"
CREATE TABLE drivers (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    phone TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

// driver_id is ON DELETE RESTRICT: a driver who still owns trucks
// cannot be deleted, so weight calculations never lose their truck.
const TRUCKS_SQL: &str = r"
CREATE TABLE trucks (
    id UUID PRIMARY KEY,
    license_plate TEXT NOT NULL UNIQUE CHECK (license_plate <> ''),
    empty_weight NUMERIC(10, 3) NOT NULL CHECK (empty_weight > 0),
    driver_id UUID NOT NULL REFERENCES drivers(id) ON DELETE RESTRICT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_trucks_driver ON trucks(driver_id);
";

const CLIENTS_SQL: &str = r"
CREATE TABLE clients (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL CHECK (name <> ''),
    company TEXT,
    phone TEXT,
    email TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    truck_id UUID NOT NULL REFERENCES trucks(id) ON DELETE RESTRICT,
    client_id UUID NOT NULL REFERENCES clients(id) ON DELETE RESTRICT,
    entry_time TIMESTAMP NOT NULL,
    exit_time TIMESTAMP,
    total_weight NUMERIC(10, 3),
    sand_weight NUMERIC(10, 3),
    status transaction_status NOT NULL DEFAULT 'PENDING',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (exit_time IS NULL OR exit_time >= entry_time)
);

CREATE INDEX idx_transactions_truck ON transactions(truck_id);
CREATE INDEX idx_transactions_client ON transactions(client_id);
CREATE INDEX idx_transactions_status ON transactions(status);
CREATE INDEX idx_transactions_entry_time ON transactions(entry_time);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY,
    transaction_id UUID NOT NULL UNIQUE REFERENCES transactions(id) ON DELETE RESTRICT,
    amount NUMERIC(12, 2) NOT NULL CHECK (amount >= 0),
    method payment_method NOT NULL,
    status payment_status NOT NULL DEFAULT 'PENDING',
    bank_reference TEXT,
    received_amount NUMERIC(12, 2),
    change_due NUMERIC(12, 2),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (method <> 'BANK_TRANSFER' OR bank_reference IS NOT NULL)
);
";

const TRIGGERS_SQL: &str = r"
CREATE FUNCTION set_updated_at() RETURNS trigger AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER drivers_updated_at BEFORE UPDATE ON drivers
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trucks_updated_at BEFORE UPDATE ON trucks
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER clients_updated_at BEFORE UPDATE ON clients
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER transactions_updated_at BEFORE UPDATE ON transactions
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";
