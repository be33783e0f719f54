//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Business rules live in `sabliere-core`; repositories
//! run them before touching the database.

pub mod client;
pub mod driver;
pub mod transaction;
pub mod truck;

pub use client::{ClientError, ClientRepository, CreateClientInput};
pub use driver::{CreateDriverInput, DriverError, DriverRepository};
pub use transaction::{
    CreateTransactionInput, ReceiptRecord, RecordPaymentInput, TransactionError,
    TransactionRepository, WeighOutInput,
};
pub use truck::{CreateTruckInput, TruckError, TruckRepository, UpdateTruckInput};
