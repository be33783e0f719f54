//! `SeaORM` entity definitions.

pub mod clients;
pub mod drivers;
pub mod payments;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod trucks;
