//! Cost of importing a vehicle into France: VAT, CO2 and weight malus, customs
//! duty, DREAL homologation and registration fees.

pub mod core;
pub mod money;
