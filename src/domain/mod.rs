//! Domain layer - pure types with no I/O.

pub mod checkout;
pub mod foundation;
