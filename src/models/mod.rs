pub mod order;

pub use order::{OrderIntake, OrderRecord, OrderSide, OrderSource, OrderStatus, ValidationError};
