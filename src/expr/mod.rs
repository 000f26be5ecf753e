pub mod cond;
pub mod r#in;
pub mod order;

pub use cond::{Condition, Conjunction};
pub use order::Ordering;

pub(crate) use cond::{Conditions, where_methods};
pub(crate) use order::Order;
