pub use order_query_core::{contract, read_plan};
