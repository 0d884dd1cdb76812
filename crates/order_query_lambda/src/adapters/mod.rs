pub mod dynamodb;
#[cfg(test)]
pub(crate) mod memory_store;
pub mod order_store;
