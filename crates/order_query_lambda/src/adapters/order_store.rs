use crate::runtime::contract::ReadOutput;
use crate::runtime::read_plan::ReadRequest;

/// Executes a planned read against the named table, returning every page.
pub trait OrderStore {
    fn read(&self, table_name: &str, request: &ReadRequest) -> Result<ReadOutput, String>;
}
