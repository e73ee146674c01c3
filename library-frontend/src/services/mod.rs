pub mod catalog;
#[cfg(test)]
pub mod memory;
