pub mod collate;
pub mod validation;
