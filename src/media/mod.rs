pub mod records;
pub mod registrar;
pub mod resolver;
