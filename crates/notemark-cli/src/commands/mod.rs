pub mod check;
pub mod input;
pub mod queries;
pub mod query;
pub mod tree;
