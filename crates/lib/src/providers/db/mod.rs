pub mod corpus;
pub mod sqlite;
