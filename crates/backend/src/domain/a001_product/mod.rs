pub mod csv_import;
pub mod error;
pub mod filter;
pub mod repository;
pub mod row_parser;
pub mod service;
pub mod store;
pub mod validator;
