//! Translation of Esri XML workspace definitions into PostgreSQL/PostGIS DDL.
//!
//! [`workspace`] decodes the XML, [`model`] turns feature classes into tables,
//! [`generator`] renders them as SQL and [`import`] drives the external services that
//! create and fill the tables.

pub mod cli;
pub mod error;
pub mod generator;
pub mod import;
pub mod model;
pub mod pipeline;
pub mod workspace;

pub use error::Error;
