//! Principal Core
//!
//! Value model, attribute schemas and provider traits shared by the
//! service principal lookup provider and CLI

pub mod provider;
pub mod resource;
pub mod schema;
