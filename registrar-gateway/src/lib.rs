//! HTTP gateway for the registrar CRUD service.
//!
//! Exposes professor and course resources over in-memory stores: five
//! handlers per entity (create, filtered list, get, partial update, delete)
//! plus root and health routes.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod routes;
pub mod store;
