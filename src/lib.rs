//! Task-management REST API: CRUD over a `tasks` collection behind
//! bearer-token authentication, plus status-priority sorting.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
