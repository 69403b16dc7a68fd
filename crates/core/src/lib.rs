//! Domain types, errors and input validation shared by the store and the
//! HTTP layer. Nothing in here touches the database or the network.

pub mod accounts;
pub mod forms;
pub mod notes;
pub mod types;
