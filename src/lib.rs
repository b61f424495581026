#![doc = "The `kanboard` library crate."]
#![doc = ""]
#![doc = "A Kanban-board REST API: users own boards, boards contain ordered"]
#![doc = "columns, columns contain ordered tasks. The crate is organized as"]
#![doc = "thin HTTP handlers (`routes`) over a repository layer (`repo`)"]
#![doc = "whose mutations all pass through the ownership resolvers"]
#![doc = "(`ownership`) walking the chain Task -> Column -> Board -> User."]

pub mod auth;
pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod ownership;
pub mod repo;
pub mod routes;
