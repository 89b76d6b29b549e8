//! Entity module - SeaORM entity definitions for the database.
//! The tracker persists a single table; the Model struct carries the data and
//! the Entity struct drives queries against it.

pub mod application;

pub use application::{
    ActiveModel as ApplicationActiveModel, ApplicationStatus, Column as ApplicationColumn,
    Entity as Application, Model as ApplicationModel,
};
