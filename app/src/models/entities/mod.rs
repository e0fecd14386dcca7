//! SeaORM entities

pub mod todos;
