pub mod artifacts;
pub mod model;
pub mod web;
