// Domain layer - Core business entities
pub mod dashboard;
pub mod grid;
pub mod position;
pub mod scene;
