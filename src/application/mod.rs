// Application layer - Use cases and the refresh pipeline
pub mod change_detector;
pub mod position_repository;
pub mod position_service;
pub mod refresh_loop;
pub mod sample_feed;
pub mod scene_renderer;
pub mod table_presenter;
