pub mod frame_scheduler;
pub mod stream_config;
pub mod stream_controller;
pub mod stream_logger;
pub mod tick_pacer;
