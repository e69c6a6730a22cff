pub mod config;
pub mod logging;

pub mod downloader;
pub mod engine;
pub mod fetch_head;
pub mod progress;
pub mod request;
pub mod segmenter;
pub mod storage;
pub mod url_model;
