use std::fmt::Display;

use tracing::log;

pub mod config_handler;
pub mod egress;
pub mod extract;
pub mod extract_service;
pub mod fixture_service;
pub mod match_service;
pub mod models;
pub mod models_external;
pub mod rest_client;
pub mod storage;
pub mod team_config;
pub mod transform_service;

pub trait LogResult<T, E: Display> {
    fn ok_log(self, msg: &str) -> Option<T>;
}

impl<T, E: Display> LogResult<T, E> for Result<T, E> {
    fn ok_log(self, msg: &str) -> Option<T> {
        match self {
            Ok(o) => Some(o),
            Err(e) => {
                log::error!("{}: {}", msg, e);
                None
            }
        }
    }
}
