// lib.rs - Plant selection screen core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod model;
pub mod pager;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect, NavigateOperation, PlantSaveParams, PLANT_SAVE_ROUTE};
pub use catalog::PlantCatalog;
pub use config::{ApiConfig, ConfigError};
pub use crux_core::{render::Render, App as CruxApp};
pub use error::{AppError, AppResult, ErrorKind};
pub use event::Event;
pub use model::{
    EnvironmentKey, EnvironmentTag, Frequency, Model, Plant, PlantId, SessionId,
    ALL_ENVIRONMENTS_KEY, ALL_ENVIRONMENTS_TITLE,
};
pub use pager::{PageRequest, Pager, SkipReason};
pub use view::{
    EnvironmentButtonView, PlantCardView, ScreenView, UserFacingError, ViewModel, HEADING,
    SUBHEADING,
};
