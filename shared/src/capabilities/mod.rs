pub mod http;
mod navigator;

pub use self::http::{environments_url, plants_page_url, UrlError, ValidatedUrl};
pub use self::navigator::{NavigateOperation, Navigator, PlantSaveParams, PLANT_SAVE_ROUTE};

pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub http: Http<Event>,
    pub navigator: Navigator<Event>,
    pub render: Render<Event>,
}
