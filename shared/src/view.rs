use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::model::{EnvironmentKey, Plant, PlantId};

pub const HEADING: &str = "Em qual ambiente";
pub const SUBHEADING: &str = "você quer colocar sua planta?";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvironmentButtonView {
    pub key: EnvironmentKey,
    pub title: String,
    pub active: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlantCardView {
    pub id: PlantId,
    pub name: String,
    pub photo: String,
}

impl From<&Plant> for PlantCardView {
    fn from(plant: &Plant) -> Self {
        Self {
            id: plant.id,
            name: plant.name.clone(),
            photo: plant.photo.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScreenView {
    /// Not mounted.
    Idle,
    Loading,
    /// The first page could not be loaded; nothing to show but the error.
    Failed {
        message: String,
        is_retryable: bool,
    },
    Ready {
        heading: String,
        subheading: String,
        environments: Vec<EnvironmentButtonView>,
        plants: Vec<PlantCardView>,
        is_loading_more: bool,
        has_more: bool,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserFacingError {
    pub message: String,
    pub is_retryable: bool,
    pub error_code: String,
}

impl From<&AppError> for UserFacingError {
    fn from(e: &AppError) -> Self {
        Self {
            message: e.user_facing_message(),
            is_retryable: e.is_retryable(),
            error_code: e.code().to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub screen: ScreenView,
    pub error: Option<UserFacingError>,
}
