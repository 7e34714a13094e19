use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::model::{EnvironmentKey, EnvironmentTag, Plant, PlantId, SessionId};
use crate::pager::PageRequest;

pub type EnvironmentsResult = crux_http::Result<crux_http::Response<Vec<EnvironmentTag>>>;
pub type PlantsPageResult = crux_http::Result<crux_http::Response<Vec<Plant>>>;

#[derive(Serialize, Deserialize, Debug)]
pub enum Event {
    // Shell -> core
    ScreenMounted,
    ScreenUnmounted,
    Configure(ApiConfig),
    EnvironmentSelected { key: EnvironmentKey },
    EndReached { distance_from_end: f64 },
    PlantSelected { id: PlantId },
    RetryRequested,
    DismissError,

    // Capability responses
    #[serde(skip)]
    EnvironmentsLoaded {
        session: SessionId,
        result: Box<EnvironmentsResult>,
    },
    #[serde(skip)]
    PlantsPageLoaded {
        session: SessionId,
        request: PageRequest,
        result: Box<PlantsPageResult>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ScreenMounted => "screen_mounted",
            Self::ScreenUnmounted => "screen_unmounted",
            Self::Configure(_) => "configure",
            Self::EnvironmentSelected { .. } => "environment_selected",
            Self::EndReached { .. } => "end_reached",
            Self::PlantSelected { .. } => "plant_selected",
            Self::RetryRequested => "retry_requested",
            Self::DismissError => "dismiss_error",
            Self::EnvironmentsLoaded { .. } => "environments_loaded",
            Self::PlantsPageLoaded { .. } => "plants_page_loaded",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::EnvironmentSelected { .. }
                | Self::EndReached { .. }
                | Self::PlantSelected { .. }
                | Self::RetryRequested
                | Self::DismissError
        )
    }
}
