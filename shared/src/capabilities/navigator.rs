use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::model::Plant;

/// Route the shell opens to save a chosen plant.
pub const PLANT_SAVE_ROUTE: &str = "PlantSave";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlantSaveParams {
    pub plant: Plant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum NavigateOperation {
    NavigateTo {
        route: String,
        params: PlantSaveParams,
    },
}

impl Operation for NavigateOperation {
    type Output = ();
}

/// Asks the shell's navigator to open another screen. Fire-and-forget.
pub struct Navigator<E> {
    context: CapabilityContext<NavigateOperation, E>,
}

impl<Ev> Capability<Ev> for Navigator<Ev> {
    type Operation = NavigateOperation;
    type MappedSelf<MappedEv> = Navigator<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Navigator::new(self.context.map_event(f))
    }
}

impl<E> Navigator<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<NavigateOperation, E>) -> Self {
        Self { context }
    }

    pub fn navigate_to(&self, route: impl Into<String>, plant: Plant) {
        let operation = NavigateOperation::NavigateTo {
            route: route.into(),
            params: PlantSaveParams { plant },
        };

        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }
}
