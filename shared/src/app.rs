use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::capabilities::{environments_url, plants_page_url, Capabilities, PLANT_SAVE_ROUTE};
use crate::config::ApiConfig;
use crate::error::{AppError, AppResult, ErrorKind};
use crate::event::Event;
use crate::model::{EnvironmentTag, Model, Plant, SessionId};
use crate::pager::PageRequest;
use crate::view::{
    EnvironmentButtonView, PlantCardView, ScreenView, UserFacingError, ViewModel, HEADING,
    SUBHEADING,
};

#[derive(Default)]
pub struct App;

impl App {
    fn environments_endpoint(config: &ApiConfig) -> AppResult<Url> {
        let base = config.base_url()?;
        Ok(environments_url(&base)?)
    }

    fn plants_endpoint(config: &ApiConfig, request: PageRequest) -> AppResult<Url> {
        let base = config.base_url()?;
        Ok(plants_page_url(&base, request.page, request.limit)?)
    }

    fn fetch_environments(model: &mut Model, session: SessionId, caps: &Capabilities) {
        let url = match Self::environments_endpoint(&model.config) {
            Ok(url) => url,
            Err(error) => {
                warn!(%error, "cannot build environments request");
                model.environments_failed = true;
                model.initial_environments_pending = false;
                model.set_error(error);
                return;
            }
        };

        debug!(%url, "requesting environments");
        model.environments_loading = true;
        model.environments_failed = false;

        caps.http
            .get(url.as_str())
            .expect_json::<Vec<EnvironmentTag>>()
            .send(move |result| Event::EnvironmentsLoaded {
                session,
                result: Box::new(result),
            });
    }

    fn fetch_page(
        model: &mut Model,
        session: SessionId,
        request: PageRequest,
        caps: &Capabilities,
    ) {
        let url = match Self::plants_endpoint(&model.config, request) {
            Ok(url) => url,
            Err(error) => {
                warn!(%error, page = request.page, "cannot build plants request");
                model.pager.fail(request);
                model.set_error(error);
                return;
            }
        };

        debug!(%url, page = request.page, ticket = request.ticket, "requesting plants page");

        caps.http
            .get(url.as_str())
            .expect_json::<Vec<Plant>>()
            .send(move |result| Event::PlantsPageLoaded {
                session,
                request,
                result: Box::new(result),
            });
    }

    fn read_body<T>(result: crux_http::Result<crux_http::Response<T>>) -> AppResult<T> {
        let mut response = result.map_err(|e| AppError::from_http_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::from_http_status(u16::from(status)));
        }

        response
            .take_body()
            .ok_or_else(|| AppError::new(ErrorKind::MalformedResponse, "Response has no body"))
    }

    /// The banner goes away once nothing is left to retry.
    fn clear_error_if_recovered(model: &mut Model) {
        if !model.has_failed_fetch() {
            model.clear_error();
        }
    }

    fn build_screen(model: &Model) -> ScreenView {
        if !model.is_mounted() {
            return ScreenView::Idle;
        }

        if model.is_initial_loading() {
            return ScreenView::Loading;
        }

        if model.catalog.is_empty() && model.pager.has_failed() {
            return ScreenView::Failed {
                message: model.active_error.as_ref().map_or_else(
                    || "Unable to load plants.".to_string(),
                    AppError::user_facing_message,
                ),
                is_retryable: model
                    .active_error
                    .as_ref()
                    .map_or(true, AppError::is_retryable),
            };
        }

        let selected = model.catalog.selected();

        ScreenView::Ready {
            heading: HEADING.to_string(),
            subheading: SUBHEADING.to_string(),
            environments: model
                .environments
                .iter()
                .map(|tag| EnvironmentButtonView {
                    key: tag.key.clone(),
                    title: tag.title.clone(),
                    active: &tag.key == selected,
                })
                .collect(),
            plants: model.catalog.visible().map(PlantCardView::from).collect(),
            is_loading_more: model.pager.is_page_loading(),
            has_more: !model.pager.is_exhausted(),
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    #[instrument(skip_all, fields(event = event.name()))]
    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        if event.is_user_initiated() {
            debug!("user action");
        }

        match event {
            Event::ScreenMounted => {
                let session = model.begin_session();
                info!(session = session.0, "plant selection mounted");

                model.initial_environments_pending = true;
                Self::fetch_environments(model, session, caps);

                let request = model.pager.start(model.config.page_size);
                Self::fetch_page(model, session, request, caps);

                caps.render.render();
            }

            Event::ScreenUnmounted => {
                if let Some(session) = model.session {
                    info!(session = session.0, "plant selection unmounted");
                }
                model.end_session();
                caps.render.render();
            }

            Event::Configure(config) => match config.validate() {
                Ok(()) => {
                    let base_url = config.base_url.clone();
                    let page_size = config.page_size;
                    if model.configure(config) {
                        info!(%base_url, page_size, "api configured");
                    } else {
                        warn!(
                            %base_url,
                            page_size,
                            "configuration received while mounted; applies from the next mount"
                        );
                    }
                }
                Err(error) => {
                    warn!(%error, "rejected api configuration");
                    model.set_error(error.into());
                    caps.render.render();
                }
            },

            Event::EnvironmentSelected { key } => {
                model.catalog.select(key);
                debug!(
                    selected = %model.catalog.selected(),
                    visible = model.catalog.visible_len(),
                    total = model.catalog.len(),
                    "environment filter applied"
                );
                caps.render.render();
            }

            Event::EndReached { distance_from_end } => {
                let Some(session) = model.session else {
                    debug!("end reached while unmounted");
                    return;
                };

                match model
                    .pager
                    .request_next(distance_from_end, model.config.end_reached_min_distance)
                {
                    Ok(request) => {
                        Self::fetch_page(model, session, request, caps);
                        caps.render.render();
                    }
                    Err(reason) => {
                        debug!(?reason, distance_from_end, "end reached ignored");
                    }
                }
            }

            Event::PlantSelected { id } => match model.catalog.find(id) {
                Some(plant) => {
                    info!(plant_id = %id, "opening plant");
                    caps.navigator.navigate_to(PLANT_SAVE_ROUTE, plant.clone());
                }
                None => {
                    warn!(plant_id = %id, "selected plant is not loaded");
                }
            },

            Event::RetryRequested => {
                let Some(session) = model.session else {
                    debug!("retry while unmounted");
                    return;
                };

                model.clear_error();

                if model.environments_failed && !model.environments_loading {
                    Self::fetch_environments(model, session, caps);
                }

                if let Some(request) = model.pager.retry() {
                    Self::fetch_page(model, session, request, caps);
                }

                caps.render.render();
            }

            Event::DismissError => {
                model.clear_error();
                caps.render.render();
            }

            Event::EnvironmentsLoaded { session, result } => {
                if !model.is_current(session) {
                    debug!(session = session.0, "dropping stale environments response");
                    return;
                }

                model.environments_loading = false;
                model.initial_environments_pending = false;

                match Self::read_body(*result) {
                    Ok(tags) => {
                        info!(count = tags.len(), "environments loaded");
                        model.environments_failed = false;
                        model.set_environments(tags);
                        Self::clear_error_if_recovered(model);
                    }
                    Err(error) => {
                        warn!(%error, "environments request failed");
                        model.environments_failed = true;
                        model.set_error(error);
                    }
                }

                caps.render.render();
            }

            Event::PlantsPageLoaded {
                session,
                request,
                result,
            } => {
                if !model.is_current(session) || !model.pager.is_in_flight(request) {
                    debug!(
                        session = session.0,
                        page = request.page,
                        ticket = request.ticket,
                        "dropping stale plants response"
                    );
                    return;
                }

                match Self::read_body(*result) {
                    Ok(plants) => {
                        let rows = plants.len();
                        let added = if request.page == 1 {
                            model.catalog.replace(plants)
                        } else {
                            model.catalog.append(plants)
                        };
                        model.pager.complete(request, rows);

                        info!(
                            page = request.page,
                            rows,
                            added,
                            total = model.catalog.len(),
                            exhausted = model.pager.is_exhausted(),
                            "plants page loaded"
                        );
                        Self::clear_error_if_recovered(model);
                    }
                    Err(error) => {
                        warn!(%error, page = request.page, "plants request failed");
                        model.pager.fail(request);
                        model.set_error(error.with_context("page", request.page.to_string()));
                    }
                }

                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel {
            screen: Self::build_screen(model),
            error: model.active_error.as_ref().map(UserFacingError::from),
        }
    }
}
