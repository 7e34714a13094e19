#![allow(dead_code)]

use crux_core::Request;
use crux_core::testing::{AppTester, Update};
use crux_http::protocol::{HttpRequest, HttpResponse, HttpResult};

use shared::{
    App, Effect, EnvironmentKey, EnvironmentTag, Event, Frequency, Model, Plant, PlantId,
};

pub type Tester = AppTester<App, Effect>;

pub fn plant(id: u64, environments: &[&str]) -> Plant {
    Plant {
        id: PlantId(id),
        name: format!("Plant {id}"),
        about: "Grows well indoors.".into(),
        water_tips: "Water when the soil is dry.".into(),
        photo: format!("https://example.com/{id}.svg"),
        environments: environments.iter().map(|k| EnvironmentKey::new(*k)).collect(),
        frequency: Frequency {
            times: 2,
            repeat_every: "week".into(),
        },
    }
}

/// Plants `first..first + count`, every one in the living room.
pub fn page(first: u64, count: u64) -> Vec<Plant> {
    (first..first + count).map(|id| plant(id, &["living_room"])).collect()
}

pub fn tags() -> Vec<EnvironmentTag> {
    vec![
        EnvironmentTag {
            key: EnvironmentKey::new("living_room"),
            title: "Sala".into(),
        },
        EnvironmentTag {
            key: EnvironmentKey::new("kitchen"),
            title: "Cozinha".into(),
        },
    ]
}

pub fn http_requests(update: Update<Effect, Event>) -> Vec<Request<HttpRequest>> {
    update
        .effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Http(request) => Some(request),
            _ => None,
        })
        .collect()
}

pub fn renders(update: &Update<Effect, Event>) -> bool {
    update
        .effects
        .iter()
        .any(|effect| matches!(effect, Effect::Render(_)))
}

pub fn is_environments(request: &Request<HttpRequest>) -> bool {
    request.operation.url.contains("/plants_environments")
}

pub fn ok_json<T: serde::Serialize>(body: &T) -> HttpResult {
    HttpResult::Ok(HttpResponse::ok().json(body).build())
}

pub fn server_error() -> HttpResult {
    HttpResult::Ok(HttpResponse::status(500).build())
}

/// Resolves `request` and feeds the resulting events back into the app.
pub fn respond(
    app: &Tester,
    model: &mut Model,
    request: &mut Request<HttpRequest>,
    result: HttpResult,
) -> Vec<Update<Effect, Event>> {
    let update = app.resolve(request, result).expect("request resolves");
    update
        .events
        .into_iter()
        .map(|event| app.update(event, model))
        .collect()
}

/// Mounts the screen and returns the (environments, first page) requests.
pub fn mount(app: &Tester, model: &mut Model) -> (Request<HttpRequest>, Request<HttpRequest>) {
    let update = app.update(Event::ScreenMounted, model);
    let mut requests = http_requests(update);
    assert_eq!(requests.len(), 2, "mount issues both fetches");

    let position = requests
        .iter()
        .position(is_environments)
        .expect("environments request");
    let environments = requests.remove(position);
    let plants = requests.remove(0);
    (environments, plants)
}

/// Mounts and answers both fetches, the plants one with `first_page`.
pub fn mount_loaded(app: &Tester, model: &mut Model, first_page: Vec<Plant>) {
    let (mut environments, mut plants) = mount(app, model);
    respond(app, model, &mut environments, ok_json(&tags()));
    respond(app, model, &mut plants, ok_json(&first_page));
}

pub fn end_reached(app: &Tester, model: &mut Model) -> Vec<Request<HttpRequest>> {
    http_requests(app.update(
        Event::EndReached {
            distance_from_end: 10.0,
        },
        model,
    ))
}
