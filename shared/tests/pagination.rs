mod common;

use common::*;
use shared::{ApiConfig, EnvironmentKey, ErrorKind, Event, Model, ScreenView};

fn page_of(url: &str) -> &str {
    url.split("_page=")
        .nth(1)
        .and_then(|rest| rest.split('&').next())
        .expect("page parameter")
}

fn loaded_ids(model: &Model) -> Vec<u64> {
    model.catalog.plants().iter().map(|p| p.id.0).collect()
}

#[test]
fn second_page_appends_to_the_grid() {
    let app = Tester::default();
    let mut model = Model::default();
    mount_loaded(&app, &mut model, page(1, 8));

    let mut requests = end_reached(&app, &mut model);
    assert_eq!(requests.len(), 1);
    assert_eq!(page_of(&requests[0].operation.url), "2");
    assert!(model.pager.is_page_loading());

    match app.view(&model).screen {
        ScreenView::Ready {
            is_loading_more,
            plants,
            ..
        } => {
            assert!(is_loading_more);
            assert_eq!(plants.len(), 8);
        }
        other => panic!("unexpected screen {other:?}"),
    }

    respond(&app, &mut model, &mut requests[0], ok_json(&page(9, 5)));

    assert_eq!(loaded_ids(&model), (1..=13).collect::<Vec<_>>());
    assert!(!model.pager.is_page_loading());
    assert!(model.pager.is_exhausted(), "five rows is a short page");
}

#[test]
fn filter_survives_pagination() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut first = page(1, 8);
    first[1] = plant(2, &["kitchen"]);
    mount_loaded(&app, &mut model, first);

    app.update(
        Event::EnvironmentSelected {
            key: EnvironmentKey::new("kitchen"),
        },
        &mut model,
    );

    let mut second = page(9, 8);
    second[0] = plant(9, &["kitchen", "living_room"]);
    second[7] = plant(16, &["kitchen"]);
    let mut requests = end_reached(&app, &mut model);
    respond(&app, &mut model, &mut requests[0], ok_json(&second));

    let visible: Vec<u64> = model.catalog.visible().map(|p| p.id.0).collect();
    assert_eq!(visible, vec![2, 9, 16]);
    assert_eq!(model.catalog.len(), 16);
}

#[test]
fn duplicate_end_reached_issues_one_request() {
    let app = Tester::default();
    let mut model = Model::default();
    mount_loaded(&app, &mut model, page(1, 8));

    assert_eq!(end_reached(&app, &mut model).len(), 1);
    assert!(end_reached(&app, &mut model).is_empty());
    assert!(end_reached(&app, &mut model).is_empty());
}

#[test]
fn end_reached_during_initial_load_is_ignored() {
    let app = Tester::default();
    let mut model = Model::default();
    let _requests = mount(&app, &mut model);

    assert!(end_reached(&app, &mut model).is_empty());
    assert_eq!(model.pager.current_page(), 1);
}

#[test]
fn end_reached_below_threshold_is_ignored() {
    let app = Tester::default();
    let mut model = Model::default();
    mount_loaded(&app, &mut model, page(1, 8));

    for distance in [0.0, 0.5, -3.0, f64::NAN] {
        let update = app.update(
            Event::EndReached {
                distance_from_end: distance,
            },
            &mut model,
        );
        assert!(update.effects.is_empty(), "distance {distance}");
    }
    assert_eq!(model.pager.current_page(), 1);

    let update = app.update(
        Event::EndReached {
            distance_from_end: 1.0,
        },
        &mut model,
    );
    assert_eq!(http_requests(update).len(), 1);
}

#[test]
fn empty_page_ends_pagination() {
    let app = Tester::default();
    let mut model = Model::default();
    mount_loaded(&app, &mut model, page(1, 8));

    let mut requests = end_reached(&app, &mut model);
    respond(&app, &mut model, &mut requests[0], ok_json(&page(9, 8)));
    assert!(!model.pager.is_exhausted());

    let mut requests = end_reached(&app, &mut model);
    assert_eq!(page_of(&requests[0].operation.url), "3");
    respond(&app, &mut model, &mut requests[0], ok_json(&page(0, 0)));

    assert!(model.pager.is_exhausted());
    assert!(!model.pager.is_page_loading());
    assert_eq!(model.catalog.len(), 16);
    assert!(end_reached(&app, &mut model).is_empty());
    assert_eq!(model.pager.current_page(), 3);

    match app.view(&model).screen {
        ScreenView::Ready { has_more, .. } => assert!(!has_more),
        other => panic!("unexpected screen {other:?}"),
    }
}

#[test]
fn repeated_rows_are_not_duplicated() {
    let app = Tester::default();
    let mut model = Model::default();
    mount_loaded(&app, &mut model, page(1, 8));

    let mut requests = end_reached(&app, &mut model);
    respond(&app, &mut model, &mut requests[0], ok_json(&page(5, 8)));

    assert_eq!(loaded_ids(&model), (1..=12).collect::<Vec<_>>());
}

#[test]
fn failed_page_is_requested_again() {
    let app = Tester::default();
    let mut model = Model::default();
    mount_loaded(&app, &mut model, page(1, 8));

    let mut requests = end_reached(&app, &mut model);
    respond(&app, &mut model, &mut requests[0], server_error());

    assert!(!model.pager.is_page_loading());
    assert_eq!(model.catalog.len(), 8, "loaded plants are kept");
    let error = app.view(&model).error.expect("error surfaced");
    assert_eq!(error.error_code, ErrorKind::ServerError.code());
    assert_eq!(
        model
            .active_error
            .as_ref()
            .and_then(|e| e.context.get("page"))
            .map(String::as_str),
        Some("2")
    );

    let mut requests = end_reached(&app, &mut model);
    assert_eq!(requests.len(), 1);
    assert_eq!(page_of(&requests[0].operation.url), "2");

    respond(&app, &mut model, &mut requests[0], ok_json(&page(9, 8)));
    assert_eq!(model.catalog.len(), 16);
    assert!(app.view(&model).error.is_none());

    let requests = end_reached(&app, &mut model);
    assert_eq!(page_of(&requests[0].operation.url), "3");
}

#[test]
fn retry_requests_the_failed_page() {
    let app = Tester::default();
    let mut model = Model::default();
    mount_loaded(&app, &mut model, page(1, 8));

    let mut requests = end_reached(&app, &mut model);
    respond(&app, &mut model, &mut requests[0], server_error());

    let update = app.update(Event::RetryRequested, &mut model);
    assert!(renders(&update));
    let requests = http_requests(update);
    assert_eq!(requests.len(), 1);
    assert_eq!(page_of(&requests[0].operation.url), "2");
    assert!(app.view(&model).error.is_none());
}

#[test]
fn retry_without_failure_does_nothing_over_the_network() {
    let app = Tester::default();
    let mut model = Model::default();
    mount_loaded(&app, &mut model, page(1, 8));

    let update = app.update(Event::RetryRequested, &mut model);
    assert!(http_requests(update).is_empty());
}

#[test]
fn page_response_after_unmount_is_dropped() {
    let app = Tester::default();
    let mut model = Model::default();
    mount_loaded(&app, &mut model, page(1, 8));

    let mut requests = end_reached(&app, &mut model);
    app.update(Event::ScreenUnmounted, &mut model);
    let updates = respond(&app, &mut model, &mut requests[0], ok_json(&page(9, 8)));

    assert!(updates.iter().all(|u| u.effects.is_empty()));
    assert!(end_reached(&app, &mut model).is_empty());
}

fn limit_of(url: &str) -> &str {
    url.split("_limit=")
        .nth(1)
        .and_then(|rest| rest.split('&').next())
        .expect("limit parameter")
}

fn configure_page_size(app: &Tester, model: &mut Model, page_size: u32) {
    let config = ApiConfig {
        page_size,
        ..ApiConfig::default()
    };
    app.update(Event::Configure(config), model);
}

#[test]
fn page_size_is_fixed_for_the_whole_session() {
    let app = Tester::default();
    let mut model = Model::default();
    configure_page_size(&app, &mut model, 4);
    mount_loaded(&app, &mut model, page(1, 4));

    configure_page_size(&app, &mut model, 8);

    let mut requests = end_reached(&app, &mut model);
    assert_eq!(page_of(&requests[0].operation.url), "2");
    assert_eq!(limit_of(&requests[0].operation.url), "4");

    respond(&app, &mut model, &mut requests[0], ok_json(&page(5, 4)));
    assert!(!model.pager.is_exhausted(), "a full page of four is not short");
    assert_eq!(loaded_ids(&model), (1..=8).collect::<Vec<_>>());

    app.update(Event::ScreenUnmounted, &mut model);
    let (_, plants) = mount(&app, &mut model);
    assert_eq!(limit_of(&plants.operation.url), "8");
}

#[test]
fn end_reached_on_failed_first_page_shows_loading() {
    let app = Tester::default();
    let mut model = Model::default();
    let (mut environments, mut plants) = mount(&app, &mut model);
    respond(&app, &mut model, &mut environments, ok_json(&tags()));
    respond(&app, &mut model, &mut plants, server_error());
    assert!(matches!(app.view(&model).screen, ScreenView::Failed { .. }));

    let mut requests = end_reached(&app, &mut model);
    assert_eq!(requests.len(), 1);
    assert_eq!(page_of(&requests[0].operation.url), "1");
    assert_eq!(app.view(&model).screen, ScreenView::Loading);

    respond(&app, &mut model, &mut requests[0], ok_json(&page(1, 8)));
    match app.view(&model).screen {
        ScreenView::Ready { plants, .. } => assert_eq!(plants.len(), 8),
        other => panic!("unexpected screen {other:?}"),
    }
}
