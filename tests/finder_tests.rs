mod support;

use farewatch::application::NotificationStatus;
use farewatch::error::{Error, NotifyError, StoreError};
use farewatch::port::FareLookupError;
use farewatch::testkit::domain::{iata, search, table, today};
use farewatch::testkit::fares::{Scripted, ScriptedFares};
use farewatch::testkit::notifier::RecordingSender;
use farewatch::testkit::store::MemoryStore;
use rust_decimal_macros::dec;

fn stored(store: &MemoryStore, code: &str) -> Option<rust_decimal::Decimal> {
    store
        .snapshot()
        .get(&iata(code))
        .expect("destination present")
        .lowest_price()
}

fn scenario_fares() -> ScriptedFares {
    ScriptedFares::new()
        .route(
            "LON",
            [
                Scripted::Price(dec!(150)),
                Scripted::Price(dec!(95)),
                Scripted::Price(dec!(120)),
            ],
        )
        .route("PAR", [Scripted::Price(dec!(200))])
        .route("TOK", [Scripted::Price(dec!(90)), Scripted::Price(dec!(85))])
        .route(
            "NYC",
            [
                Scripted::Error(FareLookupError::Timeout),
                Scripted::Error(FareLookupError::Http { status: 500 }),
                Scripted::Error(FareLookupError::Api("quota exceeded".into())),
            ],
        )
}

fn scenario_store() -> MemoryStore {
    MemoryStore::new(table(&[
        ("London", "LON", Some(dec!(100))),
        ("Paris", "PAR", None),
        ("Tokyo", "TOK", Some(dec!(80))),
        ("New York", "NYC", Some(dec!(300))),
    ]))
}

#[tokio::test]
async fn run_updates_only_improved_destinations() {
    let fares = scenario_fares();
    let store = scenario_store();
    let sender = RecordingSender::new();
    let mut finder = support::finder(search(&["ASU"], 3), &fares, &store, &sender);

    let report = finder.run(today()).await.expect("run completes");

    assert_eq!(stored(&store, "LON"), Some(dec!(95)));
    assert_eq!(stored(&store, "PAR"), Some(dec!(200)));
    assert_eq!(stored(&store, "TOK"), Some(dec!(80)));
    assert_eq!(stored(&store, "NYC"), Some(dec!(300)));
    assert_eq!(store.saves(), 1);

    assert_eq!(report.improved(), 2);
    assert_eq!(report.trials(), 12);
    // PAR: 2 exhausted, TOK: 1 exhausted, NYC: 3 errors.
    assert_eq!(report.skipped(), 6);
    assert_eq!(report.get("NYC").unwrap().skipped, 3);
    assert_eq!(
        report.get("TOK").unwrap().notification,
        NotificationStatus::NotNeeded
    );
    assert_eq!(
        report.get("NYC").unwrap().notification,
        NotificationStatus::NotNeeded
    );
}

#[tokio::test]
async fn alerts_name_the_winning_fare_and_dates() {
    let fares = scenario_fares();
    let store = scenario_store();
    let sender = RecordingSender::new();
    let mut finder = support::finder(search(&["ASU"], 3), &fares, &store, &sender);

    finder.run(today()).await.expect("run completes");

    let messages = sender.messages();
    assert_eq!(messages.len(), 2);

    let london = messages
        .iter()
        .find(|m| m.contains("London-LON"))
        .expect("London alert");
    let winning = &fares.requests_to("LON")[1];
    assert!(london.contains("$95"), "{london}");
    assert!(london.contains(&winning.departure_date.to_string()), "{london}");
    assert!(london.contains(&winning.return_date.to_string()), "{london}");
    assert!(london.contains("previous lowest price of $100.00"), "{london}");

    let paris = messages
        .iter()
        .find(|m| m.contains("Paris-PAR"))
        .expect("Paris alert");
    assert!(paris.contains("$200"), "{paris}");
    assert!(paris.contains("first recorded price"), "{paris}");
}

#[tokio::test]
async fn lookup_failure_does_not_stop_later_trials() {
    let fares = ScriptedFares::new()
        .error(FareLookupError::Transport("connection reset".into()))
        .price(dec!(70));
    let store = MemoryStore::new(table(&[("Madrid", "MAD", None)]));
    let sender = RecordingSender::new();
    let mut finder = support::finder(search(&["ASU"], 2), &fares, &store, &sender);

    let report = finder.run(today()).await.expect("run completes");

    assert_eq!(fares.requests().len(), 2);
    assert_eq!(report.skipped(), 1);
    assert_eq!(stored(&store, "MAD"), Some(dec!(70)));
}

#[tokio::test]
async fn no_results_leave_the_row_untouched() {
    let fares = ScriptedFares::new();
    let store = MemoryStore::new(table(&[("Rome", "FCO", Some(dec!(450)))]));
    let sender = RecordingSender::new();
    let mut finder = support::finder(search(&["ASU", "EZE"], 3), &fares, &store, &sender);

    let report = finder.run(today()).await.expect("run completes");

    assert_eq!(report.trials(), 6);
    assert_eq!(report.skipped(), 6);
    assert_eq!(stored(&store, "FCO"), Some(dec!(450)));
    assert_eq!(store.snapshot(), table(&[("Rome", "FCO", Some(dec!(450)))]));
    assert_eq!(sender.attempts(), 0);
}

#[tokio::test]
async fn minimum_is_taken_across_origins() {
    let fares = ScriptedFares::new()
        .price(dec!(500))
        .price(dec!(480))
        .price(dec!(410))
        .price(dec!(430));
    let store = MemoryStore::new(table(&[("Lima", "LIM", Some(dec!(450)))]));
    let sender = RecordingSender::new();
    let mut finder = support::finder(search(&["ASU", "EZE"], 2), &fares, &store, &sender);

    let report = finder.run(today()).await.expect("run completes");

    let best = report.get("LIM").unwrap().best.clone().unwrap();
    assert_eq!(best.price, dec!(410));
    assert_eq!(best.origin, iata("EZE"));
    assert_eq!(stored(&store, "LIM"), Some(dec!(410)));
    assert_eq!(sender.messages().len(), 1);
    assert!(sender.messages()[0].contains("from EZE"));
}

#[tokio::test]
async fn stored_price_never_increases_over_repeated_runs() {
    let store = MemoryStore::new(table(&[("Berlin", "BER", None)]));
    let sender = RecordingSender::new();
    let mut observed = Vec::new();

    for prices in [[dec!(300), dec!(280)], [dec!(350), dec!(290)], [dec!(260), dec!(275)]] {
        let fares = ScriptedFares::new().price(prices[0]).price(prices[1]);
        let mut finder = support::finder(search(&["ASU"], 2), &fares, &store, &sender);
        finder.run(today()).await.expect("run completes");
        observed.push(stored(&store, "BER").unwrap());
    }

    assert_eq!(observed, vec![dec!(280), dec!(280), dec!(260)]);
    // One alert per improving run, none for the run that found nothing cheaper.
    assert_eq!(sender.messages().len(), 2);
}

#[tokio::test]
async fn failed_alert_keeps_saved_price_and_run_succeeds() {
    let fares = ScriptedFares::new().price(dec!(60));
    let store = MemoryStore::new(table(&[("Oslo", "OSL", Some(dec!(90)))]));
    let sender = RecordingSender::failing(NotifyError::Rejected {
        status: 400,
        message: "invalid To number".into(),
    });
    let mut finder = support::finder(search(&["ASU"], 1), &fares, &store, &sender);

    let report = finder.run(today()).await.expect("run completes");

    assert_eq!(stored(&store, "OSL"), Some(dec!(60)));
    assert_eq!(sender.attempts(), 1);
    assert!(matches!(
        report.get("OSL").unwrap().notification,
        NotificationStatus::Failed(_)
    ));
}

#[tokio::test]
async fn save_failure_is_a_store_error_and_sends_nothing() {
    let fares = ScriptedFares::new().price(dec!(60));
    let store = MemoryStore::new(table(&[("Oslo", "OSL", Some(dec!(90)))])).failing_save();
    let sender = RecordingSender::new();
    let mut finder = support::finder(search(&["ASU"], 1), &fares, &store, &sender);

    let err = finder.run(today()).await.unwrap_err();

    assert!(matches!(err, Error::Store(StoreError::Write { .. })));
    assert_eq!(sender.attempts(), 0);
}

#[tokio::test]
async fn load_failure_aborts_before_any_lookup() {
    let fares = ScriptedFares::new().price(dec!(60));
    let store = MemoryStore::new(table(&[("Oslo", "OSL", None)])).failing_load();
    let sender = RecordingSender::new();
    let mut finder = support::finder(search(&["ASU"], 1), &fares, &store, &sender);

    let err = finder.run(today()).await.unwrap_err();

    assert!(matches!(err, Error::Store(StoreError::Read { .. })));
    assert!(fares.requests().is_empty());
}

#[tokio::test]
async fn every_request_stays_inside_the_search_bounds() {
    let fares = ScriptedFares::new();
    let store = MemoryStore::new(table(&[("Lima", "LIM", None), ("Quito", "UIO", None)]));
    let sender = RecordingSender::new();
    let params = search(&["ASU", "EZE"], 5);
    let mut finder = support::finder(params.clone(), &fares, &store, &sender);

    finder.run(today()).await.expect("run completes");

    let requests = fares.requests();
    assert_eq!(requests.len(), 2 * 2 * 5);
    for request in requests {
        let offset = (request.departure_date - today()).num_days();
        let length = (request.return_date - request.departure_date).num_days();
        assert!(params.window_days.contains(offset as u32), "{request:?}");
        assert!(params.trip_days.contains(length as u32), "{request:?}");
    }
}
