use tasklane::{Event, Tag};

tasklane::events! {
    /// Events used by the macro tests.
    #[derive(Debug, Clone, PartialEq)]
    pub enum AppEvent {
        Ping(i32, i32),
        Scale(f32, i32),
        Tick,
        ConfigLoaded(String),
    }
}

#[derive(Default)]
struct OnlyPing;

impl AppEventHandler for OnlyPing {
    fn on_ping(&self, a: &i32, b: &i32) -> bool {
        a + b == 4
    }
}

struct OnlyStop;

impl AppEventHandler for OnlyStop {
    fn on_stop(&self) -> bool {
        true
    }
}

#[test]
fn test_tags_follow_declaration_order() {
    assert_eq!(AppEvent::STOP_TAG, Tag::STOP);
    assert_eq!(AppEvent::PING_TAG, Tag::new(1));
    assert_eq!(AppEvent::SCALE_TAG, Tag::new(2));
    assert_eq!(AppEvent::TICK_TAG, Tag::new(3));
    assert_eq!(AppEvent::CONFIG_LOADED_TAG, Tag::new(4));

    assert_eq!(AppEvent::Ping(0, 0).tag(), AppEvent::PING_TAG);
    assert_eq!(AppEvent::Tick.tag().get(), 3);
}

#[test]
fn test_names_and_stop_event() {
    assert_eq!(AppEvent::Scale(1.5, 2).name(), "Scale");
    assert_eq!(AppEvent::ConfigLoaded(String::new()).name(), "ConfigLoaded");

    let stop = AppEvent::stop();
    assert_eq!(stop, AppEvent::Stop);
    assert_eq!(stop.name(), "Stop");
    assert!(stop.is_stop());
    assert!(!AppEvent::Tick.is_stop());
}

#[test]
fn test_dispatch_calls_matching_handler() {
    let handler = OnlyPing;

    assert!(AppEvent::Ping(3, 1).dispatch(&handler));
    assert!(!AppEvent::Ping(3, 2).dispatch(&handler));
    assert!(
        !AppEvent::Tick.dispatch(&handler),
        "Handlers not overridden report unhandled"
    );
    assert!(!AppEvent::stop().dispatch(&handler));
}

#[test]
fn test_dispatch_through_trait_object() {
    let handlers: Vec<Box<dyn AppEventHandler>> = vec![Box::new(OnlyPing), Box::new(OnlyStop)];
    let handled: Vec<bool> = handlers
        .iter()
        .map(|h| AppEvent::Stop.dispatch(h.as_ref()))
        .collect();

    assert_eq!(handled, vec![false, true]);
}

#[test]
fn test_user_attributes_are_kept() {
    let event = AppEvent::ConfigLoaded("app.toml".to_owned());

    assert_eq!(event.clone(), event);
    assert_eq!(format!("{event:?}"), "ConfigLoaded(\"app.toml\")");
}
