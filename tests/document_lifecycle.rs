//! End-to-end behaviour of declared transitions on a record type.

use statefield::builder::DeclarationViolation;
use statefield::{
    registry_for, transition, BuildError, FsmError, PerSourceHandler, Predicate,
    RegistrySnapshot, SetupError, Stateful, TransitionDeclaration,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex};
use std::thread;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

#[derive(Debug)]
struct Post {
    id: u32,
    status: Option<String>,
    reviewer: Option<String>,
}

statefield::record_schema! {
    Post {
        id: Column,
        status: State,
        reviewer: Column,
    }
}

fn post(id: u32, status: &str) -> Post {
    Post {
        id,
        status: Some(status.to_string()),
        reviewer: None,
    }
}

fn set_status(target: &'static str) -> impl Fn(&mut Post, ()) + Send + Sync {
    move |post: &mut Post, ()| post.status = Some(target.to_string())
}

static SUBMIT: LazyLock<TransitionDeclaration<Post>> = LazyLock::new(|| {
    transition("submit")
        .source("draft")
        .target("review")
        .handler(set_status("review"))
        .build()
        .unwrap()
});

static ARCHIVE: LazyLock<TransitionDeclaration<Post>> = LazyLock::new(|| {
    transition("archive")
        .source("published")
        .target("archived")
        .handler(set_status("archived"))
        .build()
        .unwrap()
});

static REVIEW_DONE: LazyLock<TransitionDeclaration<Post>> = LazyLock::new(|| {
    transition("review_done")
        .source("draft")
        .target("review")
        .handler(set_status("review"))
        .build()
        .unwrap()
});

static PUBLISH: LazyLock<TransitionDeclaration<Post, String, String>> = LazyLock::new(|| {
    transition("publish")
        .source(["draft", "review"])
        .target("published")
        .when(|post: &Post, _: &String| post.id > 0)
        .when(|_: &Post, reviewer: &String| !reviewer.is_empty())
        .handler(|post: &mut Post, reviewer: String| {
            post.status = Some("published".to_string());
            post.reviewer = Some(reviewer.clone());
            format!("published by {reviewer}")
        })
        .build()
        .unwrap()
});

static RETRACTIONS: AtomicUsize = AtomicUsize::new(0);

static RETRACT: LazyLock<TransitionDeclaration<Post, (), &'static str>> = LazyLock::new(|| {
    transition("retract")
        .source(["review", "published"])
        .target("draft")
        .per_source(
            PerSourceHandler::new()
                .on("review", |post: &mut Post, ()| {
                    RETRACTIONS.fetch_add(1, Ordering::SeqCst);
                    post.status = Some("draft".to_string());
                    "withdrawn from review"
                })
                .on("published", |post: &mut Post, ()| {
                    post.status = Some("draft".to_string());
                    "unpublished"
                }),
        )
        .build()
        .unwrap()
});

#[test]
fn draft_moves_to_review() {
    let mut a = post(1, "draft");
    assert!(SUBMIT.on(&mut a).unwrap().can_proceed(&()));
    assert!(!ARCHIVE.on(&mut a).unwrap().can_proceed(&()));

    SUBMIT.on(&mut a).unwrap().execute(()).unwrap();

    assert_eq!(a.status.as_deref(), Some("review"));
    assert!(REVIEW_DONE.on(&mut a).unwrap().matches_current_state());
    assert!(!ARCHIVE.on(&mut a).unwrap().matches_current_state());
    assert_eq!(a.fsm().unwrap().current_state().unwrap(), "review");
}

#[test]
fn invalid_source_leaves_record_untouched() {
    let mut archived = post(2, "archived");
    ARCHIVE.on_type().unwrap();

    let err = SUBMIT.on(&mut archived).unwrap().execute(()).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Unable to switch from 'archived' using transition 'submit'"
    );
    assert_eq!(archived.status.as_deref(), Some("archived"));
}

#[test]
fn unset_state_is_reported_as_such() {
    let mut fresh = Post {
        id: 3,
        status: None,
        reviewer: None,
    };

    let err = SUBMIT.on(&mut fresh).unwrap().execute(()).unwrap_err();

    assert!(matches!(err, FsmError::InvalidSourceState { ref current, .. } if current == "an unset state"));
    assert!(fresh.status.is_none());
}

#[test]
fn failed_precondition_runs_no_handler() {
    let mut orphan = post(0, "review");

    let err = PUBLISH
        .on(&mut orphan)
        .unwrap()
        .execute("erin".to_string())
        .unwrap_err();

    assert!(matches!(err, FsmError::Precondition { ref transition } if transition == "publish"));
    assert_eq!(orphan.status.as_deref(), Some("review"));
    assert!(orphan.reviewer.is_none());
}

#[test]
fn handler_output_is_returned_unchanged() {
    let mut draft = post(4, "draft");

    let message = PUBLISH
        .on(&mut draft)
        .unwrap()
        .execute("erin".to_string())
        .unwrap();

    assert_eq!(message, "published by erin");
    assert_eq!(draft.reviewer.as_deref(), Some("erin"));
    assert_eq!(draft.status.as_deref(), Some("published"));
}

#[test]
fn per_source_handler_runs_once_for_current_source() {
    let before = RETRACTIONS.load(Ordering::SeqCst);
    let mut reviewed = post(5, "review");
    let mut live = post(6, "published");

    assert_eq!(
        RETRACT.on(&mut reviewed).unwrap().execute(()).unwrap(),
        "withdrawn from review"
    );
    assert_eq!(RETRACT.on(&mut live).unwrap().execute(()).unwrap(), "unpublished");

    assert_eq!(RETRACTIONS.load(Ordering::SeqCst) - before, 1);
    assert_eq!(reviewed.status.as_deref(), Some("draft"));
    assert_eq!(live.status.as_deref(), Some("draft"));
}

#[test]
fn class_bound_predicate_filters_records() {
    let posts = [post(7, "published"), post(8, "draft"), post(9, "published")];
    let published = PUBLISH.on_type().unwrap();

    let ids: Vec<u32> = published
        .as_predicate()
        .filter(&posts)
        .iter()
        .map(|p| p.id)
        .collect();
    let others: Vec<u32> = published.is(false).filter(&posts).iter().map(|p| p.id).collect();

    assert_eq!(ids, vec![7, 9]);
    assert_eq!(others, vec![8]);
}

#[derive(Clone, Default)]
struct Warnings(Arc<Mutex<Vec<String>>>);

struct Message(String);

impl Visit for Message {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Warnings {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            let mut message = Message(String::new());
            event.record(&mut message);
            self.0.lock().unwrap().push(message.0);
        }
    }
}

#[test]
fn non_boolean_comparison_warns_and_never_matches() {
    let warnings = Warnings::default();
    let subscriber = tracing_subscriber::registry().with(warnings.clone());
    let posts = [post(10, "published")];

    let predicate = tracing::subscriber::with_default(subscriber, || {
        PUBLISH.on_type().unwrap().compare("published")
    });

    assert_eq!(predicate, Predicate::Never);
    assert!(predicate.filter(&posts).is_empty());
    assert_eq!(
        warnings.0.lock().unwrap().as_slice(),
        ["unexpected comparison argument".to_string()]
    );
}

#[derive(Debug)]
#[allow(dead_code)]
struct Stateless {
    id: u32,
}

statefield::record_schema! {
    Stateless {
        id: Column,
    }
}

#[allow(dead_code)]
struct TwoStates {
    status: String,
    phase: String,
}

statefield::record_schema! {
    TwoStates {
        status: State,
        phase: State,
    }
}

#[test]
fn setup_errors_surface_on_first_access() {
    let touch = transition::<Stateless, (), ()>("touch")
        .target("touched")
        .handler(|_: &mut Stateless, ()| {})
        .build()
        .unwrap();

    let err = touch.on_type().unwrap_err();
    assert!(matches!(err, SetupError::NoStateAttribute { .. }));
    assert!(err.to_string().contains("no state attribute found"));

    let err = registry_for::<TwoStates>().unwrap_err();
    assert!(err.to_string().contains("more than one state attribute found"));
    assert!(matches!(
        err,
        SetupError::MultipleStateAttributes { ref attributes, .. } if attributes == &["status", "phase"]
    ));
}

#[test]
fn misdeclared_transitions_fail_to_build() {
    let result = transition::<Post, (), ()>("broken")
        .source(["draft", ""])
        .target("*")
        .per_source(
            PerSourceHandler::new()
                .on("draft", set_status("x"))
                .on("draft", set_status("x"))
                .on("review", set_status("x")),
        )
        .build();

    match result {
        Err(BuildError::InvalidDeclaration { name, violations }) => {
            assert_eq!(name, "broken");
            assert_eq!(violations.len(), 5);
            assert!(violations.contains(&DeclarationViolation::MissingSourceHandler {
                label: String::new()
            }));
        }
        other => panic!("Expected InvalidDeclaration, got {:?}", other.map(|_| ())),
    }

    let uncovered = transition::<Post, (), ()>("shelve")
        .source(["draft", "review"])
        .target("shelved")
        .per_source(PerSourceHandler::new().on("draft", set_status("shelved")))
        .build();

    match uncovered {
        Err(BuildError::InvalidDeclaration { violations, .. }) => assert_eq!(
            violations,
            vec![DeclarationViolation::MissingSourceHandler {
                label: "review".to_string()
            }]
        ),
        other => panic!("Expected InvalidDeclaration, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn concurrent_access_registers_each_declaration_once() {
    static CLOSE: LazyLock<TransitionDeclaration<Post>> = LazyLock::new(|| {
        transition("close")
            .source("*")
            .target("closed")
            .handler(set_status("closed"))
            .build()
            .unwrap()
    });

    thread::scope(|scope| {
        for id in 0..8 {
            scope.spawn(move || {
                let mut record = post(100 + id, "draft");
                CLOSE.on(&mut record).unwrap().execute(()).unwrap();
                assert_eq!(record.status.as_deref(), Some("closed"));
            });
        }
    });

    let registry = Post::state_machine().unwrap();
    let registered = registry
        .transitions()
        .iter()
        .filter(|t| t.id() == CLOSE.id())
        .count();
    assert_eq!(registered, 1);
    let closed: Vec<_> = registry
        .states()
        .into_iter()
        .filter(|s| s.label() == "closed")
        .collect();
    assert_eq!(closed.len(), 1);
}

#[test]
fn snapshot_describes_registered_machine() {
    SUBMIT.on_type().unwrap();
    RETRACT.on_type().unwrap();

    let registry = Post::state_machine().unwrap();
    let json = registry.snapshot().to_json().unwrap();
    let snapshot = RegistrySnapshot::from_json(&json).unwrap();

    assert_eq!(snapshot.state_attribute, "status");
    assert!(snapshot.states.iter().any(|s| s == "review"));
    let retract = snapshot
        .transitions
        .iter()
        .find(|t| t.name == "retract")
        .unwrap();
    assert_eq!(retract.target, "draft");
    assert_eq!(retract.id, RETRACT.id());

    let bytes = snapshot.to_bytes().unwrap();
    assert_eq!(RegistrySnapshot::from_bytes(&bytes).unwrap(), snapshot);
}
