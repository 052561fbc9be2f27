//! Document Approval Workflow
//!
//! This example attaches a review workflow to a persisted document record.
//!
//! Key concepts:
//! - Linear workflow (draft -> review -> approved -> published)
//! - Guards control transitions (validation rules)
//! - Handlers write the new state and return a result
//! - Wildcard sources (archive from anywhere)
//! - Per-source handlers (reject behaves differently per stage)
//! - Type-level predicates for querying documents by state
//!
//! Run with: RUST_LOG=debug cargo run --example document_workflow

use statefield::{
    transition, PerSourceHandler, RegistrySnapshot, Stateful, TransitionDeclaration,
};
use std::sync::LazyLock;
use tracing_subscriber::EnvFilter;

// Document entity
struct Document {
    id: u64,
    status: String,
    word_count: usize,
    revisions: u32,
}

statefield::record_schema! {
    Document {
        id: Column,
        status: State,
        word_count: Column,
        revisions: Column,
    }
}

impl Document {
    fn draft(id: u64, word_count: usize) -> Self {
        Self {
            id,
            status: "draft".to_string(),
            word_count,
            revisions: 0,
        }
    }
}

// Pure guards - validation logic
fn long_enough(doc: &Document, _: &String) -> bool {
    doc.word_count >= 100
}

fn short_enough(doc: &Document, _: &String) -> bool {
    doc.word_count <= 5000
}

fn move_to(target: &'static str) -> impl Fn(&mut Document, String) -> String + Send + Sync {
    move |doc: &mut Document, actor: String| {
        let from = std::mem::replace(&mut doc.status, target.to_string());
        format!("document {} moved from {from} to {target} by {actor}", doc.id)
    }
}

type DocTransition = TransitionDeclaration<Document, String, String>;

static SUBMIT: LazyLock<DocTransition> = LazyLock::new(|| {
    transition("submit")
        .source("draft")
        .target("review")
        .when(long_enough)
        .handler(move_to("review"))
        .build()
        .expect("submit declaration")
});

static APPROVE: LazyLock<DocTransition> = LazyLock::new(|| {
    transition("approve")
        .source("review")
        .target("approved")
        .when(short_enough)
        .handler(move_to("approved"))
        .build()
        .expect("approve declaration")
});

static PUBLISH: LazyLock<DocTransition> = LazyLock::new(|| {
    transition("publish")
        .source("approved")
        .target("published")
        .handler(move_to("published"))
        .build()
        .expect("publish declaration")
});

static REJECT: LazyLock<DocTransition> = LazyLock::new(|| {
    transition("reject")
        .source(["review", "approved"])
        .target("draft")
        .per_source(
            PerSourceHandler::new()
                .on("review", |doc: &mut Document, actor: String| {
                    doc.status = "draft".to_string();
                    doc.revisions += 1;
                    format!("{actor} sent document {} back for revision", doc.id)
                })
                .on("approved", |doc: &mut Document, actor: String| {
                    doc.status = "draft".to_string();
                    doc.revisions += 1;
                    format!("{actor} revoked approval of document {}", doc.id)
                }),
        )
        .build()
        .expect("reject declaration")
});

static ARCHIVE: LazyLock<DocTransition> = LazyLock::new(|| {
    transition("archive")
        .source("*")
        .target("archived")
        .handler(move_to("archived"))
        .build()
        .expect("archive declaration")
});

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Document Approval Workflow ===\n");

    let mut doc = Document::draft(123, 250);
    println!("Processing document {}:", doc.id);
    println!("  Word count: {}\n", doc.word_count);

    println!("Step 1: Submit for Review");
    println!("  {}", SUBMIT.on(&mut doc)?.execute("alice".to_string())?);

    println!("Step 2: Reject");
    println!("  {}", REJECT.on(&mut doc)?.execute("bob".to_string())?);
    println!("  Revisions so far: {}\n", doc.revisions);

    println!("Step 3: Resubmit, approve and publish");
    for step in [&*SUBMIT, &*APPROVE, &*PUBLISH] {
        println!("  {}", step.on(&mut doc)?.execute("carol".to_string())?);
    }

    println!("\nStep 4: Try to publish again");
    match PUBLISH.on(&mut doc)?.execute("carol".to_string()) {
        Ok(message) => println!("  unexpected: {message}"),
        Err(e) => println!("  ✗ {e}"),
    }

    println!("\nStep 5: A short draft cannot be submitted");
    let mut stub = Document::draft(124, 12);
    let submit = SUBMIT.on(&mut stub)?;
    println!(
        "  possible: {}, can proceed: {}",
        submit.transition_possible(),
        submit.can_proceed(&"alice".to_string())
    );

    println!("\nStep 6: Query documents by state");
    let mut archived = Document::draft(125, 900);
    ARCHIVE.on(&mut archived)?.execute("dave".to_string())?;
    let documents = [doc, stub, archived];
    let published = PUBLISH.on_type()?.as_predicate();
    println!("  filter: {published}");
    for found in published.filter(&documents) {
        println!("  published: document {}", found.id);
    }
    let not_archived = ARCHIVE.on_type()?.is(false);
    println!("  not archived: {}", not_archived.filter(&documents).len());

    println!("\nStep 7: Snapshot of the registered machine");
    let json = Document::state_machine()?.snapshot().to_json()?;
    let snapshot = RegistrySnapshot::from_json(&json)?;
    println!("  states: {}", snapshot.states.join(", "));
    for t in &snapshot.transitions {
        println!("  {} -> {} ({:?})", t.name, t.target, t.sources);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
