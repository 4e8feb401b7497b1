//! Integration tests for the editor crate: full gesture → store →
//! compile workflows.

use pagecraft_editor::{
    CommitOutcome, EditSession, Layout, Mutation, Point, Position, PropertyValue, Rect, Registry,
};
use pretty_assertions::assert_eq;

fn new_session() -> (EditSession, Registry) {
    (
        EditSession::new("integration-canvas", Rect::new(0.0, 0.0, 1200.0, 900.0)),
        Registry::with_builtins(),
    )
}

fn insert(session: &mut EditSession, registry: &Registry, type_name: &str) -> String {
    session
        .apply(
            Mutation::InsertBlock {
                type_name: type_name.to_string(),
                position: Position::auto(),
            },
            registry,
        )
        .unwrap()
        .0
        .inserted_id
        .unwrap()
}

#[test]
fn test_full_editing_workflow() {
    let (mut session, registry) = new_session();

    // Drag a hero from the palette onto the canvas.
    assert!(session.begin_palette_drag("hero", Point::new(10.0, 10.0)));
    session.drag_update(Point::new(500.0, 300.0));
    let outcome = session.commit_drop(Point::new(500.0, 300.0), &registry).unwrap();
    let hero_id = match outcome {
        CommitOutcome::Inserted { id } => id,
        other => panic!("expected insert, got {other:?}"),
    };

    // Edit its heading.
    session.open_properties(&registry, &hero_id).unwrap();
    let values = [(
        "heading".to_string(),
        PropertyValue::Text("Hello, Integration".into()),
    )]
    .into_iter()
    .collect();
    let report = session.submit_properties(&registry, &values).unwrap();
    assert_eq!(report.applied, 1);
    assert!(report.rejected.is_empty());

    // Compile and check the edit landed in the markup.
    let bundle = session.compile(&registry);
    assert!(bundle.markup.contains("Hello, Integration"));
    assert!(bundle.warnings.is_empty());

    // Delete and recompile: the block is gone.
    assert!(session.delete_block(&hero_id));
    let bundle = session.compile(&registry);
    assert!(!bundle.markup.contains("Hello, Integration"));
}

#[test]
fn test_delete_of_missing_id_leaves_store_unchanged() {
    let (mut session, registry) = new_session();
    insert(&mut session, &registry, "header");
    let before = session.store().instances().to_vec();

    assert!(!session.delete_block("no-such-id"));
    assert_eq!(session.store().instances(), before.as_slice());
}

#[test]
fn test_compile_twice_is_byte_identical() {
    let (mut session, registry) = new_session();
    insert(&mut session, &registry, "header");
    insert(&mut session, &registry, "hero");
    insert(&mut session, &registry, "grid");
    insert(&mut session, &registry, "footer");

    let first = session.compile(&registry).clone();
    let second = session.compile(&registry).clone();

    assert_eq!(first.markup, second.markup);
    assert_eq!(first.stylesheet, second.stylesheet);
    assert_eq!(first.script, second.script);
}

#[test]
fn test_stylesheet_dedupes_repeated_types() {
    let (mut session, registry) = new_session();
    for _ in 0..5 {
        insert(&mut session, &registry, "hero");
    }

    let bundle = session.compile(&registry);
    assert_eq!(bundle.stylesheet.matches(".pagecraft-hero {").count(), 1);
    assert_eq!(bundle.markup.matches("pagecraft-hero").count(), 5);
}

#[test]
fn test_move_commit_outside_bounds_is_rejected() {
    let (mut session, registry) = new_session();
    let id = session
        .apply(
            Mutation::InsertBlock {
                type_name: "cta".to_string(),
                position: Position::at(100.0, 100.0),
            },
            &registry,
        )
        .unwrap()
        .0
        .inserted_id
        .unwrap();
    let before = session.store().get(&id).unwrap().position;

    session.begin_move_drag(&id, Point::new(100.0, 100.0), Point::new(150.0, 150.0));
    let outcome = session.commit_drop(Point::new(-50.0, 150.0), &registry).unwrap();

    assert_eq!(outcome, CommitOutcome::Rejected);
    assert_eq!(session.store().get(&id).unwrap().position, before);
    assert!(session.placement().state().is_idle());
}

#[test]
fn test_layout_save_load_round_trip_fidelity() {
    let (mut session, registry) = new_session();
    let header_id = insert(&mut session, &registry, "header");
    insert(&mut session, &registry, "grid");

    // Customize so the round trip carries non-default values.
    session.open_properties(&registry, &header_id).unwrap();
    let values = [
        ("logoText".to_string(), PropertyValue::Text("Acme".into())),
        ("fixed".to_string(), PropertyValue::Bool(true)),
    ]
    .into_iter()
    .collect();
    session.submit_properties(&registry, &values).unwrap();

    let layout = session.to_layout(1712000000000);
    let json = serde_json::to_string_pretty(&layout).unwrap();
    let restored: Layout = serde_json::from_str(&json).unwrap();

    let mut reloaded = EditSession::new("integration-canvas", Rect::new(0.0, 0.0, 1200.0, 900.0));
    reloaded.load_layout(restored);

    assert_eq!(reloaded.store().len(), session.store().len());
    for (a, b) in session
        .store()
        .instances()
        .iter()
        .zip(reloaded.store().instances())
    {
        assert_eq!(a.id, b.id);
        assert_eq!(a.type_name, b.type_name);
        assert_eq!(a.properties, b.properties);
        assert_eq!(a.position, b.position);
    }
}

#[test]
fn test_unresolved_type_survives_compile_with_warning() {
    let (mut session, registry) = new_session();
    insert(&mut session, &registry, "hero");

    // Simulate a layout that references a type this registry lacks.
    let mut layout = session.to_layout(0);
    layout.instances[0].type_name = "testimonials".to_string();
    session.load_layout(layout);
    insert(&mut session, &registry, "footer");

    let bundle = session.compile(&registry);
    assert_eq!(bundle.warnings.len(), 1);
    // The rest of the document still compiled.
    assert!(bundle.markup.contains("pagecraft-footer"));
}
