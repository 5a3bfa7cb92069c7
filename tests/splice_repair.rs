//! Splice-repair scenarios: one duplication step against a connected
//! collinear run.
//!
//! The fixture models a pipe run with a short inserted piece: left and
//! right segments around a 2-unit middle insertion. Copying the
//! insertion along the run must cut the segment it lands on and splice
//! the duplicate in, keeping the run continuous end to end.

use std::collections::BTreeSet;

use mep_splice_engine::duplicate::copy_and_reconnect;
use mep_splice_engine::geometry::{Line3, Point3, Vector3};
use mep_splice_engine::host::{Category, ConnectorRef, Document, Domain, ElementId, Profile};
use mep_splice_engine::network::Inventory;

fn round(radius: f64) -> Profile {
    Profile::Round { radius }
}

fn pipe(doc: &mut Document, radius: f64, x1: f64, x2: f64) -> ElementId {
    doc.add_segment(
        Category::Pipe,
        Domain::Piping,
        round(radius),
        Line3::new(Point3::new(x1, 0.0, 0.0), Point3::new(x2, 0.0, 0.0)),
    )
    .unwrap()
}

/// Connected run `left(0..10) - middle(10..12) - right(12..30)`.
/// Returns the document and the three ids.
fn insertion_run(right_radius: f64) -> (Document, ElementId, ElementId, ElementId) {
    let mut doc = Document::new();
    let left = pipe(&mut doc, 0.25, 0.0, 10.0);
    let middle = pipe(&mut doc, 0.25, 10.0, 12.0);
    let right = pipe(&mut doc, right_radius, 12.0, 30.0);
    doc.connect(ConnectorRef::new(left, 1), ConnectorRef::new(middle, 0))
        .unwrap();
    doc.connect(ConnectorRef::new(middle, 1), ConnectorRef::new(right, 0))
        .unwrap();
    (doc, left, middle, right)
}

/// Ids reachable from `start` through connector links.
fn component(doc: &Document, start: ElementId) -> BTreeSet<ElementId> {
    let mut seen = BTreeSet::new();
    let mut queue = vec![start];
    while let Some(id) = queue.pop() {
        if !seen.insert(id) {
            continue;
        }
        for connector in &doc.element(id).unwrap().connectors {
            if let Some(mate) = connector.linked {
                if !seen.contains(&mate.element) {
                    queue.push(mate.element);
                }
            }
        }
    }
    seen
}

fn connected_endpoints(doc: &Document, id: ElementId) -> usize {
    doc.element(id)
        .unwrap()
        .connectors
        .iter()
        .filter(|c| !c.is_open())
        .count()
}

#[test]
fn duplicated_insertion_is_spliced_into_the_run() {
    let (mut doc, left, middle, right) = insertion_run(0.25);
    let mut inventory = Inventory::build(&doc);

    let step = copy_and_reconnect(
        &mut doc,
        &[middle],
        Vector3::new(5.0, 0.0, 0.0),
        &mut inventory,
    )
    .unwrap();

    assert_eq!(step.created.len(), 1);
    assert_eq!(step.splices, 1);
    let duplicate = step.created[0];

    // The duplicate is fully reconnected.
    assert_eq!(connected_endpoints(&doc, duplicate), 2);

    // The host segment was trimmed back to the splice entry, and a
    // bridging segment rebuilds the far side.
    let right_line = doc.element(right).unwrap().line().unwrap();
    assert_eq!(right_line.start(), Point3::new(12.0, 0.0, 0.0));
    assert_eq!(right_line.end(), Point3::new(15.0, 0.0, 0.0));

    // One new element besides the duplicate: the bridge.
    assert_eq!(doc.len(), 5);
    let bridge = doc
        .elements()
        .map(|e| e.id)
        .find(|&id| id != left && id != middle && id != right && id != duplicate)
        .unwrap();
    let bridge_line = doc.element(bridge).unwrap().line().unwrap();
    assert_eq!(bridge_line.start(), Point3::new(17.0, 0.0, 0.0));
    assert_eq!(bridge_line.end(), Point3::new(30.0, 0.0, 0.0));

    // Left and right stubs stay mutually reachable through the splice.
    let reachable = component(&doc, left);
    assert_eq!(
        reachable,
        BTreeSet::from([left, middle, right, duplicate, bridge])
    );

    // The untouched part of the run is unmodified.
    let left_line = doc.element(left).unwrap().line().unwrap();
    assert_eq!(left_line.start(), Point3::new(0.0, 0.0, 0.0));
    assert_eq!(left_line.end(), Point3::new(10.0, 0.0, 0.0));
}

#[test]
fn mismatched_profiles_are_never_spliced() {
    // Host radius differs by 0.02, above the 0.01 tolerance.
    let (mut doc, _left, middle, right) = insertion_run(0.27);
    let mut inventory = Inventory::build(&doc);

    let step = copy_and_reconnect(
        &mut doc,
        &[middle],
        Vector3::new(5.0, 0.0, 0.0),
        &mut inventory,
    )
    .unwrap();

    assert_eq!(step.splices, 0);
    let duplicate = step.created[0];
    assert_eq!(connected_endpoints(&doc, duplicate), 0);

    // The host is untouched and no bridge was created.
    assert_eq!(doc.len(), 4);
    let right_line = doc.element(right).unwrap().line().unwrap();
    assert_eq!(right_line.end(), Point3::new(30.0, 0.0, 0.0));
}

#[test]
fn degenerate_pair_produces_no_bridge_and_no_error() {
    // A 0.05-unit insertion: the splice pair is below the 0.1 gap
    // threshold.
    let mut doc = Document::new();
    let host = pipe(&mut doc, 0.25, 0.0, 30.0);
    let stub = pipe(&mut doc, 0.25, 100.0, 100.05);
    let mut inventory = Inventory::build(&doc);

    let step = copy_and_reconnect(
        &mut doc,
        &[stub],
        Vector3::new(-85.0, 0.0, 0.0),
        &mut inventory,
    )
    .unwrap();

    assert_eq!(step.splices, 0);
    assert_eq!(doc.len(), 3);
    let host_line = doc.element(host).unwrap().line().unwrap();
    assert_eq!(host_line.end(), Point3::new(30.0, 0.0, 0.0));
}

#[test]
fn lateral_copy_away_from_the_run_needs_no_repair() {
    let (mut doc, _left, middle, _right) = insertion_run(0.25);
    let mut inventory = Inventory::build(&doc);

    let step = copy_and_reconnect(
        &mut doc,
        &[middle],
        Vector3::new(0.0, 5.0, 0.0),
        &mut inventory,
    )
    .unwrap();

    assert_eq!(step.splices, 0);
    let duplicate = step.created[0];
    let line = doc.element(duplicate).unwrap().line().unwrap();
    assert_eq!(line.start(), Point3::new(10.0, 5.0, 0.0));
    assert_eq!(line.end(), Point3::new(12.0, 5.0, 0.0));
    assert_eq!(connected_endpoints(&doc, duplicate), 0);
}
