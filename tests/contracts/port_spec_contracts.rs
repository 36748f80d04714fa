// Port Spec Contract Tests
//
// These tests verify INVARIANTS that MUST NEVER BREAK regardless of
// implementation. Remote allocation calls are expensive and partially
// irreversible, so every malformed spec must be rejected before the first
// call leaves the process.

use pteronode::errors::PteroError;
use pteronode::expand_ports;

/// WHY: The canonical expansion example from the tool's documentation
/// BREAKS: Users' saved invocations if ordering or range inclusivity changes
#[test]
fn expand_ports_canonical_example() {
    assert_eq!(
        expand_ports("80,443,8000-8002").unwrap(),
        vec![80, 443, 8000, 8001, 8002]
    );
}

/// WHY: Ranges are inclusive on both ends
/// BREAKS: Off-by-one allocation counts on every range component
#[test]
fn ranges_are_inclusive() {
    assert_eq!(expand_ports("100-102").unwrap(), vec![100, 101, 102]);
    assert_eq!(expand_ports("100-100").unwrap(), vec![100]);
}

/// WHY: An inverted range is a typo, never a request for zero ports
/// BREAKS: Silent no-ops that users read as success
#[test]
fn inverted_range_is_fatal() {
    match expand_ports("100-99") {
        Err(PteroError::InvalidPortSpec(msg)) => assert!(msg.contains("100-99")),
        other => panic!("Expected InvalidPortSpec, got {:?}", other),
    }
}

/// WHY: Validation errors must name the offending component so a user can
/// fix a long spec without bisecting it
#[test]
fn errors_name_the_offending_component() {
    match expand_ports("7777-7800,9443x,25565") {
        Err(PteroError::InvalidPortSpec(msg)) => assert!(msg.contains("9443x")),
        other => panic!("Expected InvalidPortSpec, got {:?}", other),
    }
}

/// WHY: Duplicates are deliberate; each occurrence is an independent
/// mutation downstream. Deduplicating here would silently change how many
/// remote calls a delete issues.
#[test]
fn duplicates_are_preserved() {
    assert_eq!(
        expand_ports("25565,25565,25564-25566").unwrap(),
        vec![25565, 25565, 25564, 25565, 25566]
    );
}

/// WHY: Empty components ("80,,443", trailing comma) indicate a mangled
/// spec, not an empty request
#[test]
fn empty_components_are_fatal() {
    assert!(matches!(
        expand_ports("80,,443"),
        Err(PteroError::InvalidPortSpec(_))
    ));
    assert!(matches!(
        expand_ports("80,443,"),
        Err(PteroError::InvalidPortSpec(_))
    ));
    assert!(matches!(
        expand_ports(""),
        Err(PteroError::InvalidPortSpec(_))
    ));
}
