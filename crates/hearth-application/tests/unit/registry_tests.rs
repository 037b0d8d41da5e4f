//! Tests for the link-time type registry
//!
//! Entries below are submitted into `REGISTERED_TYPES` by this test binary
//! and resolved back through `LinkedTypeResolver`.

use hearth_application::registry::{
    Constructor, LinkedTypeResolver, REGISTERED_TYPES, TypeEntry, TypeMarker, TypeResolver,
    TypeTable,
};
use hearth_application::Addon;
use hearth_domain::ports::Service;

#[derive(Default)]
struct Zeta;
impl Service for Zeta {}

#[derive(Default)]
struct Alpha;
impl Service for Alpha {}

#[derive(Default)]
struct Audit;
impl Addon for Audit {}

#[linkme::distributed_slice(REGISTERED_TYPES)]
static ZETA: TypeEntry = TypeEntry::singleton::<Zeta>("fixtures::linked::Zeta", "fixtures::linked");

#[linkme::distributed_slice(REGISTERED_TYPES)]
static ALPHA: TypeEntry =
    TypeEntry::named_service::<Alpha>("fixtures::linked::inner::Alpha", "fixtures::linked::inner");

#[linkme::distributed_slice(REGISTERED_TYPES)]
static AUDIT: TypeEntry = TypeEntry::addon::<Audit>("fixtures::addons::Audit", "fixtures::addons");

// ============================================================================
// Linked Registry
// ============================================================================

#[test]
fn test_linked_types_are_listed() {
    let registered: Vec<(&str, &str)> = REGISTERED_TYPES
        .iter()
        .map(|entry| (entry.name, entry.package))
        .collect();

    assert!(registered.contains(&("fixtures::linked::Zeta", "fixtures::linked")));
    assert!(registered.contains(&("fixtures::addons::Audit", "fixtures::addons")));
}

#[test]
fn test_linked_package_listing_is_sorted_and_recursive() {
    let names: Vec<&str> = LinkedTypeResolver
        .types_in_package("fixtures::linked")
        .iter()
        .map(|entry| entry.name)
        .collect();

    assert_eq!(names, vec!["fixtures::linked::Zeta", "fixtures::linked::inner::Alpha"]);
}

#[test]
fn test_linked_load_builds_the_registered_type() {
    let entry = LinkedTypeResolver.load("fixtures::linked::Zeta").unwrap();
    assert_eq!(entry.marker, TypeMarker::Singleton);

    let Constructor::Service { factory, .. } = entry.constructor else {
        panic!("expected a service constructor, got {:?}", entry.constructor);
    };
    let instance = factory().unwrap();
    assert!(instance.is::<Zeta>());
}

#[test]
fn test_linked_addon_entry() {
    let entry = LinkedTypeResolver.load("fixtures::addons::Audit").unwrap();

    assert!(entry.is_addon());
    assert!(!entry.is_service());
    assert_eq!(entry.service_type_id(), None);
}

// ============================================================================
// Explicit Tables
// ============================================================================

#[test]
fn test_table_seeded_from_linked_registry() {
    let table = TypeTable::linked();

    assert!(table.load("fixtures::linked::inner::Alpha").is_ok());
    assert!(table.load("fixtures::linked::Missing").is_err());
}

#[test]
fn test_nested_declarations_are_kept() {
    static NESTED: &[&str] = &["app::Outer::Inner"];
    let entry = TypeEntry::abstract_type("app::Outer", "app").with_nested(NESTED);

    assert_eq!(entry.nested, NESTED);
    assert!(matches!(entry.constructor, Constructor::Abstract));
    assert!(!entry.is_service());
}

#[test]
fn test_singleton_macro_names_type_after_module() {
    let entry = hearth_application::singleton!(Zeta);

    assert!(entry.name.ends_with("registry_tests::Zeta"));
    assert!(entry.name.starts_with(entry.package));
    assert_eq!(entry.service_type_id(), Some(std::any::TypeId::of::<Zeta>()));
}
