//! Properties that must hold on every resolved repository.

use girscope::model::Repository;
use girscope::resolve::resolve_repository;
use girscope::{GirParser, Name};

use crate::helpers::gir_fixtures::foo_document;
use crate::helpers::search_dir::GirDir;
use crate::helpers::type_assertions::{assert_no_duplicate_types, assert_type_names};

fn resolved_foo() -> (GirDir, Repository) {
    let dir = GirDir::with_stubs();
    let mut parser = GirParser::new(dir.search_paths());
    let repo = parser
        .parse_str(&foo_document())
        .expect("Failed to parse Foo");
    (dir, repo)
}

fn qualified(repo: &Repository, local: &str) -> String {
    repo.namespace().qualify(local)
}

#[test]
fn test_backfilled_ctypes_match_definitions() {
    let (_dir, repo) = resolved_foo();
    for (_, ty) in repo.types.iter() {
        if ty.fundamental {
            continue;
        }
        if let Some(found) = repo.find_type(&ty.name) {
            if ty.ctype.as_ref().is_some_and(|c| c.ends_with('*')) {
                continue;
            }
            assert_eq!(ty.ctype.as_ref(), found.ctype(), "ctype of {}", ty.name);
        }
    }
}

#[test]
fn test_ancestor_chain_spans_namespaces() {
    let (_dir, repo) = resolved_foo();
    let baz = repo.find_class("Baz").unwrap();
    assert_type_names(&baz.ancestors, &["Foo.Bar", "GObject.Object"]);
    assert_eq!(baz.ancestors[0].ctype.as_deref(), Some("FooBar"));
}

#[test]
fn test_ancestor_descendant_duality() {
    let (_dir, repo) = resolved_foo();
    let ns = repo.namespace();
    for class in ns.get_classes() {
        let name = qualified(&repo, &class.name);
        assert!(
            !class.ancestors.iter().any(|a| *a.name == *name),
            "{name} is its own ancestor"
        );
        for ancestor in &class.ancestors {
            let Some(local) = repo.find_class(&ancestor.name) else {
                continue;
            };
            if ancestor.split_qualified().map(|(prefix, _)| prefix) != Some(&*ns.name) {
                continue;
            }
            assert!(
                local.descendants.iter().any(|d| *d.name == *name),
                "{name} missing from descendants of {}",
                ancestor.name
            );
        }
        for descendant in &class.descendants {
            let local = descendant.local_name();
            let d = ns.find_class(local).expect("descendants are local classes");
            assert!(d.ancestors.iter().any(|a| *a.name == *name));
        }
    }
}

#[test]
fn test_implementation_duality() {
    let (_dir, repo) = resolved_foo();
    let bar = repo.find_class("Bar").unwrap();
    assert_type_names(&bar.interfaces, &["Gio.File"]);
    assert_eq!(bar.interfaces[0].ctype.as_deref(), Some("GFile"));

    for class in repo.namespace().get_classes() {
        let name = Name::from(qualified(&repo, &class.name));
        for iface in &class.interfaces {
            let implementations = repo.implementations_of(&iface.name);
            assert!(
                implementations.iter().any(|t| t.name == name),
                "{name} missing from implementations of {}",
                iface.name
            );
        }
    }
    assert!(repo.implementations_of("Gio.Unknown").is_empty());
}

#[test]
fn test_resolution_twice_is_identical() {
    let (_dir, mut repo) = resolved_foo();
    let snapshot: Vec<_> = repo.namespace().get_classes().cloned().collect();
    let implementations = repo.implementations_of("Gio.File");

    let report = resolve_repository(&mut repo);
    assert!(report.is_empty(), "{:?}", report.warnings);

    let again: Vec<_> = repo.namespace().get_classes().cloned().collect();
    assert_eq!(snapshot, again);
    assert_eq!(repo.implementations_of("Gio.File"), implementations);
    for class in &again {
        assert_no_duplicate_types(&class.ancestors);
        assert_no_duplicate_types(&class.descendants);
        assert_no_duplicate_types(&class.interfaces);
    }
}

#[test]
fn test_symbol_index_covers_members() {
    let (_dir, repo) = resolved_foo();
    let ns = repo.namespace();
    let set_label = ns.find_symbol("foo_bar_set_label").unwrap();
    assert_eq!(set_label.owner.as_deref(), Some("Bar"));
    assert!(ns.find_symbol("foo_bar_new").is_some());
    assert!(ns.find_symbol("foo_init").is_some());
    assert_eq!(ns.symbols().count(), 3);
}
