//! Pass 6: the C identifier index.

use indexmap::IndexMap;

use crate::base::Name;
use crate::model::{AsCallable, Callable, Namespace, Repository, SymbolKind, SymbolRef};

struct SymbolCollector<'a> {
    namespace: &'a Name,
    symbols: IndexMap<Name, SymbolRef>,
}

impl SymbolCollector<'_> {
    fn add(&mut self, owner: Option<&Name>, callable: &Callable, kind: SymbolKind) {
        let Some(identifier) = &callable.identifier else {
            return;
        };
        self.symbols.insert(
            identifier.clone(),
            SymbolRef {
                namespace: self.namespace.clone(),
                owner: owner.cloned(),
                name: callable.name.clone(),
                kind,
            },
        );
    }

    fn add_all<'c>(
        &mut self,
        owner: &Name,
        callables: impl IntoIterator<Item = &'c Callable>,
        kind: SymbolKind,
    ) {
        for callable in callables {
            self.add(Some(owner), callable, kind);
        }
    }
}

/// Maps every C identifier of the namespace to the callable it names.
pub(super) fn collect_symbols(ns: &Namespace) -> IndexMap<Name, SymbolRef> {
    let mut collector = SymbolCollector {
        namespace: &ns.name,
        symbols: IndexMap::new(),
    };

    for function in ns.get_functions() {
        collector.add(None, function, SymbolKind::Function);
    }
    for class in ns.get_classes() {
        collector.add_all(&class.name, &class.constructors, SymbolKind::Constructor);
        collector.add_all(
            &class.name,
            class.methods.iter().map(AsCallable::callable),
            SymbolKind::Method,
        );
        collector.add_all(&class.name, &class.functions, SymbolKind::TypeFunction);
    }
    for iface in ns.get_interfaces() {
        collector.add_all(
            &iface.name,
            iface.methods.iter().map(AsCallable::callable),
            SymbolKind::Method,
        );
        collector.add_all(&iface.name, &iface.functions, SymbolKind::TypeFunction);
    }
    for record in ns.get_records() {
        collector.add_all(&record.name, &record.constructors, SymbolKind::Constructor);
        collector.add_all(
            &record.name,
            record.methods.iter().map(AsCallable::callable),
            SymbolKind::Method,
        );
        collector.add_all(&record.name, &record.functions, SymbolKind::TypeFunction);
    }
    for union in ns.get_unions() {
        collector.add_all(&union.name, &union.constructors, SymbolKind::Constructor);
        collector.add_all(
            &union.name,
            union.methods.iter().map(AsCallable::callable),
            SymbolKind::Method,
        );
        collector.add_all(&union.name, &union.functions, SymbolKind::TypeFunction);
    }
    for enumeration in ns
        .get_enumerations()
        .chain(ns.get_bitfields())
        .chain(ns.get_error_domains())
    {
        collector.add_all(
            &enumeration.name,
            &enumeration.functions,
            SymbolKind::TypeFunction,
        );
    }

    collector.symbols
}

pub(super) fn resolve_symbols(repo: &mut Repository) {
    let symbols = collect_symbols(&repo.namespace);
    repo.namespace.set_symbols(symbols);
}
