//! Per-module import/export tables and export-origin resolution.

use rustc_hash::{FxHashMap, FxHashSet};

use oxc_ast::ast::{ImportDeclarationSpecifier, ModuleDeclaration, ModuleExportName, Program};

use crate::diagnostics::Diagnostics;
use crate::graph::SymbolGraph;
use crate::node::{DEFAULT_EXPORT, NodeId};
use crate::resolver::PathResolver;

/// What an import binding refers to in its source module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedName {
    /// `import { x as y }` -> `x`
    Named(String),
    /// `import y from`
    Default,
    /// `import * as y from`
    Namespace,
}

impl ImportedName {
    fn export_name(&self) -> Option<&str> {
        match self {
            ImportedName::Named(name) => Some(name),
            ImportedName::Default => Some(DEFAULT_EXPORT),
            ImportedName::Namespace => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub specifier: String,
    pub imported: ImportedName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReExport {
    /// `export { local as exported } from 'specifier'`
    Named { specifier: String, local: String },
    /// `export * as exported from 'specifier'`
    Namespace { specifier: String },
}

/// Everything a module imports and re-exports, keyed for lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleExports {
    /// Local binding name -> where it comes from.
    pub imports: FxHashMap<String, ImportBinding>,
    /// Specifiers of imports that bind nothing (`import './x'`).
    pub side_effect_imports: Vec<String>,
    /// Specifiers of every `export .. from` declaration.
    pub reexport_sources: Vec<String>,
    reexports: FxHashMap<String, ReExport>,
    star_reexports: Vec<String>,
    /// Exported name -> local name for `export { a as b }`.
    local_exports: FxHashMap<String, String>,
}

impl ModuleExports {
    pub fn from_program(program: &Program<'_>) -> Self {
        let mut table = Self::default();

        for stmt in &program.body {
            let Some(decl) = stmt.as_module_declaration() else {
                continue;
            };

            match decl {
                ModuleDeclaration::ImportDeclaration(import) => {
                    let specifier = import.source.value.to_string();
                    let specs = match &import.specifiers {
                        Some(specs) if !specs.is_empty() => specs,
                        _ => {
                            table.side_effect_imports.push(specifier);
                            continue;
                        }
                    };

                    for spec in specs {
                        let (local, imported) = match spec {
                            ImportDeclarationSpecifier::ImportSpecifier(named) => (
                                named.local.name.to_string(),
                                ImportedName::Named(export_name(&named.imported)),
                            ),
                            ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => {
                                (default.local.name.to_string(), ImportedName::Default)
                            }
                            ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
                                (namespace.local.name.to_string(), ImportedName::Namespace)
                            }
                        };
                        table.imports.insert(
                            local,
                            ImportBinding {
                                specifier: specifier.clone(),
                                imported,
                            },
                        );
                    }
                }
                ModuleDeclaration::ExportNamedDeclaration(export) => match &export.source {
                    Some(source) => {
                        let specifier = source.value.to_string();
                        for spec in &export.specifiers {
                            table.reexports.insert(
                                export_name(&spec.exported),
                                ReExport::Named {
                                    specifier: specifier.clone(),
                                    local: export_name(&spec.local),
                                },
                            );
                        }
                        table.reexport_sources.push(specifier);
                    }
                    None => {
                        for spec in &export.specifiers {
                            table
                                .local_exports
                                .insert(export_name(&spec.exported), export_name(&spec.local));
                        }
                    }
                },
                ModuleDeclaration::ExportAllDeclaration(all) => {
                    let specifier = all.source.value.to_string();
                    match &all.exported {
                        Some(exported) => {
                            table.reexports.insert(
                                export_name(exported),
                                ReExport::Namespace {
                                    specifier: specifier.clone(),
                                },
                            );
                        }
                        None => table.star_reexports.push(specifier.clone()),
                    }
                    table.reexport_sources.push(specifier);
                }
                _ => {}
            }
        }

        table
    }
}

fn export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

/// Follows re-export chains to the node that declares an export.
pub struct ExportResolver<'g> {
    graph: &'g SymbolGraph,
    tables: &'g FxHashMap<String, ModuleExports>,
}

impl<'g> ExportResolver<'g> {
    pub fn new(graph: &'g SymbolGraph, tables: &'g FxHashMap<String, ModuleExports>) -> Self {
        Self { graph, tables }
    }

    /// Find the node that originates export `name` of `file`.
    ///
    /// Named re-exports are checked first, then `export *` (never for
    /// `default`), then local `export { a as b }` aliases, then a local
    /// declaration. Cycles through circular re-exports end in `None`.
    pub fn resolve_export_origin(
        &self,
        resolver: &mut PathResolver,
        diagnostics: &mut Diagnostics,
        file: &str,
        name: &str,
    ) -> Option<NodeId> {
        let mut visited = FxHashSet::default();
        self.origin(resolver, diagnostics, file, name, &mut visited)
    }

    /// Resolve an import binding of `file` to its origin node.
    ///
    /// Namespace imports resolve to the target file node.
    pub fn resolve_binding(
        &self,
        resolver: &mut PathResolver,
        diagnostics: &mut Diagnostics,
        file: &str,
        binding: &ImportBinding,
    ) -> Option<NodeId> {
        let mut visited = FxHashSet::default();
        self.binding_origin(resolver, diagnostics, file, binding, &mut visited)
    }

    fn binding_origin(
        &self,
        resolver: &mut PathResolver,
        diagnostics: &mut Diagnostics,
        file: &str,
        binding: &ImportBinding,
        visited: &mut FxHashSet<String>,
    ) -> Option<NodeId> {
        let target = resolver.resolve(file, &binding.specifier, diagnostics)?;
        match binding.imported.export_name() {
            Some(name) => self.origin(resolver, diagnostics, &target, name, visited),
            None => self.existing(NodeId::file(target)),
        }
    }

    fn origin(
        &self,
        resolver: &mut PathResolver,
        diagnostics: &mut Diagnostics,
        file: &str,
        name: &str,
        visited: &mut FxHashSet<String>,
    ) -> Option<NodeId> {
        if !visited.insert(format!("{file}#{name}")) {
            return None;
        }

        if let Some(table) = self.tables.get(file) {
            if let Some(reexport) = table.reexports.get(name) {
                let found = match reexport {
                    ReExport::Named { specifier, local } => resolver
                        .resolve(file, specifier, diagnostics)
                        .and_then(|target| {
                            self.origin(resolver, diagnostics, &target, local, visited)
                        }),
                    ReExport::Namespace { specifier } => resolver
                        .resolve(file, specifier, diagnostics)
                        .and_then(|target| self.existing(NodeId::file(target))),
                };
                if found.is_some() {
                    return found;
                }
            }

            if name != DEFAULT_EXPORT {
                for specifier in &table.star_reexports {
                    let Some(target) = resolver.resolve(file, specifier, diagnostics) else {
                        continue;
                    };
                    if let Some(found) = self.origin(resolver, diagnostics, &target, name, visited) {
                        return Some(found);
                    }
                }
            }

            if let Some(local) = table.local_exports.get(name) {
                if let Some(binding) = table.imports.get(local) {
                    if let Some(found) =
                        self.binding_origin(resolver, diagnostics, file, binding, visited)
                    {
                        return Some(found);
                    }
                } else if local != name {
                    if let Some(found) = self.existing(NodeId::symbol(file, local.as_str())) {
                        return Some(found);
                    }
                }
            }
        }

        self.existing(NodeId::symbol(file, name))
    }

    fn existing(&self, id: NodeId) -> Option<NodeId> {
        self.graph.contains(&id).then_some(id)
    }
}
