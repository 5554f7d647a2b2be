//! Symbol discovery: one node per parsed file and per declared symbol.

use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, Class, ClassType, Declaration, Function, FunctionType,
    Program, Statement, TSEnumDeclaration, TSInterfaceDeclaration, TSTypeAliasDeclaration,
    VariableDeclaration,
};
use oxc_ast_visit::{Visit, walk};
use oxc_semantic::ScopeFlags;

use crate::ast_cache::AstCache;
use crate::diagnostics::{Diagnostics, Pass, isolate};
use crate::graph::SymbolGraph;
use crate::node::{DEFAULT_EXPORT, SymbolKind};

/// Create file and symbol nodes for every file in `cache`.
///
/// Returns the number of files whose declarations were fully collected.
pub fn discover_symbols(
    graph: &mut SymbolGraph,
    cache: &AstCache<'_>,
    diagnostics: &mut Diagnostics,
) -> usize {
    let mut discovered = 0;

    for file in cache.iter() {
        graph.ensure_file_node(&file.path);

        let Some(symbols) = isolate(Pass::Discovery, &file.path, diagnostics, |_| {
            declared_symbols(&file.program)
        }) else {
            continue;
        };

        for (name, kind) in &symbols {
            graph.ensure_symbol_node(&file.path, name, *kind);
        }
        tracing::trace!(path = %file.path, symbols = symbols.len(), "discovered symbols");
        discovered += 1;
    }

    tracing::debug!(
        files = discovered,
        nodes = graph.len(),
        "symbol discovery finished"
    );
    discovered
}

/// Names declared by a module, in source order, with their kinds.
///
/// Functions, classes, enums, interfaces and type aliases count at any depth.
/// Variables count only when declared in the module body or directly inside
/// `export`. Any `export default` adds a `default` entry.
pub fn declared_symbols(program: &Program<'_>) -> Vec<(String, SymbolKind)> {
    let mut collector = DeclarationCollector::default();

    for stmt in &program.body {
        match stmt {
            Statement::VariableDeclaration(decl) => collector.add_variables(decl),
            Statement::ExportNamedDeclaration(export) => {
                if let Some(Declaration::VariableDeclaration(decl)) = &export.declaration {
                    collector.add_variables(decl);
                }
            }
            Statement::ExportDefaultDeclaration(_) => {
                collector.add(DEFAULT_EXPORT, SymbolKind::Default);
            }
            _ => {}
        }
    }

    collector.visit_program(program);
    collector.symbols
}

/// Push every identifier bound by `pattern` (through destructuring and defaults).
pub(crate) fn binding_names(pattern: &BindingPattern<'_>, out: &mut Vec<String>) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => out.push(ident.name.to_string()),
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                binding_names(&property.value, out);
            }
            if let Some(rest) = &object.rest {
                binding_names(&rest.argument, out);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for element in array.elements.iter().flatten() {
                binding_names(element, out);
            }
            if let Some(rest) = &array.rest {
                binding_names(&rest.argument, out);
            }
        }
        BindingPatternKind::AssignmentPattern(assign) => binding_names(&assign.left, out),
    }
}

pub(crate) fn named_function_declaration<'a>(func: &'a Function<'a>) -> Option<&'a str> {
    match func.r#type {
        FunctionType::FunctionDeclaration | FunctionType::TSDeclareFunction => {
            func.id.as_ref().map(|id| id.name.as_str())
        }
        _ => None,
    }
}

pub(crate) fn named_class_declaration<'a>(class: &'a Class<'a>) -> Option<&'a str> {
    match class.r#type {
        ClassType::ClassDeclaration => class.id.as_ref().map(|id| id.name.as_str()),
        ClassType::ClassExpression => None,
    }
}

#[derive(Default)]
struct DeclarationCollector {
    symbols: Vec<(String, SymbolKind)>,
}

impl DeclarationCollector {
    fn add(&mut self, name: &str, kind: SymbolKind) {
        self.symbols.push((name.to_string(), kind));
    }

    fn add_variables(&mut self, decl: &VariableDeclaration<'_>) {
        let mut names = Vec::new();
        for declarator in &decl.declarations {
            binding_names(&declarator.id, &mut names);
        }
        self.symbols
            .extend(names.into_iter().map(|name| (name, SymbolKind::Variable)));
    }
}

impl<'a> Visit<'a> for DeclarationCollector {
    fn visit_function(&mut self, func: &Function<'a>, flags: ScopeFlags) {
        if let Some(name) = named_function_declaration(func) {
            self.add(name, SymbolKind::Function);
        }
        walk::walk_function(self, func, flags);
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        if let Some(name) = named_class_declaration(class) {
            self.add(name, SymbolKind::Class);
        }
        walk::walk_class(self, class);
    }

    fn visit_ts_enum_declaration(&mut self, decl: &TSEnumDeclaration<'a>) {
        self.add(decl.id.name.as_str(), SymbolKind::Enum);
        walk::walk_ts_enum_declaration(self, decl);
    }

    fn visit_ts_interface_declaration(&mut self, decl: &TSInterfaceDeclaration<'a>) {
        self.add(decl.id.name.as_str(), SymbolKind::Interface);
        walk::walk_ts_interface_declaration(self, decl);
    }

    fn visit_ts_type_alias_declaration(&mut self, decl: &TSTypeAliasDeclaration<'a>) {
        self.add(decl.id.name.as_str(), SymbolKind::TypeAlias);
        walk::walk_ts_type_alias_declaration(self, decl);
    }
}
