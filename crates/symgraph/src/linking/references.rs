//! Reference collection for symbol-level edges.
//!
//! Uses of imported bindings come from oxc's semantic analysis: only
//! references that resolve to the import's own symbol count, so a parameter
//! or local that shadows an import is not a use. Each use is attributed to
//! the nearest enclosing named declaration. Literal `import()` and
//! `require()` specifiers are collected from the same node list.

use rustc_hash::{FxHashMap, FxHashSet};

use oxc_ast::AstKind;
use oxc_ast::ast::{
    Argument, BindingPatternKind, Declaration, Expression, Program, Statement,
    VariableDeclaration,
};
use oxc_semantic::{AstNodes, NodeId, SemanticBuilder};
use oxc_span::Span;

use crate::discovery::{named_class_declaration, named_function_declaration};

/// One use of an import binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingUse {
    pub binding: String,
    /// Nearest enclosing named function or class declaration, or module-level
    /// variable declarator.
    pub enclosing: Option<String>,
}

#[derive(Debug, Default)]
pub struct References {
    pub uses: FxHashSet<BindingUse>,
    /// Literal specifiers of `import('..')` and `require('..')`, in source order.
    pub dynamic_imports: Vec<String>,
}

/// Collect uses of the top-level `bindings` and dynamic import specifiers
/// from `program`.
pub fn collect_references(program: &Program<'_>, bindings: &FxHashSet<String>) -> References {
    let semantic = SemanticBuilder::new().build(program).semantic;
    let scoping = semantic.scoping();
    let nodes = semantic.nodes();
    let declarators = module_declarators(program);

    let mut references = References::default();
    for binding in bindings {
        let Some(symbol_id) = scoping.get_root_binding(binding) else {
            continue;
        };
        for &reference_id in scoping.get_resolved_reference_ids(symbol_id) {
            let node_id = scoping.get_reference(reference_id).node_id();
            references.uses.insert(BindingUse {
                binding: binding.clone(),
                enclosing: enclosing_declaration(nodes, node_id, &declarators),
            });
        }
    }

    for node in nodes.iter() {
        let specifier = match node.kind() {
            AstKind::ImportExpression(expr) => match &expr.source {
                Expression::StringLiteral(lit) => Some(lit.value.as_str()),
                _ => None,
            },
            AstKind::CallExpression(call) => match (&call.callee, call.arguments.first()) {
                (Expression::Identifier(callee), Some(Argument::StringLiteral(lit)))
                    if callee.name.as_str() == "require" =>
                {
                    Some(lit.value.as_str())
                }
                _ => None,
            },
            _ => None,
        };
        if let Some(specifier) = specifier {
            references.dynamic_imports.push(specifier.to_string());
        }
    }

    references
}

/// Spans of module-level declarators that bind a plain identifier.
fn module_declarators(program: &Program<'_>) -> FxHashMap<Span, String> {
    let mut declarators = FxHashMap::default();
    let mut add = |decl: &VariableDeclaration<'_>| {
        for declarator in &decl.declarations {
            if let BindingPatternKind::BindingIdentifier(ident) = &declarator.id.kind {
                declarators.insert(declarator.span, ident.name.to_string());
            }
        }
    };

    for stmt in &program.body {
        match stmt {
            Statement::VariableDeclaration(decl) => add(decl),
            Statement::ExportNamedDeclaration(export) => {
                if let Some(Declaration::VariableDeclaration(decl)) = &export.declaration {
                    add(decl);
                }
            }
            _ => {}
        }
    }
    declarators
}

fn enclosing_declaration(
    nodes: &AstNodes<'_>,
    node_id: NodeId,
    declarators: &FxHashMap<Span, String>,
) -> Option<String> {
    nodes.ancestor_ids(node_id).find_map(|id| match nodes.kind(id) {
        AstKind::Function(func) => named_function_declaration(func).map(str::to_string),
        AstKind::Class(class) => named_class_declaration(class).map(str::to_string),
        AstKind::VariableDeclarator(decl) => declarators.get(&decl.span).cloned(),
        _ => None,
    })
}
