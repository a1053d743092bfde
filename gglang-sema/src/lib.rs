//! Three-pass semantic analyzer: type registration, member registration +
//! inheritance resolution, then a body walk that checks type compatibility,
//! annotation rules, and deprecation/removal use sites.
//!
//! Each pass only appends to the shared [`DiagnosticBag`]; none of them ever
//! abort the run early — the analyzer always runs to completion so the
//! user sees every problem in one pass.

pub mod annotations;
pub mod builtins;
pub mod class_info;
pub mod scope;
pub mod symbol;

use std::collections::HashSet;

use gglang_ast::{
    ClassDecl, CompilationUnit, ConstructorDecl, Expr, ExprKind, MethodDecl, Param, ResolvedType,
    Stmt, StmtKind, TypeDecl, TypeRef,
};
use gglang_diagnostics::{error_codes, DiagnosticBag, Position};

use annotations::{AnnotationNote, DeprecationTables};
use class_info::{ClassInfo, ClassTable};
use scope::ScopeStack;
use symbol::{Symbol, SymbolKind};

/// The result of a full analysis run: the diagnostic bag plus the populated
/// class table the emitter reads field/method layout from.
pub struct AnalysisResult {
    pub diagnostics: DiagnosticBag,
    pub class_table: ClassTable,
}

/// Runs all three passes over `unit` and returns the populated class table
/// plus every diagnostic collected. `unit` is mutated in place: expression
/// nodes have their `resolved_type` slot filled in by pass 3.
pub fn analyze(unit: &mut CompilationUnit) -> AnalysisResult {
    let mut diagnostics = DiagnosticBag::new();
    let mut class_table = ClassTable::new();
    let mut known_type_names: HashSet<String> = HashSet::new();
    let mut interface_names: HashSet<String> = HashSet::new();
    let deprecation = DeprecationTables::new();

    register_types(unit, &mut diagnostics, &mut class_table, &mut known_type_names, &mut interface_names);
    register_members(unit, &mut diagnostics, &mut class_table, &deprecation);
    resolve_inheritance(&mut diagnostics, &mut class_table, &interface_names);

    let mut analyzer = BodyAnalyzer {
        diagnostics: &mut diagnostics,
        class_table: &class_table,
        deprecation: &deprecation,
        known_type_names: &known_type_names,
    };
    analyzer.walk_unit(unit);

    AnalysisResult { diagnostics, class_table }
}

// ==================== Pass 1: type registration ====================

fn register_types(
    unit: &CompilationUnit,
    diagnostics: &mut DiagnosticBag,
    class_table: &mut ClassTable,
    known_type_names: &mut HashSet<String>,
    interface_names: &mut HashSet<String>,
) {
    for type_decl in &unit.types {
        let name = type_decl.name().to_string();
        if !known_type_names.insert(name.clone()) {
            diagnostics.error(
                error_codes::DUPLICATE_TYPE,
                format!("type `{name}` is already declared at global scope"),
                type_decl.pos().clone(),
            );
            continue;
        }

        match type_decl {
            TypeDecl::Class(class) => {
                validate_annotations(&class.annotations, diagnostics);
                let mut info = ClassInfo::new(name).with_pos(class.pos.clone());
                info.is_abstract = class.modifiers.is_abstract;
                info.is_sealed = class.modifiers.is_sealed;
                class_table.insert(info);
            }
            TypeDecl::Interface(_) => {
                interface_names.insert(name);
            }
            TypeDecl::Enum(_) => {}
        }
    }
}

fn validate_annotations(decl_annotations: &[gglang_ast::Annotation], diagnostics: &mut DiagnosticBag) {
    let mut has_deprecated = false;
    let mut has_removed = false;
    for annotation in decl_annotations {
        if let Some(rule) = annotations::lookup(&annotation.name) {
            let count = annotation.args.len();
            if count < rule.min_args || count > rule.max_args {
                diagnostics.error(
                    error_codes::ANNOTATION_ARITY,
                    format!(
                        "`@{}` expects between {} and {} arguments, found {}",
                        annotation.name, rule.min_args, rule.max_args, count
                    ),
                    annotation.pos.clone(),
                );
            }
        }
        if annotation.name == "Deprecated" {
            has_deprecated = true;
        }
        if annotation.name == "Removed" {
            has_removed = true;
        }
    }
    if has_deprecated && has_removed {
        diagnostics.error(
            error_codes::CONFLICTING_ANNOTATIONS,
            "a declaration cannot be both `@Deprecated` and `@Removed`",
            decl_annotations[0].pos.clone(),
        );
    }
}

// ==================== Pass 2: member registration ====================

fn register_members(
    unit: &CompilationUnit,
    diagnostics: &mut DiagnosticBag,
    class_table: &mut ClassTable,
    deprecation: &DeprecationTables,
) {
    for type_decl in &unit.types {
        let TypeDecl::Class(class) = type_decl else { continue };
        if !class_table.contains(&class.name) {
            // Pass 1 rejected this as a duplicate; nothing to populate.
            continue;
        }

        record_class_annotations(class, deprecation, diagnostics);

        if let Some(info) = class_table.get_mut(&class.name) {
            info.base = class.base.clone();
            info.interfaces = class.interfaces.clone();
        }

        for member in &class.members {
            match member {
                gglang_ast::Member::Field(field) => {
                    validate_annotations(&field.annotations, diagnostics);
                    let info = class_table.get_mut(&class.name).expect("registered in pass 1");
                    if info.fields.contains_key(&field.name) {
                        diagnostics.error(
                            error_codes::DUPLICATE_FIELD,
                            format!("field `{}` is already declared in `{}`", field.name, class.name),
                            field.pos.clone(),
                        );
                    } else {
                        info.fields.insert(field.name.clone(), field.clone());
                    }
                }
                gglang_ast::Member::Method(method) => {
                    validate_annotations(&method.annotations, diagnostics);
                    record_method_annotations(&class.name, method, deprecation, diagnostics);
                    let info = class_table.get_mut(&class.name).expect("registered in pass 1");
                    // Duplicate method names silently keep the first declaration
                    // rather than erroring; this may mask a real overload-resolution
                    // mistake but matches how fields are merged above.
                    info.methods.entry(method.name.clone()).or_insert_with(|| method.clone());
                }
                gglang_ast::Member::Constructor(_) => {
                    let info = class_table.get_mut(&class.name).expect("registered in pass 1");
                    info.has_constructor = true;
                }
            }
        }
    }
}

fn record_class_annotations(class: &ClassDecl, deprecation: &DeprecationTables, diagnostics: &mut DiagnosticBag) {
    for annotation in &class.annotations {
        match annotation.name.as_str() {
            "Deprecated" => {
                let note = AnnotationNote::from_args(&annotation.args);
                diagnostics.info(
                    error_codes::DEPRECATED_DECLARATION,
                    deprecation_message(&class.name, None, &note),
                    annotation.pos.clone(),
                );
                deprecation.deprecated_classes.insert(class.name.clone(), note);
            }
            "Removed" => {
                let note = AnnotationNote::from_args(&annotation.args);
                diagnostics.error(
                    error_codes::REMOVED_DECLARATION,
                    removal_message(&class.name, None, &note),
                    annotation.pos.clone(),
                );
                deprecation.removed_classes.insert(class.name.clone(), note);
            }
            _ => {}
        }
    }
}

fn record_method_annotations(
    class_name: &str,
    method: &MethodDecl,
    deprecation: &DeprecationTables,
    diagnostics: &mut DiagnosticBag,
) {
    let key = annotations::method_key(class_name, &method.name);
    for annotation in &method.annotations {
        match annotation.name.as_str() {
            "Deprecated" => {
                let note = AnnotationNote::from_args(&annotation.args);
                diagnostics.info(
                    error_codes::DEPRECATED_DECLARATION,
                    deprecation_message(class_name, Some(&method.name), &note),
                    annotation.pos.clone(),
                );
                deprecation.deprecated_methods.insert(key.clone(), note);
            }
            "Removed" => {
                let note = AnnotationNote::from_args(&annotation.args);
                diagnostics.error(
                    error_codes::REMOVED_DECLARATION,
                    removal_message(class_name, Some(&method.name), &note),
                    annotation.pos.clone(),
                );
                deprecation.removed_methods.insert(key.clone(), note);
            }
            _ => {}
        }
    }
}

// ==================== Inheritance resolution ====================

fn resolve_inheritance(diagnostics: &mut DiagnosticBag, class_table: &mut ClassTable, interface_names: &HashSet<String>) {
    let names: Vec<String> = class_table.names().map(str::to_string).collect();
    let mut resolved: HashSet<String> = HashSet::new();
    for name in names {
        resolve_class(&name, diagnostics, class_table, &mut resolved, interface_names);
    }
}

/// Resolves `name`'s inheritance chain, visiting the base first. The
/// `resolved` set is the cycle guard: a class already in it is treated as
/// fully resolved and not revisited, so a cycle simply stops propagating at
/// the repeated node instead of recursing forever.
fn resolve_class(
    name: &str,
    diagnostics: &mut DiagnosticBag,
    class_table: &mut ClassTable,
    resolved: &mut HashSet<String>,
    interface_names: &HashSet<String>,
) {
    if resolved.contains(name) {
        return;
    }
    resolved.insert(name.to_string());

    // A `: Name` clause that actually names a declared interface (rather
    // than a class) is an interface implementation, not inheritance — move
    // it into `interfaces` before the undefined-base check below ever sees
    // it, so `class Circle : Shape {}` with `interface Shape {}` resolves
    // cleanly instead of reporting `Shape` as an undefined base class.
    if let Some(info) = class_table.get(name) {
        if let Some(base) = &info.base {
            if interface_names.contains(base) {
                let interface_name = base.clone();
                let info = class_table.get_mut(name).expect("looked up above");
                info.base = None;
                if !info.interfaces.contains(&interface_name) {
                    info.interfaces.push(interface_name);
                }
            }
        }
    }

    let base_name = match class_table.get(name) {
        Some(info) => info.base.clone(),
        None => return,
    };
    let Some(base_name) = base_name else { return };

    if !class_table.contains(&base_name) {
        let pos = class_table.get(name).map(|info| info.pos.clone()).unwrap_or_else(Position::unknown);
        diagnostics.error(
            error_codes::UNDEFINED_BASE_CLASS,
            format!("class `{name}` extends undefined base class `{base_name}`"),
            pos,
        );
        return;
    }

    resolve_class(&base_name, diagnostics, class_table, resolved, interface_names);

    let (base_fields, base_methods, base_interfaces) = {
        let base_info = class_table.get(&base_name).expect("checked above");
        (base_info.fields.clone(), base_info.methods.clone(), base_info.interfaces.clone())
    };

    let info = class_table.get_mut(name).expect("name came from the table");
    for (field_name, field) in base_fields {
        info.fields.entry(field_name).or_insert(field);
    }
    for (method_name, method) in base_methods {
        info.methods.entry(method_name).or_insert(method);
    }
    for interface in base_interfaces {
        if !info.interfaces.contains(&interface) {
            info.interfaces.push(interface);
        }
    }
}

// ==================== Pass 3: body analysis ====================

struct BodyAnalyzer<'a> {
    diagnostics: &'a mut DiagnosticBag,
    class_table: &'a ClassTable,
    deprecation: &'a DeprecationTables,
    known_type_names: &'a HashSet<String>,
}

impl<'a> BodyAnalyzer<'a> {
    fn walk_unit(&mut self, unit: &mut CompilationUnit) {
        for type_decl in &mut unit.types {
            if let TypeDecl::Class(class) = type_decl {
                self.walk_class(class);
            }
        }
    }

    fn walk_class(&mut self, class: &mut ClassDecl) {
        let Some(info) = self.class_table.get(&class.name) else { return };
        let mut scopes = ScopeStack::new();
        scopes.declare(Symbol::new(
            "this",
            SymbolKind::Class,
            ResolvedType::new(&class.name),
            class.pos.clone(),
        ));
        for (field_name, field) in &info.fields {
            scopes.declare(Symbol::new(
                field_name,
                SymbolKind::Field,
                ResolvedType::from_type_ref(&field.field_type),
                field.pos.clone(),
            ));
        }

        for member in &mut class.members {
            match member {
                gglang_ast::Member::Method(method) => self.walk_method(method, &mut scopes),
                gglang_ast::Member::Constructor(ctor) => self.walk_constructor(ctor, &mut scopes),
                gglang_ast::Member::Field(field) => {
                    if let Some(init) = &mut field.init {
                        self.walk_expr(init, &mut scopes);
                    }
                }
            }
        }
    }

    fn walk_method(&mut self, method: &mut MethodDecl, class_scopes: &mut ScopeStack) {
        class_scopes.push();
        self.declare_params(&method.params, class_scopes);
        if let Some(body) = &mut method.body {
            self.walk_block_stmts(body, class_scopes);
        }
        class_scopes.pop();
    }

    fn walk_constructor(&mut self, ctor: &mut ConstructorDecl, class_scopes: &mut ScopeStack) {
        class_scopes.push();
        self.declare_params(&ctor.params, class_scopes);
        if let Some(base_args) = &mut ctor.base_args {
            for arg in base_args {
                self.walk_expr(arg, class_scopes);
            }
        }
        self.walk_block_stmts(&mut ctor.body, class_scopes);
        class_scopes.pop();
    }

    fn declare_params(&mut self, params: &[Param], scopes: &mut ScopeStack) {
        for param in params {
            let symbol = Symbol::new(
                &param.name,
                SymbolKind::Parameter,
                ResolvedType::from_type_ref(&param.param_type),
                param.pos.clone(),
            );
            if !scopes.declare(symbol) {
                self.diagnostics.error(
                    error_codes::DUPLICATE_PARAMETER,
                    format!("parameter `{}` is already declared", param.name),
                    param.pos.clone(),
                );
            }
        }
    }

    fn walk_block_stmts(&mut self, block: &mut gglang_ast::Block, scopes: &mut ScopeStack) {
        scopes.push();
        for stmt in &mut block.stmts {
            self.walk_stmt(stmt, scopes);
        }
        scopes.pop();
    }

    fn walk_stmt(&mut self, stmt: &mut Stmt, scopes: &mut ScopeStack) {
        match &mut stmt.kind {
            StmtKind::Expr(expr) => self.walk_expr(expr, scopes),
            StmtKind::VarDecl { declared_type, name, init } => {
                self.walk_var_decl(declared_type, name, init, &stmt.pos, scopes)
            }
            StmtKind::Block(block) => self.walk_block_stmts(block, scopes),
            StmtKind::If { condition, then_branch, else_branch } => {
                self.walk_expr(condition, scopes);
                self.walk_stmt(then_branch, scopes);
                if let Some(else_branch) = else_branch {
                    self.walk_stmt(else_branch, scopes);
                }
            }
            StmtKind::While { condition, body } => {
                self.walk_expr(condition, scopes);
                self.walk_stmt(body, scopes);
            }
            StmtKind::For { init, condition, step, body } => {
                scopes.push();
                if let Some(init) = init {
                    self.walk_stmt(init, scopes);
                }
                if let Some(condition) = condition {
                    self.walk_expr(condition, scopes);
                }
                if let Some(step) = step {
                    self.walk_expr(step, scopes);
                }
                self.walk_stmt(body, scopes);
                scopes.pop();
            }
            StmtKind::Foreach { var_name, iterable, body } => {
                scopes.push();
                self.walk_expr(iterable, scopes);
                scopes.declare(Symbol::new(
                    var_name.as_str(),
                    SymbolKind::Variable,
                    ResolvedType::object(),
                    stmt.pos.clone(),
                ));
                self.walk_stmt(body, scopes);
                scopes.pop();
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.walk_expr(value, scopes);
                }
            }
            StmtKind::Break | StmtKind::Continue => {}
        }
    }

    fn walk_var_decl(
        &mut self,
        declared_type: &Option<TypeRef>,
        name: &str,
        init: &mut Option<Expr>,
        pos: &Position,
        scopes: &mut ScopeStack,
    ) {
        if let Some(init_expr) = init {
            self.walk_expr(init_expr, scopes);
        }

        let resolved = match (declared_type, init.as_ref()) {
            (Some(declared), Some(init_expr)) => {
                let declared_resolved = ResolvedType::from_type_ref(declared);
                let init_type = self.infer_type(init_expr, scopes);
                if !is_compatible(&declared_resolved, &init_type) {
                    self.diagnostics.error(
                        error_codes::TYPE_MISMATCH,
                        format!(
                            "cannot assign a value of type `{init_type}` to a variable of type `{declared_resolved}`; add an explicit cast"
                        ),
                        pos.clone(),
                    );
                }
                declared_resolved
            }
            (Some(declared), None) => ResolvedType::from_type_ref(declared),
            (None, Some(init_expr)) => self.infer_type(init_expr, scopes),
            (None, None) => {
                self.diagnostics.error(
                    error_codes::MISSING_TYPE_AND_INITIALIZER,
                    format!("variable `{name}` needs either a declared type or an initializer"),
                    pos.clone(),
                );
                ResolvedType::object()
            }
        };

        let symbol = Symbol::new(name, SymbolKind::Variable, resolved, pos.clone());
        if !scopes.declare(symbol) {
            self.diagnostics.error(
                error_codes::DUPLICATE_VARIABLE,
                format!("variable `{name}` is already declared in this scope"),
                pos.clone(),
            );
        }
    }

    fn walk_expr(&mut self, expr: &mut Expr, scopes: &mut ScopeStack) {
        match &mut expr.kind {
            ExprKind::Identifier(name) => self.check_identifier(name, &expr.pos, scopes),
            ExprKind::Unary { operand, .. } => self.walk_expr(operand, scopes),
            ExprKind::IncDec { operand, .. } => self.walk_expr(operand, scopes),
            ExprKind::Binary { left, right, .. } => {
                self.walk_expr(left, scopes);
                self.walk_expr(right, scopes);
            }
            ExprKind::Assign { target, value, .. } => {
                self.walk_expr(target, scopes);
                self.walk_expr(value, scopes);
            }
            ExprKind::Call { callee, args } => {
                self.check_call(callee, &expr.pos, scopes);
                for arg in args {
                    self.walk_expr(arg, scopes);
                }
            }
            ExprKind::MemberAccess { target, .. } => self.walk_expr(target, scopes),
            ExprKind::Index { target, index } => {
                self.walk_expr(target, scopes);
                self.walk_expr(index, scopes);
            }
            ExprKind::New { type_name, args } => {
                self.check_object_creation(type_name, &expr.pos);
                for arg in args {
                    self.walk_expr(arg, scopes);
                }
            }
            ExprKind::NewArray { size, .. } => self.walk_expr(size, scopes),
            ExprKind::Cast { operand, .. } => self.walk_expr(operand, scopes),
            ExprKind::Grouping(inner) => self.walk_expr(inner, scopes),
            ExprKind::IntLiteral(_)
            | ExprKind::LongLiteral(_)
            | ExprKind::FloatLiteral(_)
            | ExprKind::DoubleLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::CharLiteral(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::Null
            | ExprKind::This
            | ExprKind::Base => {}
        }

        let resolved = self.infer_type(expr, scopes);
        expr.resolved_type = Some(resolved);
    }

    /// An identifier that resolves to nothing, isn't a known class name, and
    /// isn't one of the built-in static classes is a warning, not an error —
    /// undefined identifiers are reported but don't fail analysis.
    fn check_identifier(&mut self, name: &str, pos: &Position, scopes: &ScopeStack) {
        if scopes.lookup(name).is_some() {
            return;
        }
        if self.known_type_names.contains(name) || builtins::is_builtin_class(name) {
            return;
        }
        let mut message = format!("undefined identifier `{name}`");
        let candidates: Vec<String> = self.known_type_names.iter().cloned().collect();
        let suggestions = gglang_diagnostics::fuzzy::find_similar_names(name, &candidates, 0.75, 1);
        if let Some(suggestion) = suggestions.first() {
            message.push_str(&format!(" (did you mean `{suggestion}`?)"));
        }
        self.diagnostics.warning(error_codes::UNDEFINED_IDENTIFIER, message, pos.clone());
    }

    /// When a call's callee is a member access, figures out the target's
    /// static class name (from a local/parameter/field type or a bare class
    /// name reference) and checks it against the deprecated/removed tables.
    fn check_call(&mut self, callee: &Expr, pos: &Position, scopes: &ScopeStack) {
        let ExprKind::MemberAccess { target, member } = &callee.kind else { return };
        let Some(class_name) = self.static_class_name(target, scopes) else { return };

        let key = annotations::method_key(&class_name, member);
        if let Some(note) = self.deprecation.removed_methods.get(&key) {
            self.diagnostics.error(
                error_codes::USE_OF_REMOVED,
                removal_message(&class_name, Some(member), &note),
                pos.clone(),
            );
        } else if let Some(note) = self.deprecation.deprecated_methods.get(&key) {
            self.diagnostics.warning(
                error_codes::USE_OF_DEPRECATED,
                deprecation_message(&class_name, Some(member), &note),
                pos.clone(),
            );
        }
    }

    fn check_object_creation(&mut self, type_name: &str, pos: &Position) {
        if let Some(note) = self.deprecation.removed_classes.get(type_name) {
            self.diagnostics.error(
                error_codes::USE_OF_REMOVED,
                removal_message(type_name, None, &note),
                pos.clone(),
            );
        } else if let Some(note) = self.deprecation.deprecated_classes.get(type_name) {
            self.diagnostics.warning(
                error_codes::USE_OF_DEPRECATED,
                deprecation_message(type_name, None, &note),
                pos.clone(),
            );
        }

        if !self.known_type_names.contains(type_name) && !builtins::is_builtin_class(type_name) {
            self.diagnostics.warning(
                error_codes::UNKNOWN_TYPE_IN_NEW,
                format!("`{type_name}` is not a declared class"),
                pos.clone(),
            );
        }
    }

    /// Best-effort static type name for a call target: `this`, a field/local
    /// reference, or a bare reference to a known class name used as a
    /// static-method receiver.
    fn static_class_name(&self, expr: &Expr, scopes: &ScopeStack) -> Option<String> {
        match &expr.kind {
            ExprKind::This => scopes.lookup("this").map(|s| s.declared_type.name.clone()),
            ExprKind::Identifier(name) => {
                if let Some(symbol) = scopes.lookup(name) {
                    Some(symbol.declared_type.name.clone())
                } else if self.known_type_names.contains(name) || builtins::is_builtin_class(name) {
                    Some(name.clone())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Infers the static type of an expression node.
    fn infer_type(&self, expr: &Expr, scopes: &ScopeStack) -> ResolvedType {
        match &expr.kind {
            ExprKind::IntLiteral(_) => ResolvedType::new("int"),
            ExprKind::LongLiteral(_) => ResolvedType::new("long"),
            ExprKind::FloatLiteral(_) => ResolvedType::new("float"),
            ExprKind::DoubleLiteral(_) => ResolvedType::new("double"),
            ExprKind::StringLiteral(_) => ResolvedType::new("string"),
            ExprKind::CharLiteral(_) => ResolvedType::new("char"),
            ExprKind::BoolLiteral(_) => ResolvedType::new("bool"),
            ExprKind::Null => ResolvedType::nullable("object"),
            ExprKind::New { type_name, .. } => ResolvedType::new(type_name),
            ExprKind::NewArray { element_type, .. } => ResolvedType::array_of(&element_type.name),
            ExprKind::Identifier(name) => match scopes.lookup(name) {
                Some(symbol) => symbol.declared_type.clone(),
                None => ResolvedType::object(),
            },
            ExprKind::Grouping(inner) => inner.resolved_type.clone().unwrap_or_else(ResolvedType::object),
            _ => ResolvedType::object(),
        }
    }
}

fn deprecation_message(class_name: &str, method: Option<&str>, note: &AnnotationNote) -> String {
    let subject = match method {
        Some(m) => format!("{class_name}.{m}"),
        None => class_name.to_string(),
    };
    let mut message = format!("`{subject}` is deprecated");
    if let Some(text) = &note.message {
        message.push_str(&format!(": {text}"));
    }
    if let Some(version) = &note.version {
        message.push_str(&format!(" (scheduled for removal in {version})"));
    }
    message
}

fn removal_message(class_name: &str, method: Option<&str>, note: &AnnotationNote) -> String {
    let subject = match method {
        Some(m) => format!("{class_name}.{m}"),
        None => class_name.to_string(),
    };
    let mut message = format!("`{subject}` has been removed");
    if let Some(text) = &note.message {
        message.push_str(&format!(": {text}"));
    }
    if let Some(version) = &note.version {
        message.push_str(&format!(" (removed in {version})"));
    }
    message
}

/// Declared-type vs. initializer-type compatibility.
fn is_compatible(declared: &ResolvedType, init: &ResolvedType) -> bool {
    if declared.is_object() || declared.is_void() || init.is_object() || init.is_void() {
        return true;
    }
    if declared.is_array != init.is_array {
        return false;
    }
    if declared.name == init.name {
        return true;
    }
    if declared.is_numeric() && init.is_numeric() && gglang_ast::widens_to(&init.name, &declared.name) {
        return true;
    }
    if init.is_nullable && !declared.is_primitive() {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze_source(source: &str) -> (CompilationUnit, AnalysisResult) {
        let (mut unit, parse_diags) = gglang_parser::parse(source, None);
        assert!(!parse_diags.has_errors(), "unexpected parse errors: {:?}", parse_diags.diagnostics());
        let result = analyze(&mut unit);
        (unit, result)
    }

    #[test]
    fn duplicate_top_level_type_is_an_error() {
        let (_, result) = analyze_source("class Dog {} class Dog {}");
        assert_eq!(result.diagnostics.error_count(), 1);
    }

    #[test]
    fn undefined_base_class_is_an_error() {
        let (_, result) = analyze_source("class Dog : Animal {}");
        assert!(result
            .diagnostics
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("undefined base class")));
    }

    #[test]
    fn class_with_sole_interface_base_is_not_an_undefined_base_class() {
        let (_, result) = analyze_source(
            r#"
            interface Shape { double area(); }
            class Circle : Shape {
                double area() { return 0.0; }
            }
            "#,
        );
        assert!(!result.diagnostics.has_errors());
        let circle = result.class_table.get("Circle").unwrap();
        assert!(circle.base.is_none());
        assert!(circle.interfaces.contains(&"Shape".to_string()));
    }

    #[test]
    fn inherited_fields_are_copied_without_collision() {
        let (_, result) = analyze_source(
            r#"
            class Animal { string name; }
            class Dog : Animal { string breed; }
            "#,
        );
        assert!(!result.diagnostics.has_errors());
        let dog = result.class_table.get("Dog").unwrap();
        assert!(dog.fields.contains_key("name"));
        assert!(dog.fields.contains_key("breed"));
    }

    #[test]
    fn derived_declared_field_shadows_base_field_without_error() {
        let (_, result) = analyze_source(
            r#"
            class Animal { string name; }
            class Dog : Animal { int name; }
            "#,
        );
        assert!(!result.diagnostics.has_errors());
        let dog = result.class_table.get("Dog").unwrap();
        assert_eq!(dog.fields.get("name").unwrap().field_type.name, "int");
    }

    #[test]
    fn cyclic_inheritance_does_not_infinite_loop() {
        let (_, result) = analyze_source("class A : B {} class B : A {}");
        // Each class is visited at most once; no crash, no hang.
        assert!(result.class_table.contains("A"));
        assert!(result.class_table.contains("B"));
    }

    #[test]
    fn type_mismatch_names_both_types() {
        let (_, result) = analyze_source(
            r#"
            class C {
                void run() {
                    int a = "teste";
                }
            }
            "#,
        );
        let msg = &result.diagnostics.diagnostics()[0].message;
        assert!(msg.contains("string"));
        assert!(msg.contains("int"));
    }

    #[test]
    fn widening_int_to_double_is_accepted() {
        let (_, result) = analyze_source(
            r#"
            class C {
                void run() {
                    double d = 42;
                }
            }
            "#,
        );
        assert!(!result.diagnostics.has_errors());
    }

    #[test]
    fn narrowing_without_cast_is_rejected() {
        let (_, result) = analyze_source(
            r#"
            class C {
                void run() {
                    int x = 3.14;
                }
            }
            "#,
        );
        assert!(result.diagnostics.has_errors());
    }

    #[test]
    fn library_annotation_wrong_arity_errors() {
        let (_, result) = analyze_source(r#"[@Library("M")] class C {}"#);
        assert!(result
            .diagnostics
            .diagnostics()
            .iter()
            .any(|d| d.code == error_codes::ANNOTATION_ARITY));
    }

    #[test]
    fn library_annotation_correct_arity_is_clean() {
        let (_, result) = analyze_source(r#"[@Library("M", "1.0")] class C {}"#);
        assert!(!result.diagnostics.has_errors());
    }

    #[test]
    fn deprecated_and_removed_together_is_an_error() {
        let (_, result) = analyze_source("[@Deprecated] [@Removed] class C {}");
        assert!(result
            .diagnostics
            .diagnostics()
            .iter()
            .any(|d| d.code == error_codes::CONFLICTING_ANNOTATIONS));
    }

    #[test]
    fn removed_class_errors_at_declaration_and_use_site() {
        let (_, result) = analyze_source(
            r#"
            [@Removed("no longer supported")]
            class Old {}
            class C {
                void run() {
                    var x = new Old();
                }
            }
            "#,
        );
        let use_site_errors = result
            .diagnostics
            .diagnostics()
            .iter()
            .filter(|d| d.code == error_codes::USE_OF_REMOVED)
            .count();
        let declaration_errors = result
            .diagnostics
            .diagnostics()
            .iter()
            .filter(|d| d.code == error_codes::REMOVED_DECLARATION)
            .count();
        assert_eq!(declaration_errors, 1);
        assert_eq!(use_site_errors, 1);
    }

    #[test]
    fn deprecated_class_emits_info_at_declaration_and_warning_at_use_site() {
        let (_, result) = analyze_source(
            r#"
            [@Deprecated("use New instead")]
            class Old {}
            class C {
                void run() {
                    var x = new Old();
                }
            }
            "#,
        );
        assert!(!result.diagnostics.has_errors());
        assert_eq!(result.diagnostics.info_count(), 1);
        assert!(result
            .diagnostics
            .diagnostics()
            .iter()
            .any(|d| d.code == error_codes::USE_OF_DEPRECATED));
    }

    #[test]
    fn duplicate_method_name_silently_keeps_first() {
        let (_, result) = analyze_source(
            r#"
            class C {
                int add(int a, int b) { return a; }
                string add(string a, string b) { return a; }
            }
            "#,
        );
        assert!(!result.diagnostics.has_errors());
        let c = result.class_table.get("C").unwrap();
        assert_eq!(c.methods.get("add").unwrap().return_type.name, "int");
    }

    #[test]
    fn undefined_identifier_is_a_warning_not_an_error() {
        let (_, result) = analyze_source(
            r#"
            class C {
                void run() {
                    foo(bar);
                }
            }
            "#,
        );
        assert!(!result.diagnostics.has_errors());
        assert!(result.diagnostics.warning_count() > 0);
    }

    #[test]
    fn duplicate_field_is_an_error() {
        let (_, result) = analyze_source("class C { int x; string x; }");
        assert_eq!(
            result
                .diagnostics
                .diagnostics()
                .iter()
                .filter(|d| d.code == error_codes::DUPLICATE_FIELD)
                .count(),
            1
        );
    }

    #[test]
    fn duplicate_parameter_is_an_error() {
        let (_, result) = analyze_source("class C { void run(int a, int a) {} }");
        assert!(result
            .diagnostics
            .diagnostics()
            .iter()
            .any(|d| d.code == error_codes::DUPLICATE_PARAMETER));
    }
}
