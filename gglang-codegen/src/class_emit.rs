//! Per-class C emission: forward typedefs, struct layout (vtable pointer
//! first, base fields embedded as a literal prefix), the static vtable
//! instance with thin casting wrappers for inherited-not-overridden
//! virtuals, and the constructor/factory pair.

use std::collections::{HashMap, HashSet};

use gglang_ast::{ClassDecl, CompilationUnit, Member, MethodDecl, Param, TypeDecl, TypeRef};
use gglang_sema::class_info::ClassTable;

use crate::ctx::FunctionCtx;
use crate::ctype::{c_type, scalar_c_type};
use crate::stmt_emit::emit_function_body;

pub fn class_decls(unit: &CompilationUnit) -> Vec<&ClassDecl> {
    unit.types
        .iter()
        .filter_map(|t| match t {
            TypeDecl::Class(c) => Some(c),
            _ => None,
        })
        .collect()
}

pub fn build_decl_map<'a>(classes: &[&'a ClassDecl]) -> HashMap<String, &'a ClassDecl> {
    classes.iter().map(|c| (c.name.clone(), *c)).collect()
}

/// Field layout order for `name`: the base's resolved order first (with any
/// same-named field substituted by this class's own redeclaration, kept at
/// the base's position), then this class's own new fields in declaration
/// order.
pub fn field_order(
    decl_map: &HashMap<String, &ClassDecl>,
    class_table: &ClassTable,
    name: &str,
) -> Vec<(String, TypeRef)> {
    let Some(decl) = decl_map.get(name) else { return Vec::new() };

    let mut order = match &decl.base {
        Some(base) if decl_map.contains_key(base.as_str()) => field_order(decl_map, class_table, base),
        _ => Vec::new(),
    };

    let own: Vec<(String, TypeRef)> = decl
        .members
        .iter()
        .filter_map(|m| match m {
            Member::Field(f) => Some((f.name.clone(), f.field_type.clone())),
            _ => None,
        })
        .collect();
    let own_map: HashMap<&str, &TypeRef> = own.iter().map(|(n, t)| (n.as_str(), t)).collect();

    for (field_name, field_type) in order.iter_mut() {
        if let Some(shadow) = own_map.get(field_name.as_str()) {
            *field_type = (*shadow).clone();
        }
    }
    let already: HashSet<&str> = order.iter().map(|(n, _)| n.as_str()).collect();
    for (field_name, field_type) in &own {
        if !already.contains(field_name.as_str()) {
            order.push((field_name.clone(), field_type.clone()));
        }
    }
    order
}

/// Virtual-dispatch slot order: the base's order as a literal prefix, then
/// any newly-introduced virtual/override slot names (sorted for
/// determinism — `ClassInfo::methods` is a `HashMap` and carries no
/// source order of its own).
pub fn vtable_slot_order(class_table: &ClassTable, class_name: &str) -> Vec<String> {
    let Some(info) = class_table.get(class_name) else { return Vec::new() };
    let mut order = match &info.base {
        Some(base) if class_table.contains(base) => vtable_slot_order(class_table, base),
        _ => Vec::new(),
    };
    let existing: HashSet<&str> = order.iter().map(String::as_str).collect();
    let mut new_slots: Vec<String> = info
        .methods
        .iter()
        .filter(|(name, m)| (m.modifiers.is_virtual || m.modifiers.is_override) && !existing.contains(name.as_str()))
        .map(|(name, _)| name.clone())
        .collect();
    new_slots.sort();
    order.extend(new_slots);
    order
}

/// Walks from `start` up the `base` chain to find the nearest ancestor (or
/// `start` itself) that declares `method_name` directly in its own member
/// list — as opposed to having it only by inheritance-copy in the merged
/// `ClassInfo.methods` map.
pub fn providing_class(
    decl_map: &HashMap<String, &ClassDecl>,
    class_table: &ClassTable,
    start: &str,
    method_name: &str,
) -> Option<String> {
    let mut current = Some(start.to_string());
    while let Some(name) = current {
        if let Some(decl) = decl_map.get(&name) {
            let owns = decl.members.iter().any(|m| matches!(m, Member::Method(md) if md.name == method_name));
            if owns {
                return Some(name);
            }
        }
        current = class_table.get(&name).and_then(|info| info.base.clone());
    }
    None
}

/// Own method names in declaration order, deduplicated — a class that
/// (incorrectly) declares two methods with the same name only gets one
/// prototype/implementation pair, matching `gglang-sema`'s "first wins"
/// duplicate-method resolution.
fn own_method_names(decl: &ClassDecl) -> Vec<String> {
    let mut seen = HashSet::new();
    decl.members
        .iter()
        .filter_map(|m| match m {
            Member::Method(md) => Some(md.name.clone()),
            _ => None,
        })
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

fn method_return_c(method: &MethodDecl) -> String {
    c_type(&gglang_ast::ResolvedType::from_type_ref(&method.return_type))
}

fn params_c(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", scalar_param_c_type(&p.param_type), p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn scalar_param_c_type(type_ref: &TypeRef) -> String {
    c_type(&gglang_ast::ResolvedType::from_type_ref(type_ref))
}

fn arg_names(params: &[Param]) -> String {
    params.iter().map(|p| p.name.clone()).collect::<Vec<_>>().join(", ")
}

pub fn emit_forward_decls(classes: &[&ClassDecl]) -> String {
    let mut out = String::new();
    for class in classes {
        out.push_str(&format!("typedef struct {0} {0};\n", class.name));
        out.push_str(&format!("typedef struct {0}_VTable {0}_VTable;\n", class.name));
    }
    out.push('\n');
    out
}

pub fn emit_struct_defs(
    classes: &[&ClassDecl],
    class_table: &ClassTable,
    decl_map: &HashMap<String, &ClassDecl>,
) -> String {
    let mut out = String::new();
    for class in classes {
        let slots = vtable_slot_order(class_table, &class.name);
        out.push_str(&format!("struct {}_VTable {{\n", class.name));
        for slot in &slots {
            let provider = providing_class(decl_map, class_table, &class.name, slot);
            let method = provider
                .as_deref()
                .and_then(|p| class_table.get(p))
                .and_then(|info| info.methods.get(slot))
                .or_else(|| class_table.get(&class.name).and_then(|info| info.methods.get(slot)));
            if let Some(method) = method {
                let ret = method_return_c(method);
                let params = params_c(&method.params);
                let sep = if params.is_empty() { "" } else { ", " };
                out.push_str(&format!("    {ret} (*{slot})({}* self{sep}{params});\n", class.name));
            }
        }
        out.push_str("};\n\n");

        out.push_str(&format!("struct {} {{\n", class.name));
        out.push_str(&format!("    {}_VTable* vtable;\n", class.name));
        for (field_name, field_type) in field_order(decl_map, class_table, &class.name) {
            out.push_str(&format!("    {} {};\n", scalar_param_c_type(&field_type), field_name));
        }
        out.push_str("};\n\n");
    }
    out
}

pub fn emit_prototypes(
    classes: &[&ClassDecl],
    class_table: &ClassTable,
    decl_map: &HashMap<String, &ClassDecl>,
) -> String {
    let mut out = String::new();
    for class in classes {
        let Some(info) = class_table.get(&class.name) else { continue };

        out.push_str(&format!("void {0}_construct({0}* self", class.name));
        if let Some(ctor) = own_constructor(class) {
            if !ctor.params.is_empty() {
                out.push_str(", ");
                out.push_str(&params_c(&ctor.params));
            }
        }
        out.push_str(");\n");
        out.push_str(&format!("{0}* {0}_create(", class.name));
        if let Some(ctor) = own_constructor(class) {
            out.push_str(&params_c(&ctor.params));
        }
        out.push_str(");\n");

        for slot in vtable_slot_order(class_table, &class.name) {
            let provider = providing_class(decl_map, class_table, &class.name, &slot);
            if provider.as_deref() == Some(class.name.as_str()) {
                continue;
            }
            if let Some(method) = info.methods.get(&slot) {
                let ret = method_return_c(method);
                let params = params_c(&method.params);
                let sep = if params.is_empty() { "" } else { ", " };
                out.push_str(&format!("static {ret} {0}_{slot}_wrapper({0}* self{sep}{params});\n", class.name));
            }
        }

        for name in own_method_names(class) {
            if let Some(method) = info.methods.get(&name) {
                out.push_str(&prototype_line(&class.name, method));
            }
        }
        out.push('\n');
    }
    out
}

fn prototype_line(class_name: &str, method: &MethodDecl) -> String {
    let ret = method_return_c(method);
    if method.modifiers.is_static {
        format!("{ret} {class_name}_{}({});\n", method.name, params_c(&method.params))
    } else {
        let params = params_c(&method.params);
        let sep = if params.is_empty() { "" } else { ", " };
        format!("{ret} {class_name}_{}({class_name}* self{sep}{params});\n", method.name)
    }
}

fn own_constructor(class: &ClassDecl) -> Option<&gglang_ast::ConstructorDecl> {
    class.members.iter().find_map(|m| match m {
        Member::Constructor(c) => Some(c),
        _ => None,
    })
}

pub fn emit_implementations(
    classes: &[&ClassDecl],
    class_table: &ClassTable,
    decl_map: &HashMap<String, &ClassDecl>,
) -> String {
    let mut out = String::new();
    for class in classes {
        let Some(info) = class_table.get(&class.name) else { continue };

        // Wrapper bodies for inherited, non-overridden virtuals.
        for slot in vtable_slot_order(class_table, &class.name) {
            let Some(provider) = providing_class(decl_map, class_table, &class.name, &slot) else { continue };
            if provider == class.name {
                continue;
            }
            let Some(method) = info.methods.get(&slot) else { continue };
            let ret = method_return_c(method);
            let params = params_c(&method.params);
            let sep = if params.is_empty() { "" } else { ", " };
            let call_args = arg_names(&method.params);
            let call_sep = if call_args.is_empty() { "" } else { ", " };
            let maybe_return = if ret == "void" { "" } else { "return " };
            out.push_str(&format!(
                "static {ret} {0}_{slot}_wrapper({0}* self{sep}{params}) {{\n    {maybe_return}{provider}_{slot}(({provider}*)self{call_sep}{call_args});\n}}\n\n",
                class.name
            ));
        }

        // Static vtable instance.
        let slots = vtable_slot_order(class_table, &class.name);
        out.push_str(&format!("{0}_VTable {0}_vtable_instance = {{\n", class.name));
        for slot in &slots {
            let provider = providing_class(decl_map, class_table, &class.name, slot);
            let value = match provider {
                Some(p) if p == class.name => format!("{}_{}", class.name, slot),
                Some(_) => format!("{}_{}_wrapper", class.name, slot),
                None => "NULL".to_string(),
            };
            out.push_str(&format!("    .{slot} = {value},\n"));
        }
        out.push_str("};\n\n");

        out.push_str(&emit_constructor(class, class_table));
        out.push_str(&emit_factory(class));

        for name in own_method_names(class) {
            if let Some(method_decl) = class.members.iter().find_map(|m| match m {
                Member::Method(md) if md.name == name => Some(md),
                _ => None,
            }) {
                out.push_str(&emit_method(class, method_decl, class_table));
            }
        }
    }
    out
}

fn emit_constructor(class: &ClassDecl, class_table: &ClassTable) -> String {
    let ctor = own_constructor(class);
    let params: Vec<Param> = ctor.map(|c| c.params.clone()).unwrap_or_default();
    let params_text = params_c(&params);
    let sep = if params_text.is_empty() { "" } else { ", " };

    let mut out = format!("void {0}_construct({0}* self{sep}{params_text}) {{\n", class.name);

    if let Some(base) = class_table.get(&class.name).and_then(|info| info.base.clone()) {
        let mut ctx = FunctionCtx::new(class_table, Some(class.name.clone()));
        for param in &params {
            ctx.declare_local(&param.name, gglang_ast::ResolvedType::from_type_ref(&param.param_type));
        }
        let base_args_text: Vec<String> = match ctor.and_then(|c| c.base_args.as_ref()) {
            Some(args) => args.iter().map(|a| crate::expr_emit::lower_expr(a, &mut ctx)).collect(),
            None => Vec::new(),
        };
        let base_sep = if base_args_text.is_empty() { "" } else { ", " };
        out.push_str(&format!(
            "    {base}_construct(({base}*)self{base_sep}{});\n",
            base_args_text.join(", ")
        ));
    }
    out.push_str(&format!("    self->vtable = &{}_vtable_instance;\n", class.name));

    if let Some(ctor) = ctor {
        let mut ctx = FunctionCtx::new(class_table, Some(class.name.clone()));
        for param in &ctor.params {
            ctx.declare_local(&param.name, gglang_ast::ResolvedType::from_type_ref(&param.param_type));
        }
        out.push_str(&emit_function_body(&ctor.body, &mut ctx, "void", &ctor.params));
    }
    out.push_str("}\n\n");
    out
}

fn emit_factory(class: &ClassDecl) -> String {
    let ctor = own_constructor(class);
    let params: Vec<Param> = ctor.map(|c| c.params.clone()).unwrap_or_default();
    let params_text = params_c(&params);
    let args_text = arg_names(&params);
    let sep = if args_text.is_empty() { "" } else { ", " };
    format!(
        "{0}* {0}_create({params_text}) {{\n    {0}* self = ({0}*)gg_alloc(sizeof({0}));\n    {0}_construct(self{sep}{args_text});\n    return self;\n}}\n\n",
        class.name
    )
}

fn emit_method(class: &ClassDecl, method: &MethodDecl, class_table: &ClassTable) -> String {
    let ret = method_return_c(method);
    let mut ctx = FunctionCtx::new(class_table, Some(class.name.clone()));
    for param in &method.params {
        ctx.declare_local(&param.name, gglang_ast::ResolvedType::from_type_ref(&param.param_type));
    }
    let signature = if method.modifiers.is_static {
        format!("{ret} {}_{}({})", class.name, method.name, params_c(&method.params))
    } else {
        let params = params_c(&method.params);
        let sep = if params.is_empty() { "" } else { ", " };
        format!("{ret} {}_{}({}* self{sep}{params})", class.name, method.name, class.name)
    };
    let Some(body) = &method.body else {
        return format!("{signature} {{\n}}\n\n");
    };
    let body_text = emit_function_body(body, &mut ctx, &ret, &method.params);
    format!("{signature} {{\n{body_text}}}\n\n")
}
