//! Statement lowering, including the GC root-frame bracket that wraps every
//! function body and the write-barrier hook on top-level reference
//! assignments.

use gglang_ast::{AssignOp, Block, Expr, ExprKind, Param, ResolvedType, Stmt, StmtKind};

use crate::ctx::FunctionCtx;
use crate::ctype::{c_type, is_reference_type};
use crate::expr_emit::{lower_expr, write_barrier_target};

const INDENT: &str = "    ";

fn indent(level: usize) -> String {
    INDENT.repeat(level)
}

/// Emits a whole function body: pushes a GC root frame, registers every
/// reference-typed parameter as a root (parameters are declared by the
/// caller before this runs, but never get the `gg_gc_add_root` call
/// `emit_var_decl` gives locals — they need it just as much), emits the
/// statements, and pops the frame before any fall-through exit. Early
/// `return`s pop the frame themselves (see `emit_stmt`'s `Return` arm).
pub fn emit_function_body(block: &Block, ctx: &mut FunctionCtx, return_c_type: &str, params: &[Param]) -> String {
    let mut out = String::new();
    out.push_str(&indent(1));
    out.push_str("void* __gg_frame = gg_gc_push_root_frame();\n");
    for param in params {
        let resolved = ResolvedType::from_type_ref(&param.param_type);
        if is_reference_type(&resolved) {
            out.push_str(&indent(1));
            out.push_str(&format!("gg_gc_add_root((void**)&{});\n", param.name));
        }
    }
    out.push_str(&emit_block_stmts(block, ctx, 1, return_c_type));
    out.push_str(&indent(1));
    out.push_str("gg_gc_pop_root_frame(__gg_frame);\n");
    out
}

fn emit_block_stmts(block: &Block, ctx: &mut FunctionCtx, level: usize, return_c_type: &str) -> String {
    let mut out = String::new();
    for stmt in &block.stmts {
        out.push_str(&emit_stmt(stmt, ctx, level, return_c_type));
    }
    out
}

fn emit_stmt(stmt: &Stmt, ctx: &mut FunctionCtx, level: usize, return_c_type: &str) -> String {
    let pad = indent(level);
    match &stmt.kind {
        StmtKind::Expr(expr) => format!("{pad}{};\n", emit_top_level_expr(expr, ctx)),
        StmtKind::VarDecl { declared_type, name, init } => {
            emit_var_decl(declared_type, name, init.as_ref(), ctx, level)
        }
        StmtKind::Block(block) => {
            let mut out = format!("{pad}{{\n");
            out.push_str(&emit_block_stmts(block, ctx, level + 1, return_c_type));
            out.push_str(&format!("{pad}}}\n"));
            out
        }
        StmtKind::If { condition, then_branch, else_branch } => {
            let cond_text = lower_expr(condition, ctx);
            let mut out = format!("{pad}if ({cond_text}) {{\n");
            out.push_str(&emit_branch_body(then_branch, ctx, level + 1, return_c_type));
            out.push_str(&format!("{pad}}}"));
            if let Some(else_stmt) = else_branch {
                out.push_str(" else ");
                if matches!(else_stmt.kind, StmtKind::If { .. }) {
                    out.push_str(emit_stmt(else_stmt, ctx, 0, return_c_type).trim_start());
                } else {
                    out.push_str("{\n");
                    out.push_str(&emit_branch_body(else_stmt, ctx, level + 1, return_c_type));
                    out.push_str(&format!("{pad}}}\n"));
                }
            } else {
                out.push('\n');
            }
            out
        }
        StmtKind::While { condition, body } => {
            let cond_text = lower_expr(condition, ctx);
            let mut out = format!("{pad}while ({cond_text}) {{\n");
            out.push_str(&emit_branch_body(body, ctx, level + 1, return_c_type));
            out.push_str(&format!("{pad}}}\n"));
            out
        }
        StmtKind::For { init, condition, step, body } => {
            let init_text = init
                .as_ref()
                .map(|s| emit_for_clause(s, ctx))
                .unwrap_or_default();
            let cond_text = condition.as_ref().map(|c| lower_expr(c, ctx)).unwrap_or_default();
            let step_text = step.as_ref().map(|s| lower_expr(s, ctx)).unwrap_or_default();
            let mut out = format!("{pad}for ({init_text}; {cond_text}; {step_text}) {{\n");
            out.push_str(&emit_branch_body(body, ctx, level + 1, return_c_type));
            out.push_str(&format!("{pad}}}\n"));
            out
        }
        StmtKind::Foreach { var_name, iterable, body } => emit_foreach(var_name, iterable, body, ctx, level, return_c_type),
        StmtKind::Return(value) => emit_return(value.as_ref(), ctx, level, return_c_type),
        StmtKind::Break => format!("{pad}break;\n"),
        StmtKind::Continue => format!("{pad}continue;\n"),
    }
}

fn emit_branch_body(stmt: &Stmt, ctx: &mut FunctionCtx, level: usize, return_c_type: &str) -> String {
    match &stmt.kind {
        StmtKind::Block(block) => emit_block_stmts(block, ctx, level, return_c_type),
        _ => emit_stmt(stmt, ctx, level, return_c_type),
    }
}

fn emit_for_clause(stmt: &Stmt, ctx: &mut FunctionCtx) -> String {
    match &stmt.kind {
        StmtKind::VarDecl { declared_type, name, init } => {
            let resolved = var_decl_type(declared_type, init.as_ref());
            ctx.declare_local(name, resolved.clone());
            let c_ty = c_type(&resolved);
            let init_text = init
                .as_ref()
                .map(|e| lower_expr(e, ctx))
                .unwrap_or_else(|| default_value(&resolved));
            format!("{c_ty} {name} = {init_text}")
        }
        StmtKind::Expr(expr) => lower_expr(expr, ctx),
        _ => String::new(),
    }
}

/// Top-level-statement assignments to a reference-typed target go through
/// the write-barrier hook rather than a plain C `=`.
fn emit_top_level_expr(expr: &Expr, ctx: &mut FunctionCtx) -> String {
    if let ExprKind::Assign { op: AssignOp::Assign, target, value } = &expr.kind {
        if let Some(slot) = write_barrier_target(target, ctx) {
            let value_text = lower_expr(value, ctx);
            return format!("gg_gc_write_barrier({slot}, (void*){value_text})");
        }
    }
    lower_expr(expr, ctx)
}

fn var_decl_type(declared_type: &Option<gglang_ast::TypeRef>, init: Option<&Expr>) -> ResolvedType {
    match declared_type {
        Some(ty) => ResolvedType::from_type_ref(ty),
        None => init
            .and_then(|e| e.resolved_type.clone())
            .unwrap_or_else(ResolvedType::object),
    }
}

fn default_value(resolved: &ResolvedType) -> String {
    if is_reference_type(resolved) {
        "NULL".to_string()
    } else {
        match resolved.name.as_str() {
            "float" | "double" => "0.0".to_string(),
            "bool" => "false".to_string(),
            "char" => "'\\0'".to_string(),
            _ => "0".to_string(),
        }
    }
}

fn emit_var_decl(
    declared_type: &Option<gglang_ast::TypeRef>,
    name: &str,
    init: Option<&Expr>,
    ctx: &mut FunctionCtx,
    level: usize,
) -> String {
    let resolved = var_decl_type(declared_type, init);
    let c_ty = c_type(&resolved);
    let init_text = init.map(|e| lower_expr(e, ctx)).unwrap_or_else(|| default_value(&resolved));
    ctx.declare_local(name, resolved.clone());
    let pad = indent(level);
    let mut out = format!("{pad}{c_ty} {name} = {init_text};\n");
    if is_reference_type(&resolved) {
        out.push_str(&format!("{pad}gg_gc_add_root((void**)&{name});\n"));
    }
    out
}

fn emit_return(value: Option<&Expr>, ctx: &mut FunctionCtx, level: usize, return_c_type: &str) -> String {
    let pad = indent(level);
    match value {
        None => format!("{pad}{{ gg_gc_pop_root_frame(__gg_frame); return; }}\n"),
        Some(expr) => {
            let value_text = lower_expr(expr, ctx);
            let temp = ctx.fresh_name("ret");
            format!(
                "{pad}{{ {return_c_type} {temp} = {value_text}; gg_gc_pop_root_frame(__gg_frame); return {temp}; }}\n"
            )
        }
    }
}

/// Lowers `foreach (var x in xs) { ... }` over an array to an index-based
/// `for` loop; this core has no iterator protocol beyond arrays.
fn emit_foreach(var_name: &str, iterable: &Expr, body: &Stmt, ctx: &mut FunctionCtx, level: usize, return_c_type: &str) -> String {
    let pad = indent(level);
    let iterable_resolved = iterable.resolved_type.clone().unwrap_or_else(ResolvedType::object);
    let elem_resolved = ResolvedType { is_array: false, ..iterable_resolved.clone() };
    let elem_c_ty = c_type(&elem_resolved);
    let iterable_text = lower_expr(iterable, ctx);
    let index_name = ctx.fresh_name("i");
    let array_name = ctx.fresh_name("arr");
    let len_name = ctx.fresh_name("len");

    ctx.declare_local(var_name, elem_resolved);

    let mut out = format!("{pad}{{\n");
    let inner_pad = indent(level + 1);
    out.push_str(&format!("{inner_pad}{elem_c_ty}* {array_name} = {iterable_text};\n"));
    out.push_str(&format!("{inner_pad}int64_t {len_name} = gg_array_length((void*){array_name});\n"));
    out.push_str(&format!(
        "{inner_pad}for (int64_t {index_name} = 0; {index_name} < {len_name}; {index_name}++) {{\n"
    ));
    let loop_pad = indent(level + 2);
    out.push_str(&format!("{loop_pad}{elem_c_ty} {var_name} = {array_name}[{index_name}];\n"));
    out.push_str(&emit_branch_body(body, ctx, level + 2, return_c_type));
    out.push_str(&format!("{inner_pad}}}\n"));
    out.push_str(&format!("{pad}}}\n"));
    out
}
