//! Expression lowering: a tree-directed translation from an analyzed AST
//! node to a C expression string. Operates on an already
//! semantically-analyzed AST (every `Expr::resolved_type` is filled in).

use gglang_ast::{AssignOp, BinaryOp, Expr, ExprKind, IncDecOp, ResolvedType, UnaryOp};

use crate::builtins_emit::{console_print_call, lower_extension_call, lower_static_call};
use crate::ctx::FunctionCtx;
use crate::ctype::c_type;

pub fn lower_expr(expr: &Expr, ctx: &mut FunctionCtx) -> String {
    match &expr.kind {
        ExprKind::IntLiteral(v) | ExprKind::LongLiteral(v) => v.to_string(),
        ExprKind::FloatLiteral(v) | ExprKind::DoubleLiteral(v) => format!("{v}"),
        ExprKind::StringLiteral(s) => format!("\"{}\"", escape_c_string(s)),
        ExprKind::CharLiteral(c) => format!("'{}'", escape_c_char(*c)),
        ExprKind::BoolLiteral(b) => if *b { "true".to_string() } else { "false".to_string() },
        ExprKind::Null => "NULL".to_string(),
        ExprKind::This => "self".to_string(),
        ExprKind::Base => format!("((({})self))", base_cast_type(ctx)),
        ExprKind::Identifier(name) => lower_identifier(name, ctx),
        ExprKind::Unary { op, operand } => {
            let inner = lower_expr(operand, ctx);
            let symbol = match op {
                UnaryOp::Neg => "-",
                UnaryOp::Not => "!",
                UnaryOp::BitNot => "~",
            };
            format!("({symbol}{inner})")
        }
        ExprKind::IncDec { op, operand, is_prefix } => {
            let inner = lower_expr(operand, ctx);
            let symbol = match op {
                IncDecOp::Inc => "++",
                IncDecOp::Dec => "--",
            };
            if *is_prefix {
                format!("({symbol}{inner})")
            } else {
                format!("({inner}{symbol})")
            }
        }
        ExprKind::Binary { op, left, right } => lower_binary(*op, left, right, ctx),
        ExprKind::Assign { op, target, value } => {
            let target_text = lower_expr(target, ctx);
            let value_text = lower_expr(value, ctx);
            let symbol = match op {
                AssignOp::Assign => "=",
                AssignOp::AddAssign => "+=",
                AssignOp::SubAssign => "-=",
                AssignOp::MulAssign => "*=",
                AssignOp::DivAssign => "/=",
            };
            format!("({target_text} {symbol} {value_text})")
        }
        ExprKind::Call { callee, args } => lower_call(expr, callee, args, ctx),
        ExprKind::MemberAccess { target, member } => {
            let target_text = lower_expr(target, ctx);
            format!("{}{member}", arrow_or_dot(target, &target_text, ctx))
        }
        ExprKind::Index { target, index } => {
            let target_text = lower_expr(target, ctx);
            let index_text = lower_expr(index, ctx);
            format!("{target_text}[{index_text}]")
        }
        ExprKind::New { type_name, args } => {
            let arg_text = args.iter().map(|a| lower_expr(a, ctx)).collect::<Vec<_>>().join(", ");
            format!("{type_name}_create({arg_text})")
        }
        ExprKind::NewArray { element_type, size } => {
            let size_text = lower_expr(size, ctx);
            let elem_c = crate::ctype::scalar_c_type(&element_type.name);
            format!("({elem_c}*)gg_alloc(({size_text}) * sizeof({elem_c}))")
        }
        ExprKind::Cast { target_type, operand } => {
            let inner = lower_expr(operand, ctx);
            let c_ty = crate::ctype::scalar_c_type(&target_type.name);
            format!("(({c_ty}){inner})")
        }
        ExprKind::Grouping(inner) => format!("({})", lower_expr(inner, ctx)),
    }
}

fn base_cast_type(ctx: &FunctionCtx) -> String {
    ctx.class_name
        .as_ref()
        .and_then(|name| ctx.class_table.get(name))
        .and_then(|info| info.base.clone())
        .map(|base| format!("{base}*)"))
        .unwrap_or_else(|| "void*)".to_string())
}

/// Bare identifiers resolve, in order, to: a local/parameter, a field on
/// `self`, or a bare reference to a known static class name (left as-is —
/// the caller, e.g. `Console.writeLine`, only ever reaches this through a
/// `MemberAccess`).
fn lower_identifier(name: &str, ctx: &FunctionCtx) -> String {
    if ctx.local_type(name).is_some() {
        return name.to_string();
    }
    if ctx.field_type(name).is_some() {
        return format!("self->{name}");
    }
    name.to_string()
}

/// `target.member` lowers to `target->member` when target is a pointer
/// (every reference-typed expression in this core) and `target.member` when
/// target is a value (primitives only reach member access through
/// extension-method calls, which are handled separately in `lower_call`).
fn arrow_or_dot(target: &Expr, _target_text: &str, _ctx: &FunctionCtx) -> &'static str {
    let resolved = target.resolved_type.clone().unwrap_or_else(ResolvedType::object);
    if crate::ctype::is_reference_type(&resolved) || matches!(target.kind, ExprKind::This | ExprKind::Base) {
        "->"
    } else {
        "."
    }
}

fn lower_binary(op: BinaryOp, left: &Expr, right: &Expr, ctx: &mut FunctionCtx) -> String {
    let left_text = lower_expr(left, ctx);
    let right_text = lower_expr(right, ctx);

    if op == BinaryOp::Add && is_string_operand(left) && is_string_operand(right) {
        return format!("gg_string_concat({left_text}, {right_text})");
    }

    let symbol = match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Eq => "==",
        BinaryOp::NotEq => "!=",
        BinaryOp::Lt => "<",
        BinaryOp::LtEq => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::GtEq => ">=",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
        BinaryOp::BitAnd => "&",
        BinaryOp::BitOr => "|",
        BinaryOp::BitXor => "^",
        BinaryOp::Shl => "<<",
        BinaryOp::Shr => ">>",
    };
    format!("({left_text} {symbol} {right_text})")
}

fn is_string_operand(expr: &Expr) -> bool {
    matches!(expr.resolved_type.as_ref(), Some(rt) if rt.name == "string" && !rt.is_array)
}

/// Calls route through four lowering strategies, checked in order:
/// `Console.write`/`writeLine` (format-specifier inference), other static
/// calls on `Console`/`Math`/`Memory`, extension-method calls on a
/// primitive receiver, and ordinary instance/static method dispatch.
fn lower_call(call_expr: &Expr, callee: &Expr, args: &[Expr], ctx: &mut FunctionCtx) -> String {
    let ExprKind::MemberAccess { target, member } = &callee.kind else {
        // A bare call with no member-access callee: dispatched as a static
        // method of the enclosing class.
        let class_name = ctx.class_name.clone().unwrap_or_default();
        let args_text = args.iter().map(|a| lower_expr(a, ctx)).collect::<Vec<_>>().join(", ");
        return format!("{class_name}_{}({args_text})", identifier_text(callee));
    };

    if let ExprKind::Identifier(name) = &target.kind {
        if name == "Console" && (member == "writeLine" || member == "write") {
            let newline = member == "writeLine";
            if let Some(arg) = args.first() {
                let arg_text = lower_expr(arg, ctx);
                return console_print_call(arg, &arg_text, newline);
            }
            return if newline { "printf(\"\\n\")".to_string() } else { String::new() };
        }
        if let Some(symbol) = lower_static_call(name, member) {
            let args_text = args.iter().map(|a| lower_expr(a, ctx)).collect::<Vec<_>>().join(", ");
            return format!("{symbol}({args_text})");
        }
    }

    let target_resolved = target.resolved_type.clone().unwrap_or_else(ResolvedType::object);
    let target_text = lower_expr(target, ctx);
    let args_text: Vec<String> = args.iter().map(|a| lower_expr(a, ctx)).collect();

    if !target_resolved.is_array && target_resolved.is_primitive() && target_resolved.name != "void" {
        // Extension-method call on a primitive receiver, e.g. `n.toString()`.
        let symbol = lower_extension_call(&target_resolved.name, member);
        let mut all_args = vec![target_text];
        all_args.extend(args_text);
        return format!("{symbol}({})", all_args.join(", "));
    }

    let class_name = target_resolved.name.clone();
    let is_virtual = ctx
        .class_table
        .get(&class_name)
        .and_then(|info| info.methods.get(member))
        .is_some_and(|m| m.modifiers.is_virtual || m.modifiers.is_override);

    let mut all_args = vec![target_text.clone()];
    all_args.extend(args_text);
    if is_virtual {
        format!("{target_text}->vtable->{member}({})", all_args.join(", "))
    } else {
        format!("{class_name}_{member}({})", all_args.join(", "))
    }
}

fn identifier_text(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Identifier(name) => name.clone(),
        _ => String::new(),
    }
}

pub fn escape_c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

fn escape_c_char(c: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '\'' => "\\'".to_string(),
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        other => other.to_string(),
    }
}

/// Whether an assignment target is a reference-typed slot and therefore
/// must go through the write-barrier hook when it's a top-level statement.
/// Returns the lowered target text as an lvalue address expression.
pub fn write_barrier_target(target: &Expr, ctx: &mut FunctionCtx) -> Option<String> {
    let resolved = target.resolved_type.clone()?;
    if !crate::ctype::is_reference_type(&resolved) {
        return None;
    }
    match &target.kind {
        ExprKind::Identifier(name) => Some(format!("(void**)&{}", lower_identifier(name, ctx))),
        ExprKind::MemberAccess { .. } => {
            let text = lower_expr(target, ctx);
            Some(format!("(void**)&{text}"))
        }
        _ => None,
    }
}

pub fn c_type_of(expr: &Expr) -> String {
    c_type(&expr.resolved_type.clone().unwrap_or_else(ResolvedType::object))
}
