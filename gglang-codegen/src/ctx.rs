//! Per-function emission state threaded through statement/expression
//! lowering: the enclosing class (for `this`/field resolution), the class
//! table (for static-dispatch vs. virtual-dispatch decisions), and a map of
//! local/parameter names to their resolved types (needed to decide, e.g.,
//! whether an identifier assignment goes through the write-barrier hook).

use std::collections::HashMap;

use gglang_ast::ResolvedType;
use gglang_sema::class_info::ClassTable;

pub struct FunctionCtx<'a> {
    pub class_table: &'a ClassTable,
    pub class_name: Option<String>,
    pub locals: HashMap<String, ResolvedType>,
    fresh_counter: usize,
}

impl<'a> FunctionCtx<'a> {
    pub fn new(class_table: &'a ClassTable, class_name: Option<String>) -> Self {
        Self { class_table, class_name, locals: HashMap::new(), fresh_counter: 0 }
    }

    pub fn declare_local(&mut self, name: &str, resolved: ResolvedType) {
        self.locals.insert(name.to_string(), resolved);
    }

    pub fn local_type(&self, name: &str) -> Option<&ResolvedType> {
        self.locals.get(name)
    }

    /// Field lookup in the enclosing class's fully-resolved field map
    /// (inherited fields included after `gglang-sema`'s inheritance pass).
    pub fn field_type(&self, field_name: &str) -> Option<ResolvedType> {
        let class_name = self.class_name.as_deref()?;
        let info = self.class_table.get(class_name)?;
        info.fields.get(field_name).map(|f| ResolvedType::from_type_ref(&f.field_type))
    }

    /// A fresh C identifier for a compiler-introduced temporary, e.g. a
    /// return-value holder that needs to be evaluated before the root
    /// frame is popped.
    pub fn fresh_name(&mut self, hint: &str) -> String {
        self.fresh_counter += 1;
        format!("__gg_{hint}_{}", self.fresh_counter)
    }
}
