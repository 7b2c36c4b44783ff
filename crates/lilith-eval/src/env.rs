//! Evaluation environment.
//! 求值环境。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::value::{BuiltinFn, Value};

/// Errors from environment updates.
/// 环境更新错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("symbol '{0}' is a built-in")]
    BuiltinRedefinition(String),
}

struct Binding {
    builtin: bool,
    value: Value,
}

struct Scope {
    bindings: HashMap<String, Binding>,
    /// Lookup fallback. Non-owning: the parent scope is kept alive by
    /// whoever created it, never by the child.
    parent: Weak<RefCell<Scope>>,
}

/// A scoped symbol table.
/// 带作用域的符号表。
///
/// Each environment owns its own bindings and holds a weak link to its
/// parent. Lookups walk the parent chain; updates only touch the local
/// scope, or the root for [`Environment::define_global`].
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

impl Environment {
    /// Create a new empty root environment.
    /// 创建新的空根环境。
    pub fn new() -> Self {
        Self::with_parent(Weak::new())
    }

    fn with_parent(parent: Weak<RefCell<Scope>>) -> Self {
        Self {
            scope: Rc::new(RefCell::new(Scope {
                bindings: HashMap::new(),
                parent,
            })),
        }
    }

    /// Create a child environment whose lookups fall back to `self`.
    /// 创建一个查找会回退到 `self` 的子环境。
    pub fn child(&self) -> Self {
        Self::with_parent(Rc::downgrade(&self.scope))
    }

    /// Look up `name`, walking the parent chain. Returns a copy of the bound
    /// value, or an error value if the name is unbound.
    /// 查找 `name`，沿父链向上搜索。返回绑定值的副本，未绑定时返回错误值。
    pub fn get(&self, name: &str) -> Value {
        self.lookup(name)
            .unwrap_or_else(|| Value::error(format!("unbound symbol '{name}'")))
    }

    /// Like [`Environment::get`] but `None` when unbound.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut scope = Rc::clone(&self.scope);
        loop {
            let parent = {
                let current = scope.borrow();
                if let Some(binding) = current.bindings.get(name) {
                    return Some(binding.value.clone());
                }
                current.parent.upgrade()?
            };
            scope = parent;
        }
    }

    /// Bind `name` in the local scope. Refused when the existing local entry
    /// is a built-in.
    /// 在本地作用域绑定 `name`。若已有条目为内置函数则拒绝。
    pub fn put(&self, name: &str, value: Value, as_builtin: bool) -> Result<(), EnvError> {
        let mut scope = self.scope.borrow_mut();
        if scope.bindings.get(name).is_some_and(|b| b.builtin) {
            tracing::debug!(name, "refused to overwrite built-in");
            return Err(EnvError::BuiltinRedefinition(name.to_string()));
        }
        scope.bindings.insert(
            name.to_string(),
            Binding {
                builtin: as_builtin,
                value,
            },
        );
        Ok(())
    }

    /// Bind `name` in the root of the parent chain.
    /// 在父链的根环境中绑定 `name`。
    pub fn define_global(&self, name: &str, value: Value) -> Result<(), EnvError> {
        self.root().put(name, value, false)
    }

    /// Point this environment's lookups at `parent`.
    /// 将本环境的查找回退指向 `parent`。
    pub fn set_parent(&self, parent: &Environment) {
        self.scope.borrow_mut().parent = Rc::downgrade(&parent.scope);
    }

    pub fn has_parent(&self) -> bool {
        self.scope.borrow().parent.upgrade().is_some()
    }

    /// Root of the parent chain.
    fn root(&self) -> Environment {
        let mut scope = Rc::clone(&self.scope);
        loop {
            let parent = scope.borrow().parent.upgrade();
            match parent {
                Some(parent) => scope = parent,
                None => return Environment { scope },
            }
        }
    }

    /// Copy the local bindings into a fresh environment sharing the same
    /// parent link.
    pub fn deep_copy(&self) -> Environment {
        let scope = self.scope.borrow();
        let bindings = scope
            .bindings
            .iter()
            .map(|(name, binding)| {
                let copy = Binding {
                    builtin: binding.builtin,
                    value: binding.value.clone(),
                };
                (name.clone(), copy)
            })
            .collect();
        Environment {
            scope: Rc::new(RefCell::new(Scope {
                bindings,
                parent: scope.parent.clone(),
            })),
        }
    }

    /// True if `name` is bound locally as a built-in.
    pub fn is_builtin(&self, name: &str) -> bool {
        self.scope.borrow().bindings.get(name).is_some_and(|b| b.builtin)
    }

    /// Local bindings sorted by name.
    pub fn bindings(&self) -> Vec<(String, Value)> {
        let scope = self.scope.borrow();
        let mut all: Vec<_> = scope
            .bindings
            .iter()
            .map(|(name, binding)| (name.clone(), binding.value.clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }

    /// Number of bindings in this scope alone.
    pub fn binding_count(&self) -> usize {
        self.scope.borrow().bindings.len()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Register a host function under `name`, protected from redefinition.
/// 以 `name` 注册宿主函数，并防止被重新定义。
pub fn register_builtin(env: &Environment, name: &'static str, func: BuiltinFn) -> Result<(), EnvError> {
    env.put(name, Value::builtin_function(name, func), true)
}
