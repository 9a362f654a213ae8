//! Rendering context: a chain of view frames with per-frame lookup memos

use crate::view::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// One level of the view hierarchy.
///
/// A frame wraps a view and borrows its parent, so the chain is acyclic and
/// cannot outlive the render call that built it. Each frame memoizes its own
/// lookups, including misses.
#[derive(Debug)]
pub struct Context<'p> {
    view: Value,
    parent: Option<&'p Context<'p>>,
    cache: RefCell<HashMap<String, Option<Value>>>,
}

impl<'p> Context<'p> {
    /// Create a root frame
    pub fn new(view: Value) -> Self {
        Self {
            view,
            parent: None,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Create a child frame for `view` with this frame as its parent
    pub fn push(&self, view: Value) -> Context<'_> {
        Context {
            view,
            parent: Some(self),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The view wrapped by this frame
    pub fn view(&self) -> &Value {
        &self.view
    }

    pub fn parent(&self) -> Option<&Context<'p>> {
        self.parent
    }

    /// Resolve `name`, walking toward the root frame on a miss.
    ///
    /// `.` is the frame's own view. Dotted names descend through nested
    /// values and also accept a primitive's own property on the last
    /// segment (`name.length`); plain names only match an object's (or
    /// array's) own property. A [`Value::Func`] result is invoked with this
    /// frame's view before being returned.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let value = if name == "." {
            Some(self.view.clone())
        } else {
            let cached = self.cache.borrow().get(name).cloned();
            match cached {
                Some(memo) => memo,
                None => {
                    let resolved = self.resolve(name);
                    self.cache
                        .borrow_mut()
                        .insert(name.to_string(), resolved.clone());
                    resolved
                }
            }
        };

        match value {
            Some(Value::Func(func)) => Some(func.call(&self.view)),
            other => other,
        }
    }

    fn resolve(&self, name: &str) -> Option<Value> {
        let dotted = name.find('.').is_some_and(|i| i > 0);
        let mut frame = Some(self);

        while let Some(context) = frame {
            let hit = if dotted {
                lookup_path(&context.view, name)
            } else if context.view.has_property(name) {
                context.view.get(name)
            } else {
                None
            };

            if hit.is_some() {
                return hit;
            }
            frame = context.parent;
        }

        None
    }
}

/// Descend `view` along a dotted path.
///
/// Stops at the first null or missing intermediate. The lookup counts as a
/// hit only when the value reached before the last segment carries that
/// segment as a property.
fn lookup_path(view: &Value, name: &str) -> Option<Value> {
    let names: Vec<&str> = name.split('.').collect();
    let last = names.len() - 1;
    let mut current = Some(view.clone());
    let mut hit = false;

    for (index, segment) in names.iter().enumerate() {
        let value = match current.take() {
            Some(value) if !value.is_null() => value,
            _ => break,
        };

        if index == last {
            hit = value.has_property(segment) || value.primitive_has_own_property(segment);
        }
        current = value.get(segment);
    }

    if hit {
        Some(current.unwrap_or(Value::Null))
    } else {
        None
    }
}
