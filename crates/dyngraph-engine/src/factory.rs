//! Entity factory: the registry of entity classes by name.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use dyngraph_core::EntityError;

use crate::entity::EntityBuilder;

/// Declares the signals and commands of a new entity.
pub type Constructor = Arc<dyn Fn(&mut EntityBuilder) + Send + Sync>;

struct EntityClass {
    docstring: String,
    constructor: Constructor,
}

/// Ordered registry `class name -> constructor`.
#[derive(Default)]
pub struct Factory {
    classes: IndexMap<String, EntityClass>,
}

impl Factory {
    /// An empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory with the built-in classes registered.
    pub fn with_builtins() -> Self {
        let mut factory = Self::new();
        if let Err(e) = crate::builtin::register(&mut factory) {
            tracing::warn!(error = %e, "built-in entity class not registered");
        }
        factory
    }

    /// Register a class. Class names are unique.
    pub fn register<F>(
        &mut self,
        class: &str,
        docstring: impl Into<String>,
        constructor: F,
    ) -> Result<(), EntityError>
    where
        F: Fn(&mut EntityBuilder) + Send + Sync + 'static,
    {
        if self.classes.contains_key(class) {
            return Err(EntityError::DuplicateClass {
                class: class.to_owned(),
            });
        }
        self.classes.insert(
            class.to_owned(),
            EntityClass {
                docstring: docstring.into(),
                constructor: Arc::new(constructor),
            },
        );
        Ok(())
    }

    /// Registered class names, in registration order.
    pub fn class_names(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }

    /// Whether `class` is registered.
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// Documentation of a registered class.
    pub fn docstring(&self, class: &str) -> Option<&str> {
        self.classes.get(class).map(|c| c.docstring.as_str())
    }

    /// Run the constructor of `class` for an instance called `name`.
    pub(crate) fn build(&self, class: &str, name: &str) -> Result<EntityBuilder, EntityError> {
        let entry = self
            .classes
            .get(class)
            .ok_or_else(|| EntityError::UnknownClass {
                class: class.to_owned(),
            })?;
        let mut builder = EntityBuilder::new(class, name);
        (entry.constructor)(&mut builder);
        builder.validate()?;
        Ok(builder)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("classes", &self.class_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyngraph_core::ValueType;

    #[test]
    fn registration_order_is_kept() {
        let mut f = Factory::new();
        f.register("B", "", |_| {}).unwrap();
        f.register("A", "", |_| {}).unwrap();
        assert_eq!(f.class_names(), vec!["B", "A"]);
    }

    #[test]
    fn duplicate_class_is_rejected() {
        let mut f = Factory::new();
        f.register("A", "", |_| {}).unwrap();
        assert_eq!(
            f.register("A", "", |_| {}),
            Err(EntityError::DuplicateClass { class: "A".into() })
        );
    }

    #[test]
    fn unknown_class_cannot_be_built() {
        let f = Factory::new();
        assert!(matches!(
            f.build("Nope", "n"),
            Err(EntityError::UnknownClass { .. })
        ));
    }

    #[test]
    fn build_runs_the_constructor() {
        let mut f = Factory::new();
        f.register("One", "one input", |b| {
            b.input("x", ValueType::Int);
        })
        .unwrap();
        let b = f.build("One", "o").unwrap();
        assert_eq!(b.name(), "o");
        assert_eq!(b.signals.len(), 1);
        assert_eq!(f.docstring("One"), Some("one input"));
    }

    #[test]
    fn builtins_are_registered() {
        let f = Factory::with_builtins();
        assert!(f.contains("Adder"));
        assert!(f.contains("Gain"));
    }
}
