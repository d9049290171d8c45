//! Java class renderer
//!
//! Emits one flat class per entity: imports when a list field exists,
//! the declaration, private fields, a no-argument constructor that
//! allocates the list fields, then a getter/setter pair per field.
//! Output depends only on the entity, so the same entity always renders
//! to the same text.

use anyhow::Result;
use tracing::{debug, info, span, Level};

use crate::core::{capitalize_first, Entity, Field, Renderer, ResolvedModel};

const INDENT: &str = "    ";
const LIST_IMPORTS: [&str; 2] = ["import java.util.List;", "import java.util.ArrayList;"];

/// Source text generated for one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClass {
    /// Class name, same as the entity name
    pub name: String,
    /// `<Name>.java`
    pub file_name: String,
    pub source: String,
}

/// Renders resolved entities as Java source
#[derive(Debug, Clone)]
pub struct JavaRenderer {
    extension: &'static str,
}

impl JavaRenderer {
    pub fn new() -> Self {
        Self { extension: "java" }
    }

    /// File name for an entity's class
    pub fn file_name(&self, entity: &Entity) -> String {
        format!("{}.{}", entity.name, self.extension)
    }

    /// Render a single entity. Every resolved entity is renderable.
    ///
    /// # Example
    /// ```
    /// use erdgen::core::Entity;
    /// use erdgen::plugins::java::JavaRenderer;
    ///
    /// let source = JavaRenderer::new().render_entity(&Entity::new("r1", "Referee"));
    /// assert!(source.starts_with("public class Referee {"));
    /// ```
    pub fn render_entity(&self, entity: &Entity) -> String {
        let mut code: Vec<String> = Vec::new();

        if entity.has_list_field() {
            code.extend(LIST_IMPORTS.iter().map(|line| line.to_string()));
            code.push(String::new());
        }

        code.push(match &entity.parent_name {
            Some(parent) => format!("public class {} extends {} {{", entity.name, parent),
            None => format!("public class {} {{", entity.name),
        });
        code.push(String::new());

        if !entity.fields.is_empty() {
            for field in &entity.fields {
                code.push(format!("{INDENT}private {} {};", field.field_type, field.name));
            }
            code.push(String::new());
        }

        self.render_constructor(entity, &mut code);

        for field in &entity.fields {
            Self::render_accessors(field, &mut code);
        }

        code.push("}".to_string());
        code.join("\n")
    }

    fn render_constructor(&self, entity: &Entity, code: &mut Vec<String>) {
        code.push(format!("{INDENT}public {}() {{", entity.name));
        for field in entity.fields.iter().filter(|f| f.field_type.is_list()) {
            code.push(format!("{INDENT}{INDENT}this.{} = new ArrayList<>();", field.name));
        }
        code.push(format!("{INDENT}}}"));
        code.push(String::new());
    }

    fn render_accessors(field: &Field, code: &mut Vec<String>) {
        let suffix = capitalize_first(&field.name);
        let name = &field.name;
        let ty = &field.field_type;

        code.push(format!("{INDENT}public {ty} get{suffix}() {{"));
        code.push(format!("{INDENT}{INDENT}return this.{name};"));
        code.push(format!("{INDENT}}}"));
        code.push(String::new());

        code.push(format!("{INDENT}public void set{suffix}({ty} {name}) {{"));
        code.push(format!("{INDENT}{INDENT}this.{name} = {name};"));
        code.push(format!("{INDENT}}}"));
        code.push(String::new());
    }

    /// Render an entity together with its file name
    pub fn generate(&self, entity: &Entity) -> GeneratedClass {
        let source = self.render_entity(entity);
        GeneratedClass {
            name: entity.name.clone(),
            file_name: self.file_name(entity),
            source,
        }
    }
}

impl Default for JavaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<ResolvedModel> for JavaRenderer {
    type Output = Vec<GeneratedClass>;

    fn render(&self, model: &ResolvedModel) -> Result<Self::Output> {
        let render_span = span!(Level::INFO, "render_java", entity_count = model.entity_count());
        let _enter = render_span.enter();

        let classes: Vec<_> = model
            .entities()
            .map(|entity| {
                let class = self.generate(entity);
                info!(file = %class.file_name, "Rendered class");
                class
            })
            .collect();

        debug!(class_count = classes.len(), "Rendering completed");
        Ok(classes)
    }

    fn name(&self) -> &'static str {
        "java"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        self.extension
    }
}
