//! Template Store
//!
//! Owns the list of templates and keeps it in sync with an injected
//! [`KeyValueStore`]. The full list is written under [`TEMPLATES_KEY`] after
//! every mutation.

use crate::storage::{load_json, save_json, KeyValueStore};
use crate::template::engine;
use crate::template::error::{TemplateError, TemplateResult};
use crate::template::types::{Preview, RenderContext, Template};
use std::sync::Arc;

/// Storage key holding the serialized template list
pub const TEMPLATES_KEY: &str = "whatsapp-templates";

/// Templates seeded into an empty store
pub fn default_templates() -> Vec<Template> {
    vec![
        Template::new(
            "1",
            "Order Confirmation",
            "Hi {{customer_name}}! Your order {{order_id}} has been confirmed. Total: {{order_total}}. Thank you for shopping with us!",
        ),
        Template::new(
            "2",
            "Shipping Update",
            "Hello {{customer_name}}! Your order {{order_id}} has been shipped. Track it here: {{tracking_url}}",
        ),
        Template::new(
            "3",
            "Abandoned Cart",
            "Hi {{customer_name}}! You left items in your cart. Complete your order now: {{cart_url}}",
        ),
    ]
}

/// Ordered collection of templates backed by a key-value store
pub struct TemplateStore {
    storage: Arc<dyn KeyValueStore>,
    templates: Vec<Template>,
}

impl TemplateStore {
    /// Load templates from `storage`, seeding the defaults on first use
    pub fn load(storage: Arc<dyn KeyValueStore>) -> TemplateResult<Self> {
        let stored: Option<Vec<Template>> = load_json(storage.as_ref(), TEMPLATES_KEY)?;

        match stored {
            Some(mut templates) => {
                for template in &mut templates {
                    if template.refresh_variables() {
                        tracing::warn!(
                            template_id = %template.id,
                            "Stored variables did not match message, re-derived"
                        );
                    }
                }
                tracing::info!(count = templates.len(), "Loaded templates");
                Ok(Self { storage, templates })
            }
            None => {
                let store = Self {
                    storage,
                    templates: default_templates(),
                };
                store.save()?;
                tracing::info!(count = store.templates.len(), "Seeded default templates");
                Ok(store)
            }
        }
    }

    /// Persist the full template list
    pub fn save(&self) -> TemplateResult<()> {
        save_json(self.storage.as_ref(), TEMPLATES_KEY, &self.templates)?;
        Ok(())
    }

    /// All templates in creation order
    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Create and persist a new template
    pub fn create(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> TemplateResult<Template> {
        let title = title.into();
        let message = message.into();

        if title.is_empty() {
            return Err(TemplateError::MissingField("title"));
        }
        if message.is_empty() {
            return Err(TemplateError::MissingField("message"));
        }

        let template = Template::new(uuid::Uuid::new_v4().to_string(), title, message);
        self.templates.push(template.clone());

        if let Err(e) = self.save() {
            self.templates.pop();
            return Err(e);
        }

        tracing::info!(
            template_id = %template.id,
            variables = template.variables.len(),
            "Created template"
        );
        Ok(template)
    }

    /// Delete a template and persist the remaining list
    pub fn delete(&mut self, id: &str) -> TemplateResult<Template> {
        let index = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;

        let removed = self.templates.remove(index);

        if let Err(e) = self.save() {
            self.templates.insert(index, removed);
            return Err(e);
        }

        tracing::info!(template_id = %id, "Deleted template");
        Ok(removed)
    }

    /// Render a stored template against `values`
    pub fn preview(&self, id: &str, values: &RenderContext) -> TemplateResult<Preview> {
        let template = self
            .get(id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;

        Ok(Preview {
            template_id: template.id.clone(),
            title: template.title.clone(),
            rendered: template.render(values),
            unresolved: engine::unresolved_variables(&template.message, values),
        })
    }
}
