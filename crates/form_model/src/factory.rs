//! Component factory: turns a component, one submission's data and render
//! options into a [`StructureEntry`]

use serde_json::Value;

use crate::component::ComponentDefinition;
use crate::error::Result;
use crate::options::RenderOptions;
use crate::structure::StructureEntry;

/// Creates structure entries
pub trait ComponentFactory {
    /// Build one structure entry
    fn create(
        &self,
        component: &ComponentDefinition,
        data: Value,
        options: RenderOptions,
    ) -> Result<StructureEntry>;
}

impl<F> ComponentFactory for F
where
    F: Fn(&ComponentDefinition, Value, RenderOptions) -> Result<StructureEntry>,
{
    fn create(
        &self,
        component: &ComponentDefinition,
        data: Value,
        options: RenderOptions,
    ) -> Result<StructureEntry> {
        self(component, data, options)
    }
}

/// Default factory for Form.io components.
///
/// Packages its inputs unchanged. The component tree is opaque here, so
/// every component is accepted whether or not it carries a `type` tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormioComponentFactory;

impl ComponentFactory for FormioComponentFactory {
    fn create(
        &self,
        component: &ComponentDefinition,
        data: Value,
        options: RenderOptions,
    ) -> Result<StructureEntry> {
        Ok(StructureEntry::new(component.clone(), data, options))
    }
}
