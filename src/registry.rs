//! Plugin registry.
//!
//! Holds the theme, registered plugins and local plugins. Iteration order
//! is always theme → plugins → local plugins, each in registration order;
//! every combined artifact depends on it.

use std::path::Path;

use crate::debug;
use crate::error::Result;
use crate::plugin::{Plugin, PluginKind};
use crate::site::Site;

#[derive(Debug, Default)]
pub struct Registry {
    theme: Option<Plugin>,
    plugins: Vec<Plugin>,
    local_plugins: Vec<Plugin>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a plugin with `ctor` and file it by kind.
    ///
    /// A theme replaces any previous theme. A `local_plugin` is filed with
    /// the regular plugins and every other kind with the local plugins;
    /// existing sites depend on this routing, so keep it.
    pub fn register_plugin<F>(&mut self, ctor: F, name: impl Into<String>, kind: PluginKind) -> &mut Plugin
    where
        F: FnOnce(String, PluginKind) -> Plugin,
    {
        let plugin = ctor(name.into(), kind);
        debug!("registry"; "registered {} `{}`", plugin.kind, plugin.name);

        let list = match kind {
            PluginKind::Theme => return self.theme.insert(plugin),
            PluginKind::LocalPlugin => &mut self.plugins,
            PluginKind::Plugin => &mut self.local_plugins,
        };
        list.push(plugin);
        let last = list.len() - 1;
        &mut list[last]
    }

    /// Register an empty plugin.
    pub fn register(&mut self, name: impl Into<String>, kind: PluginKind) -> &mut Plugin {
        self.register_plugin(Plugin::new, name, kind)
    }

    pub fn theme(&self) -> Option<&Plugin> {
        self.theme.as_ref()
    }

    /// Look a plugin up by name. `"theme"` always means the theme slot.
    pub fn plugin(&self, name: &str) -> Option<&Plugin> {
        if name == "theme" {
            return self.theme.as_ref();
        }
        self.plugins
            .iter()
            .chain(&self.local_plugins)
            .find(|p| p.name == name)
    }

    pub fn plugin_mut(&mut self, name: &str) -> Option<&mut Plugin> {
        if name == "theme" {
            return self.theme.as_mut();
        }
        self.plugins
            .iter_mut()
            .chain(&mut self.local_plugins)
            .find(|p| p.name == name)
    }

    /// All plugins in contribution order.
    pub fn plugins(&self) -> impl Iterator<Item = &Plugin> {
        self.theme
            .iter()
            .chain(&self.plugins)
            .chain(&self.local_plugins)
    }

    pub fn len(&self) -> usize {
        usize::from(self.theme.is_some()) + self.plugins.len() + self.local_plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register every plugin's layouts with the site, in contribution order.
    pub fn register_layouts(&self, site: &mut Site) {
        for layout in self.plugins().flat_map(|p| &p.layouts) {
            layout.register(site);
        }
    }

    /// Text of an include from the named plugin, `None` for unknown plugins.
    pub fn embed(&self, name: &str, file: impl AsRef<Path>, site: &Site) -> Result<Option<String>> {
        let Some(plugin) = self.plugin(name) else {
            debug!("registry"; "embed: no plugin named `{}`", name);
            return Ok(None);
        };
        plugin.embed(file, site).map(Some)
    }

    /// Names in contribution order, for diagnostics.
    pub fn names(&self) -> Vec<&str> {
        self.plugins().map(|p| p.name.as_str()).collect()
    }
}
