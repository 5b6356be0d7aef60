// SPDX-License-Identifier: MPL-2.0

use crate::widgets::category_nav::CategoryView;
use cosmic::cosmic_config::{self, cosmic_config_derive::CosmicConfigEntry, CosmicConfigEntry};

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq)]
#[version = 1]
pub struct Config {
    /// Categories-tree endpoint (e.g., http://localhost/api/categories/tree)
    pub tree_url: String,
    /// Category layout: "sidebar" for the drawer layout, anything else for the inline menu
    pub category_view: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tree_url: String::from("http://localhost/api/categories/tree"),
            category_view: String::from("default"),
        }
    }
}

impl Config {
    /// The layout the navigator should be mounted with.
    pub fn layout(&self) -> CategoryView {
        CategoryView::from_flag(&self.category_view)
    }

    /// A copy of this config carrying the values edited on the settings page.
    pub fn with_settings(&self, tree_url: &str, layout: CategoryView) -> Self {
        Self {
            tree_url: tree_url.trim().to_string(),
            category_view: layout.as_str().to_string(),
        }
    }

    /// Writes `next`, adopting it only once the write succeeded.
    pub fn replace_if_written<E>(
        &mut self,
        next: Config,
        write: impl FnOnce(&Config) -> Result<(), E>,
    ) -> Result<(), E> {
        write(&next)?;
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_inline() {
        assert_eq!(Config::default().layout(), CategoryView::Inline);
    }

    #[test]
    fn test_sidebar_layout() {
        let config = Config {
            category_view: String::from("sidebar"),
            ..Config::default()
        };
        assert_eq!(config.layout(), CategoryView::Sidebar);
    }

    #[test]
    fn test_with_settings() {
        let next =
            Config::default().with_settings("  http://shop.test/tree \n", CategoryView::Sidebar);
        assert_eq!(next.tree_url, "http://shop.test/tree");
        assert_eq!(next.category_view, "sidebar");
    }

    #[test]
    fn test_failed_write_keeps_current_config() {
        let mut config = Config::default();
        let next = config.with_settings("http://shop.test/tree", CategoryView::Sidebar);

        let result = config.replace_if_written(next, |_| Err("read-only filesystem"));

        assert_eq!(result, Err("read-only filesystem"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_successful_write_adopts_config() {
        let mut config = Config::default();
        let next = config.with_settings("http://shop.test/tree", CategoryView::Sidebar);

        let result: Result<(), &str> = config.replace_if_written(next.clone(), |_| Ok(()));

        assert!(result.is_ok());
        assert_eq!(config, next);
    }
}
