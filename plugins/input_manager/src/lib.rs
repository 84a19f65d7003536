//! Input manager plugin for Hexi.
//!
//! Adds the input manager configuration page beneath the shell layout, with
//! sub-pages for activated input plugins and logs, plus one sidebar entry.

use hexi_sdk::prelude::*;

pub const PLUGIN_ID: &str = "input_manager";

/// Route name of the configuration page; sub-pages hang beneath it.
pub const CONFIG_ROUTE: &str = "hexiInputManagerConfig";

#[derive(Debug, Default, Clone, Copy)]
pub struct InputManagerPlugin;

impl ContributionSource for InputManagerPlugin {
    fn id(&self) -> &str {
        PLUGIN_ID
    }

    fn category(&self) -> Option<&str> {
        Some("input")
    }

    fn namespace(&self) -> Option<&str> {
        Some("hexiInputManager")
    }

    fn contribute_routes(&self) -> Result<Vec<RouteContribution>, ContributionError> {
        Ok(vec![
            RouteContribution::new(CONFIG_ROUTE, "/core/inputManager/config")
                .parent(DEFAULT_ROOT_NAME)
                .component("./Config/index.vue")
                .title("Config"),
            RouteContribution::new(
                "hexiInputManagerConfigActivatedPlugin",
                "/core/inputManager/config/activatedPlugin",
            )
            .parent(CONFIG_ROUTE)
            .component("./Config/activatedPlugin.vue")
            .title("Activated Plugins"),
            RouteContribution::new(
                "hexiInputManagerConfigLogs",
                "/core/inputManager/config/logs",
            )
            .parent(CONFIG_ROUTE)
            .component("./Config/logs.vue")
            .title("Logs"),
        ])
    }

    fn contribute_menus(&self) -> Result<Vec<MenuContribution>, ContributionError> {
        Ok(vec![MenuContribution::new(
            CONFIG_ROUTE,
            "/core/inputManager/config",
            "Input Manager",
        )])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn sub_pages_hang_beneath_config() {
        let routes = InputManagerPlugin.contribute_routes().unwrap();
        assert_eq!(routes[0].parent.as_deref(), Some(DEFAULT_ROOT_NAME));
        assert!(routes[1..].iter().all(|r| r.parent.as_deref() == Some(CONFIG_ROUTE)));
    }

    #[test]
    fn enumeration_is_idempotent() {
        let plugin = InputManagerPlugin;
        assert_eq!(plugin.contribute_routes().unwrap(), plugin.contribute_routes().unwrap());
        assert_eq!(plugin.contribute_menus().unwrap(), plugin.contribute_menus().unwrap());
    }
}
