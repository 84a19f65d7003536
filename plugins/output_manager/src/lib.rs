//! Output manager plugin for Hexi.
//!
//! Adds the output manager configuration page and the page for choosing the
//! target motion platform.

use hexi_sdk::prelude::*;

pub const PLUGIN_ID: &str = "output_manager";

pub const CONFIG_ROUTE: &str = "hexiOutputManagerConfig";

#[derive(Debug, Default, Clone, Copy)]
pub struct OutputManagerPlugin;

impl ContributionSource for OutputManagerPlugin {
    fn id(&self) -> &str {
        PLUGIN_ID
    }

    fn category(&self) -> Option<&str> {
        Some("output")
    }

    fn namespace(&self) -> Option<&str> {
        Some("hexiOutputManager")
    }

    fn contribute_routes(&self) -> Result<Vec<RouteContribution>, ContributionError> {
        Ok(vec![
            RouteContribution::new(CONFIG_ROUTE, "/core/outputManager/config")
                .parent(DEFAULT_ROOT_NAME)
                .component("./Config/index.vue")
                .title("Output Manager"),
            RouteContribution::new(
                "hexiOutputManagerConfigActivatedPlugin",
                "/core/outputManager/config/activatedPlugin",
            )
            .parent(CONFIG_ROUTE)
            .component("./Config/activatedPlugin.vue")
            .title("选择目标体感平台"),
        ])
    }

    fn contribute_menus(&self) -> Result<Vec<MenuContribution>, ContributionError> {
        Ok(vec![MenuContribution::new(
            CONFIG_ROUTE,
            "/core/outputManager/config",
            "Output Manager",
        )])
    }
}
