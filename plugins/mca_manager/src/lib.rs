//! MCA manager plugin for Hexi.
//!
//! Adds the motion cueing algorithm (MCA) configuration page with its
//! algorithm selection and log sub-pages.

use hexi_sdk::prelude::*;

pub const PLUGIN_ID: &str = "mca_manager";

pub const CONFIG_ROUTE: &str = "hexiMCAManagerConfig";

#[derive(Debug, Default, Clone, Copy)]
pub struct McaManagerPlugin;

impl ContributionSource for McaManagerPlugin {
    fn id(&self) -> &str {
        PLUGIN_ID
    }

    fn category(&self) -> Option<&str> {
        Some("mca")
    }

    fn namespace(&self) -> Option<&str> {
        Some("hexiMCAManager")
    }

    fn contribute_routes(&self) -> Result<Vec<RouteContribution>, ContributionError> {
        Ok(vec![
            RouteContribution::new(CONFIG_ROUTE, "/core/mcaManager/config")
                .parent(DEFAULT_ROOT_NAME)
                .component("./Config/index.vue")
                .title("MCA Manager"),
            RouteContribution::new(
                "hexiMCAManagerConfigActivatedPlugin",
                "/core/mcaManager/config/activatedPlugin",
            )
            .parent(CONFIG_ROUTE)
            .component("./Config/activatedPlugin.vue")
            .title("Select Algorithm"),
            RouteContribution::new("hexiMCAManagerConfigLogs", "/core/mcaManager/config/logs")
                .parent(CONFIG_ROUTE)
                .component("./Config/logs.vue")
                .title("MCA Logs"),
        ])
    }

    fn contribute_menus(&self) -> Result<Vec<MenuContribution>, ContributionError> {
        Ok(vec![MenuContribution::new(
            CONFIG_ROUTE,
            "/core/mcaManager/config",
            "MCA Manager",
        )])
    }
}
