// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Console configuration documents.
//!
//! A console profile names the season it runs, the payout logic for that
//! season, and the management users who may be picked as route managers.
//! Profiles are JSON, for example:
//!
//! ```json
//! {
//!   "consoleId": 7,
//!   "name": "East Aeration",
//!   "seasonType": "Team",
//!   "users": [{ "userId": 3, "name": "Dana Whitfield" }],
//!   "links": [{ "userId": 3, "consoleProfileId": 7, "isRouteManagerForThisConsole": true }]
//! }
//! ```

use crate::error::ConsoleError;
use doorbook::{ManagerChoice, assignable_route_managers};
use doorbook_domain::{ConsolePermissionLink, ManagementUser, PayoutLogicSettings, SeasonType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One console profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// Zero means no console is selected.
    pub console_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub season_type: SeasonType,
    /// Payout logic for the season; defaults apply when absent.
    #[serde(default)]
    pub payout_logic: Option<PayoutLogicSettings>,
    #[serde(default)]
    pub users: Vec<ManagementUser>,
    #[serde(default)]
    pub links: Vec<ConsolePermissionLink>,
}

impl ConsoleConfig {
    /// A profile with no users and default payout logic.
    #[must_use]
    pub const fn new(console_id: i64, season_type: SeasonType) -> Self {
        Self {
            console_id,
            name: None,
            season_type,
            payout_logic: None,
            users: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Parses a profile document.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Configuration` if the text is not a valid
    /// profile.
    pub fn from_json(text: &str) -> Result<Self, ConsoleError> {
        serde_json::from_str(text).map_err(|e| ConsoleError::Configuration {
            reason: format!("console profile: {e}"),
        })
    }

    /// Returns the season's payout logic, or the defaults.
    #[must_use]
    pub fn payout_settings(&self) -> PayoutLogicSettings {
        self.payout_logic.clone().unwrap_or_else(|| {
            debug!(
                console = self.console_id,
                "No payout logic configured; using defaults"
            );
            PayoutLogicSettings::default()
        })
    }

    /// Lists the route managers that may be picked on this console.
    #[must_use]
    pub fn route_managers(&self) -> Vec<ManagerChoice> {
        assignable_route_managers(self.console_id, &self.users, &self.links)
    }
}
