// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A member of management as known to the permission service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementUser {
    pub user_id: i64,
    /// Full name, e.g. "Dana Whitfield".
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// A user's permissions on one console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolePermissionLink {
    pub user_id: i64,
    pub console_profile_id: i64,
    /// Whether the user may be picked as a route manager on this console.
    pub is_route_manager_for_this_console: bool,
}
