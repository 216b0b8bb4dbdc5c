// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Binding showed workers to the day's sales units.
//!
//! Individual and Service seasons assign each worker straight to a route
//! manager. Team seasons assign workers to carts, and each cart carries at
//! most one route manager.

use crate::apply::Applied;
use crate::error::CoreError;
use crate::state::Roster;
use doorbook_domain::{
    Assignment, CalendarDay, Cart, CartId, ConsolePermissionLink, ManagementUser, RouteManager,
    WorkerNumber, validate_cart_count,
};
use std::collections::HashSet;
use tracing::info;

const UNASSIGNED_LABEL: &str = "Unassigned";

/// One entry in a route-manager picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerChoice {
    /// Clears the assignment.
    Unassigned,
    Manager(RouteManager),
}

impl ManagerChoice {
    /// Returns the text shown for this choice.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Unassigned => UNASSIGNED_LABEL,
            Self::Manager(manager) => &manager.name,
        }
    }

    /// Returns the manager to assign; `None` for "Unassigned".
    #[must_use]
    pub fn into_manager(self) -> Option<RouteManager> {
        match self {
            Self::Unassigned => None,
            Self::Manager(manager) => Some(manager),
        }
    }
}

/// Lists the route managers that may be picked on a console.
///
/// The first entry is always "Unassigned". It is followed by every user
/// holding a route-manager link for `console_id`, in user order. Console id
/// zero means no console is selected and yields only "Unassigned".
#[must_use]
pub fn assignable_route_managers(
    console_id: i64,
    users: &[ManagementUser],
    links: &[ConsolePermissionLink],
) -> Vec<ManagerChoice> {
    let mut choices: Vec<ManagerChoice> = vec![ManagerChoice::Unassigned];
    if console_id == 0 {
        return choices;
    }

    let eligible: HashSet<i64> = links
        .iter()
        .filter(|link| {
            link.console_profile_id == console_id && link.is_route_manager_for_this_console
        })
        .map(|link| link.user_id)
        .collect();

    choices.extend(
        users
            .iter()
            .filter(|user| eligible.contains(&user.user_id))
            .map(|user| ManagerChoice::Manager(RouteManager::new(&user.name))),
    );
    choices
}

fn require_showed(
    roster: &Roster,
    worker_number: &WorkerNumber,
    today: CalendarDay,
) -> Result<(), CoreError> {
    let worker = roster
        .worker(worker_number)
        .ok_or_else(|| CoreError::WorkerNotFound(worker_number.clone()))?;
    if !worker.showed_on(today) {
        return Err(CoreError::NotShowedToday {
            worker_number: worker_number.clone(),
            date: today,
        });
    }
    Ok(())
}

const fn require_route_mode(roster: &Roster) -> Result<(), CoreError> {
    if roster.season_type.uses_carts() {
        return Err(CoreError::WrongAssignmentMode {
            season_type: roster.season_type,
            attempted: "a worker directly to a route manager",
        });
    }
    Ok(())
}

const fn require_cart_mode(roster: &Roster, attempted: &'static str) -> Result<(), CoreError> {
    if !roster.season_type.uses_carts() {
        return Err(CoreError::WrongAssignmentMode {
            season_type: roster.season_type,
            attempted,
        });
    }
    Ok(())
}

/// Assigns a showed worker to a route manager, or clears the assignment.
pub(crate) fn assign_route_manager(
    roster: &mut Roster,
    worker_number: &WorkerNumber,
    manager: Option<RouteManager>,
    today: CalendarDay,
) -> Result<Applied, CoreError> {
    require_route_mode(roster)?;
    require_showed(roster, worker_number, today)?;

    let details: String = match &manager {
        Some(m) => format!("Assigned '{worker_number}' to {} ({})", m.name, m.initials),
        None => format!("Unassigned '{worker_number}'"),
    };
    let worker = roster.worker_mut(worker_number)?;
    worker.assignment = manager.map_or(Assignment::Unassigned, |manager| {
        Assignment::RouteManager { manager }
    });

    Ok(Applied::changed(details, vec![worker_number.clone()]))
}

/// Moves a showed worker into a cart, or out of any cart.
pub(crate) fn assign_cart(
    roster: &mut Roster,
    worker_number: &WorkerNumber,
    cart_id: Option<CartId>,
    today: CalendarDay,
) -> Result<Applied, CoreError> {
    require_cart_mode(roster, "a worker to a cart")?;
    require_showed(roster, worker_number, today)?;
    if let Some(id) = cart_id {
        roster.cart_mut(id)?;
    }

    let worker = roster.worker_mut(worker_number)?;
    let details: String = match cart_id {
        Some(id) => {
            worker.assignment = Assignment::Cart { cart_id: id };
            format!("Moved '{worker_number}' to cart #{id}")
        }
        None => {
            worker.assignment = Assignment::Unassigned;
            format!("Removed '{worker_number}' from carts")
        }
    };

    Ok(Applied::changed(details, vec![worker_number.clone()]))
}

/// Sets the day's cart count.
///
/// Carts `1..=count` are kept or created; retained carts keep their manager
/// and members. Members of removed carts become unassigned.
pub(crate) fn resize_carts(roster: &mut Roster, count: u32) -> Result<Applied, CoreError> {
    require_cart_mode(roster, "carts")?;
    validate_cart_count(count)?;

    let mut carts: Vec<Cart> = Vec::new();
    for id in 1..=count {
        let id: CartId = CartId::new(id)?;
        let cart: Cart = roster
            .cart(id)
            .cloned()
            .unwrap_or_else(|| Cart::new(id));
        carts.push(cart);
    }

    let mut affected: Vec<WorkerNumber> = Vec::new();
    for worker in &mut roster.workers {
        if worker
            .assignment
            .cart_id()
            .is_some_and(|id| id.value() > count)
        {
            worker.assignment = Assignment::Unassigned;
            affected.push(worker.worker_number.clone());
        }
    }

    if !affected.is_empty() {
        info!(
            count,
            unassigned = affected.len(),
            "Cart resize unassigned workers from removed carts"
        );
    }

    let previous: usize = roster.carts.len();
    roster.carts = carts;

    Ok(Applied::changed(
        format!("Resized carts from {previous} to {count}"),
        affected,
    ))
}

/// Sets or clears a cart's route manager.
pub(crate) fn set_cart_manager(
    roster: &mut Roster,
    cart_id: CartId,
    manager: Option<RouteManager>,
) -> Result<Applied, CoreError> {
    require_cart_mode(roster, "a route manager to a cart")?;
    let cart = roster.cart_mut(cart_id)?;

    let details: String = match &manager {
        Some(m) => format!("Cart #{cart_id} now run by {}", m.name),
        None => format!("Cleared route manager on cart #{cart_id}"),
    };
    cart.route_manager = manager;

    Ok(Applied::changed(details, Vec::new()))
}
