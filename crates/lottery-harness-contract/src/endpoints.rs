// crates/lottery-harness-contract/src/endpoints.rs
// ============================================================================
// Module: Lottery Endpoints
// Description: Request defaults for every lottery endpoint under contract.
// Purpose: Define each endpoint once and share it across scenarios.
// Dependencies: lottery-harness-core
// ============================================================================

//! ## Overview
//! Each descriptor carries the request that yields a success envelope when
//! sent unmodified. Scenarios derive their failure cases from these defaults
//! through overrides. Every endpoint except the admin listing authenticates
//! with `Authorization: Bearer {access_token}`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use lottery_harness_core::EndpointDescriptor;
use lottery_harness_core::HttpMethod;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// `GET /lottery/event`.
pub const LOTTERY_EVENT: &str = "lottery-event";
/// `GET /lottery/member`.
pub const LOTTERY_MEMBER: &str = "lottery-member";
/// `PUT /lottery/inventory`.
pub const LOTTERY_INVENTORY: &str = "lottery-inventory";
/// `PUT /lottery/receive`.
pub const LOTTERY_RECEIVE: &str = "lottery-receive";
/// `GET /admin/lottery`.
pub const ADMIN_LOTTERY: &str = "admin-lottery";

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Shared descriptors for the lottery endpoints.
#[derive(Debug, Clone)]
pub struct LotteryEndpoints {
    /// Discount list for one lottery event.
    pub event: Arc<EndpointDescriptor>,
    /// Discounts held by one member.
    pub member: Arc<EndpointDescriptor>,
    /// Inventory adjustment for one discount.
    pub inventory: Arc<EndpointDescriptor>,
    /// Receive flag update for one lottery draw.
    pub receive: Arc<EndpointDescriptor>,
    /// Paged admin listing of lottery events.
    pub admin: Arc<EndpointDescriptor>,
}

impl Default for LotteryEndpoints {
    fn default() -> Self {
        Self::new()
    }
}

impl LotteryEndpoints {
    /// Builds the descriptor set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            event: Arc::new(
                EndpointDescriptor::new(LOTTERY_EVENT, HttpMethod::Get, "/lottery/event")
                    .with_bearer_auth()
                    .with_query("event_id", 1),
            ),
            member: Arc::new(
                EndpointDescriptor::new(LOTTERY_MEMBER, HttpMethod::Get, "/lottery/member")
                    .with_bearer_auth()
                    .with_query("member_id", 1),
            ),
            inventory: Arc::new(
                EndpointDescriptor::new(LOTTERY_INVENTORY, HttpMethod::Put, "/lottery/inventory")
                    .with_bearer_auth()
                    .with_query("discount_id", 1)
                    .with_body_field("increase", true),
            ),
            receive: Arc::new(
                EndpointDescriptor::new(LOTTERY_RECEIVE, HttpMethod::Put, "/lottery/receive")
                    .with_bearer_auth()
                    .with_query("lottery_id", 1)
                    .with_body_field("is_receive", true),
            ),
            admin: Arc::new(
                EndpointDescriptor::new(ADMIN_LOTTERY, HttpMethod::Get, "/admin/lottery")
                    .with_query("paging", 1)
                    .with_query("amount", 10),
            ),
        }
    }

    /// Iterates the descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<EndpointDescriptor>> {
        [&self.event, &self.member, &self.inventory, &self.receive, &self.admin].into_iter()
    }
}
