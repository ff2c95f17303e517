//! # homerouter-domain
//!
//! Pure domain model for the homerouter event router.
//!
//! ## Responsibilities
//! - Foundational types: typed string identifiers, error conventions
//! - Define **Devices** (addressable endpoints owned by one adapter, with capabilities)
//! - Define **Device groups** (named sets of devices targeted as one)
//! - Define **Adapters** (boundary components speaking one device family's protocol)
//! - Define the **Event taxonomy** (inbound intents, outbound commands)
//! - Color arithmetic used by translators (dimming, grayscale, channel wiring)
//! - Group power policies
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod adapter;
pub mod capability;
pub mod color;
pub mod device;
pub mod device_group;
pub mod event;
pub mod infrared;
pub mod policy;
