//! Application layer containing the checkout orchestration.
//!
//! This module defines the `CheckoutDispatcher`, the single entry point that
//! routes a cart to its payment strategy, and the `ProcessingGuard` that keeps
//! a checkout from being submitted twice.

pub mod dispatcher;
pub mod guard;
