//! Checkout domain: money, carts, payment methods and the ports through which
//! external payment providers are reached.

pub mod cart;
pub mod money;
pub mod payment;
pub mod ports;
pub mod redirect;
pub mod widget;
