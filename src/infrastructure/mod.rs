//! Concrete implementations of the domain ports.

pub mod html_form;
pub mod in_memory;
pub mod log_notifier;
