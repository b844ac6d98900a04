//! Background tasks.

pub mod page_revalidator;
