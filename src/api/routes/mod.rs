//! API Routes
//!
//! Route handlers organized by functionality.

pub mod dashboard;
pub mod drinks;
pub mod export;
pub mod health;
