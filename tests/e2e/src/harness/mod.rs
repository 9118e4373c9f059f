//! Test harness utilities

mod db_manager;

pub use db_manager::TestStoreManager;
