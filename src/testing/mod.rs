//! Testing utilities: mock collaborators for unit and integration tests.

pub mod mocks;
