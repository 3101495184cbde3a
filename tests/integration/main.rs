//! Integration tests for the JoinIn coordination engine.

mod helpers;

mod admission_test;
mod chat_test;
mod icebreaker_test;
mod lifecycle_test;
