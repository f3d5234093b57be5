//! # Problems shared by the unit tests
//!
//! Convention for function names:
//!
//! * `fn linear_program()`
//! * `fn integer_program()`
//! * `fn tableau_form()`
//! * `fn optimal_tableau_form()`
//!
//! The `transportation` module holds transportation problems instead.
