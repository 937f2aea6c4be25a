//! Round-trip planner server.
//!
//! A web application that answers: "I want to visit these places and come
//! back here. In which order is the ride-hailing bill smallest?" It then
//! follows the rider through the chosen loop, one leg per request.

pub mod domain;
pub mod geo;
pub mod locations;
pub mod mock;
pub mod planner;
pub mod pricing;
pub mod service;
pub mod store;
pub mod web;
