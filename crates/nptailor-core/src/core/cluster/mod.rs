//! # Cluster Description Module
//!
//! The upstream view of a biosynthetic gene cluster, as consumed by the tailoring
//! engine: candidate backbones made of modules, the enzyme domains detected in the
//! cluster, and the family/type labels assigned to it.
//!
//! Everything here is immutable during tailoring. A module's position in its
//! [`backbone::Backbone`] is its only identity downstream.
//!
//! ## Key Components
//!
//! - [`monomer`] - Building blocks and their short codes
//! - [`domain`] - Domain types, domains and ranked substrates
//! - [`backbone`] - Modules and ordered backbones
//! - [`sugar`] - Sugars available to glycosyltransferases
//! - [`context`] - The read-only [`context::ClusterContext`] queries used for gating

pub mod backbone;
pub mod context;
pub mod domain;
pub mod monomer;
pub mod sugar;
