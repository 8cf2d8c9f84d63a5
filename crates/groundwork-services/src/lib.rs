//! # Groundwork Services
//!
//! External collaborator clients for Groundwork.
//!
//! This crate provides:
//! - **GitLab**: the hosting API (find the owning group, create the
//!   environment project)
//! - **git**: local repository plumbing (clone the template, rewire
//!   remotes, commit, push)
//!
//! Both are thin, retry-free wrappers; any failure is fatal to the
//! provisioning run.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod git;
pub mod gitlab;

pub use gitlab::{GitLabClient, GitLabConfig};
