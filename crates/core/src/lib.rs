//! Core library for baseport
//!
//! This crate is the **Functional Core** of baseport. It holds the Basecamp
//! domain models and every transformation applied between fetching to-dos and
//! writing them out:
//!
//! - **`baseport_core`** (this crate): models, profile transformations, CSV serialization
//! - **`baseport`**: CLI, configuration loading and the Basecamp HTTP client
//!
//! Functions here take fixture data and return values, so they are tested
//! without any HTTP mocking.
//!
//! # Module Organization
//!
//! - [`basecamp`]: Basecamp API models (projects, to-do lists, to-dos, comments)
//! - [`markup`]: Mention resolution and HTML to plain-text conversion
//! - [`zipline`]: Field rewrites for the Zipline Jira import
//! - [`transform`]: Named profiles and the transformation entry point
//! - [`export`]: CSV output
//! - [`pagination`]: `Link` header parsing
//! - [`config`]: Credentials file parsing
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use baseport_core::basecamp::Todo;
//! use baseport_core::export::write_todos;
//! use baseport_core::transform::{transform, Profile};
//!
//! let todos = vec![Todo::from_value(raw_todo)?];
//! let todos = transform(todos, Profile::Zipline);
//! write_todos(std::io::stdout(), &todos)?;
//! ```

pub mod basecamp;
pub mod config;
pub mod export;
pub mod markup;
pub mod pagination;
pub mod transform;
pub mod zipline;
