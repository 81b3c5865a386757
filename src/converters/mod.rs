//! Output converters. Each submodule targets one authoring surface family.

pub mod slides;
