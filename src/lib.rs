//! # Magento Dynamic Translate
//!
//! Layered translation loading for Magento 2.
//!
//! Dictionaries are merged in a fixed order: module `i18n/` files, then
//! installed language packs, then the active theme and its ancestors from
//! the root theme down. The merged result is cached under an id built from
//! locale, area, scope, theme and module.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use magento_dynamic_translate::cache::MemoryCache;
//! use magento_dynamic_translate::context::StaticContext;
//! use magento_dynamic_translate::installation::MagentoInstallation;
//! use magento_dynamic_translate::theme::{Area, LocaleCode};
//!
//! let installation = MagentoInstallation::discover(&magento_root)?;
//! let design = installation.design(Area::Frontend, None)?;
//! let context = StaticContext::new(Some(Area::Frontend), LocaleCode::new("fr_FR"), "default");
//!
//! let mut translate = installation.translate(Arc::new(context), design, Arc::new(MemoryCache::new()));
//! translate.load_data(None, false)?;
//! println!("{}", translate.translate("Add to Cart"));
//! ```

/// Cache frontends and cache id construction
pub mod cache;

/// CLI configuration and argument parsing
pub mod config;

/// Area, locale and scope collaborators
pub mod context;

/// Magento dictionary CSV dialect
pub mod csv;

/// Active theme and parent lookup
pub mod design;

/// Error types for translation loading
pub mod error;

/// Theme translation file fallback
pub mod fallback;

/// Installation scanning and wiring
pub mod installation;

/// Module registry
pub mod module;

/// Language packs
pub mod pack;

/// Dictionary file reading
pub mod reader;

/// Theme, module and language pack scanning
pub mod scanner;

/// Dictionary cache payload encoding
pub mod serializer;

/// Module, language pack and theme load phases
pub mod source;

/// Theme, locale, and area types
pub mod theme;

/// Translation loader
pub mod translate;

/// Load configuration and cache key slots
pub mod translate_config;

/// Merged translation dictionary
pub mod translations;

/// Theme-relative file resolution
pub mod view;
