//! Mixin support: config discovery/matching, unused-mixin detection and
//! `@Invoker` accessor target resolution.

pub mod config;
pub mod invoker;
pub mod unused;

pub use config::{
    is_mixin, mixin_targets, MixinConfig, MixinConfigFile, INVOKER_ANNOTATION, MIXIN_ANNOTATION,
};
pub use invoker::{find_invoker_target, invoker_target_name};
pub use unused::{apply_edit, find_unused_mixins, MixinConfigEdit, UnusedMixin};
