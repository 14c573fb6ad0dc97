//! The configuration record and the provider that produces it.

use serde::{Deserialize, Serialize};

use crate::dirs::DirectoryMapping;
use crate::engine::EngineId;
use crate::profile::Profile;
use crate::registration::{BuiltinFilter, PassthroughRule, Registration};

/// The configuration record handed to the host.
///
/// Serialises to exactly `dir`, `markdownTemplateEngine`,
/// `htmlTemplateEngine` and, when set, `passthroughFileCopy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub dir: DirectoryMapping,
    pub markdown_template_engine: EngineId,
    pub html_template_engine: EngineId,
    /// Copy every non-template file under the input root unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passthrough_file_copy: Option<bool>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            dir: DirectoryMapping::default(),
            markdown_template_engine: EngineId::nunjucks(),
            html_template_engine: EngineId::nunjucks(),
            passthrough_file_copy: None,
        }
    }
}

/// Output of the provider: the record plus the effects to apply, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteSetup {
    pub config: BuildConfig,
    pub registrations: Vec<Registration>,
}

impl SiteSetup {
    /// Registered filters as `(name, filter)`, in registration order.
    pub fn filters(&self) -> impl Iterator<Item = (&str, BuiltinFilter)> {
        self.registrations.iter().filter_map(|r| match r {
            Registration::Filter { name, filter } => Some((name.as_str(), *filter)),
            Registration::PassthroughCopy(_) => None,
        })
    }

    /// Registered passthrough rules, in registration order.
    pub fn passthrough_rules(&self) -> impl Iterator<Item = &PassthroughRule> {
        self.registrations.iter().filter_map(|r| match r {
            Registration::PassthroughCopy(rule) => Some(rule),
            Registration::Filter { .. } => None,
        })
    }
}

/// Builder for a [`SiteSetup`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: BuildConfig,
    registrations: Vec<Registration>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, dir: impl Into<String>) -> Self {
        self.config.dir.input = dir.into();
        self
    }

    pub fn output(mut self, dir: impl Into<String>) -> Self {
        self.config.dir.output = dir.into();
        self
    }

    /// Includes root, relative to the input root.
    pub fn includes(mut self, dir: impl Into<String>) -> Self {
        self.config.dir.includes = dir.into();
        self
    }

    /// Use one engine for both markdown and HTML templates.
    pub fn template_engine(self, engine: impl Into<EngineId>) -> Self {
        let engine = engine.into();
        self.markdown_template_engine(engine.clone())
            .html_template_engine(engine)
    }

    pub fn markdown_template_engine(mut self, engine: impl Into<EngineId>) -> Self {
        self.config.markdown_template_engine = engine.into();
        self
    }

    pub fn html_template_engine(mut self, engine: impl Into<EngineId>) -> Self {
        self.config.html_template_engine = engine.into();
        self
    }

    pub fn passthrough_file_copy(mut self, enabled: bool) -> Self {
        self.config.passthrough_file_copy = Some(enabled);
        self
    }

    pub fn add_filter(mut self, name: impl Into<String>, filter: BuiltinFilter) -> Self {
        self.registrations.push(Registration::Filter {
            name: name.into(),
            filter,
        });
        self
    }

    pub fn add_passthrough_copy(mut self, source: impl Into<String>) -> Self {
        self.registrations
            .push(Registration::PassthroughCopy(PassthroughRule::new(source)));
        self
    }

    pub fn build(self) -> SiteSetup {
        SiteSetup {
            config: self.config,
            registrations: self.registrations,
        }
    }
}

/// Produce the site setup described by `profile`.
///
/// Passthrough rules are registered first, in profile order, then the date
/// filter when enabled.
pub fn provide(profile: &Profile) -> SiteSetup {
    let mut builder = ConfigBuilder::new()
        .input(profile.dir.input.as_str())
        .output(profile.dir.output.as_str())
        .includes(profile.dir.includes.as_str())
        .markdown_template_engine(profile.templates.markdown.clone())
        .html_template_engine(profile.templates.html.clone());

    if let Some(enabled) = profile.build.passthrough_file_copy {
        builder = builder.passthrough_file_copy(enabled);
    }

    for source in &profile.build.passthrough {
        builder = builder.add_passthrough_copy(source.as_str());
    }

    if profile.build.date_filter {
        let filter = BuiltinFilter::HtmlDateString;
        builder = builder.add_filter(filter.name(), filter);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn presets() -> Vec<Profile> {
        let mut with_copy = Profile::site();
        with_copy.build.passthrough_file_copy = Some(true);

        vec![Profile::docs(), Profile::site(), with_copy]
    }

    #[test]
    fn default_profile_targets_docs() {
        let setup = provide(&Profile::default());

        assert_eq!(setup.config.dir.input, "src");
        assert_eq!(setup.config.dir.output, "docs");
        assert_eq!(setup.config.dir.includes, "../_includes");
        assert_eq!(setup.config.markdown_template_engine.as_str(), "njk");
        assert_eq!(setup.config.html_template_engine.as_str(), "njk");
        assert_eq!(
            setup.registrations,
            vec![
                Registration::PassthroughCopy(PassthroughRule::new("src/robots.txt")),
                Registration::Filter {
                    name: "htmlDateString".to_string(),
                    filter: BuiltinFilter::HtmlDateString,
                },
            ]
        );
    }

    #[test]
    fn includes_is_parent_relative_for_every_preset() {
        for profile in presets() {
            assert_eq!(provide(&profile).config.dir.includes, "../_includes");
        }
    }

    #[test]
    fn engines_agree_for_every_preset() {
        for profile in presets() {
            let config = provide(&profile).config;
            assert_eq!(config.markdown_template_engine, config.html_template_engine);
        }
    }

    #[test]
    fn site_preset_registers_nothing() {
        let setup = provide(&Profile::site());

        assert_eq!(setup.config.dir.output, "_site");
        assert!(setup.registrations.is_empty());
        assert_eq!(setup.config.passthrough_file_copy, None);
    }

    #[test]
    fn serializes_only_known_fields() {
        let json = serde_json::to_value(provide(&Profile::default()).config).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "dir": {
                    "input": "src",
                    "output": "docs",
                    "includes": "../_includes",
                },
                "markdownTemplateEngine": "njk",
                "htmlTemplateEngine": "njk",
            })
        );
    }

    #[test]
    fn serializes_passthrough_flag_when_set() {
        let setup = ConfigBuilder::new()
            .output("_site")
            .passthrough_file_copy(true)
            .build();

        let json = serde_json::to_value(&setup.config).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(json["passthroughFileCopy"], serde_json::json!(true));
        assert_eq!(keys.len(), 4);
    }

    #[test]
    fn builder_keeps_registration_order() {
        let setup = ConfigBuilder::new()
            .add_filter("first", BuiltinFilter::HtmlDateString)
            .add_passthrough_copy("src/a.txt")
            .add_filter("second", BuiltinFilter::HtmlDateString)
            .add_passthrough_copy("src/b.txt")
            .build();

        let filters: Vec<&str> = setup.filters().map(|(name, _)| name).collect();
        let rules: Vec<&str> = setup.passthrough_rules().map(|r| r.source()).collect();

        assert_eq!(filters, vec!["first", "second"]);
        assert_eq!(rules, vec!["src/a.txt", "src/b.txt"]);
    }

    #[test]
    fn template_engine_sets_both() {
        let config = ConfigBuilder::new().template_engine("html").build().config;

        assert_eq!(config.markdown_template_engine.as_str(), "html");
        assert_eq!(config.html_template_engine.as_str(), "html");
    }
}
