//! Template environment that receives registered filters.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use minijinja::value::ValueKind;
use minijinja::{path_loader, Environment, Error, ErrorKind, Value};
use serde::Serialize;

use kiln_config::{html_date_string, parse_date, BuiltinFilter, Clock, SiteSetup};

/// Template environment using minijinja, loading from the includes root.
pub struct TemplateEnvironment {
    env: Environment<'static>,
    filters: Vec<String>,
}

impl TemplateEnvironment {
    /// Create an environment with every filter registered in `setup`.
    pub fn new(includes: &Path, setup: &SiteSetup, clock: Arc<dyn Clock>) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(includes));

        let mut filters = Vec::new();
        for (name, filter) in setup.filters() {
            install_filter(&mut env, name, filter, clock.clone());
            tracing::debug!("Registered filter {}", name);
            filters.push(name.to_string());
        }

        Self { env, filters }
    }

    /// Names of the installed filters, in registration order.
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Load and compile a template from the includes root.
    pub fn check(&self, template: &str) -> Result<(), Error> {
        self.env.get_template(template).map(|_| ())
    }

    /// Render a template from the includes root.
    pub fn render<S: Serialize>(&self, template: &str, ctx: S) -> Result<String, Error> {
        self.env.get_template(template)?.render(ctx)
    }

    /// Render an inline template source.
    pub fn render_str<S: Serialize>(&self, source: &str, ctx: S) -> Result<String, Error> {
        self.env.render_str(source, ctx)
    }
}

fn install_filter(
    env: &mut Environment<'static>,
    name: &str,
    filter: BuiltinFilter,
    clock: Arc<dyn Clock>,
) {
    match filter {
        BuiltinFilter::HtmlDateString => {
            env.add_filter(
                name.to_string(),
                move |value: Option<Value>| -> Result<String, Error> {
                    let date = coerce_date(value)?;
                    Ok(html_date_string(date, clock.as_ref()))
                },
            );
        }
    }
}

/// Turn a template value into an instant.
///
/// `none`/undefined mean "now"; strings are RFC 3339 or `YYYY-MM-DD`; numbers
/// are Unix timestamps in seconds.
fn coerce_date(value: Option<Value>) -> Result<Option<DateTime<Utc>>, Error> {
    let Some(value) = value else {
        return Ok(None);
    };

    match value.kind() {
        ValueKind::None | ValueKind::Undefined => Ok(None),
        ValueKind::String => {
            let s = value.as_str().unwrap_or_default();
            parse_date(s).map(Some).ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("invalid date string {:?}", s),
                )
            })
        }
        ValueKind::Number => {
            let secs = i64::try_from(value.clone())?;
            DateTime::from_timestamp(secs, 0).map(Some).ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("timestamp out of range: {}", secs),
                )
            })
        }
        kind => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("expected a date, got {}", kind),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kiln_config::{ConfigBuilder, FixedClock};
    use minijinja::context;
    use std::fs;
    use tempfile::tempdir;

    fn fixed_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 7, 4, 21, 15, 0).unwrap(),
        ))
    }

    fn with_date_filter(includes: &Path) -> TemplateEnvironment {
        let setup = ConfigBuilder::new()
            .add_filter("htmlDateString", BuiltinFilter::HtmlDateString)
            .build();

        TemplateEnvironment::new(includes, &setup, fixed_clock())
    }

    #[test]
    fn missing_value_renders_clock_date() {
        let temp = tempdir().unwrap();
        let env = with_date_filter(temp.path());

        let html = env
            .render_str("{{ none | htmlDateString }}", context! {})
            .unwrap();
        let undefined = env
            .render_str("{{ missing | htmlDateString }}", context! {})
            .unwrap();

        assert_eq!(html, "2025-07-04");
        assert_eq!(undefined, "2025-07-04");
    }

    #[test]
    fn formats_string_dates() {
        let temp = tempdir().unwrap();
        let env = with_date_filter(temp.path());

        let html = env
            .render_str(
                "{{ d | htmlDateString }}",
                context! { d => "2024-01-01T23:59:59Z" },
            )
            .unwrap();

        assert_eq!(html, "2024-01-01");
    }

    #[test]
    fn formats_unix_timestamps() {
        let temp = tempdir().unwrap();
        let env = with_date_filter(temp.path());

        let html = env
            .render_str("{{ 86399 | htmlDateString }}", context! {})
            .unwrap();

        assert_eq!(html, "1970-01-01");
    }

    #[test]
    fn rejects_unparseable_dates() {
        let temp = tempdir().unwrap();
        let env = with_date_filter(temp.path());

        let err = env
            .render_str("{{ 'soon' | htmlDateString }}", context! {})
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn filter_absent_without_registration() {
        let temp = tempdir().unwrap();
        let env = TemplateEnvironment::new(temp.path(), &SiteSetup::default(), fixed_clock());

        assert!(env.filters().is_empty());
        assert!(env
            .render_str("{{ none | htmlDateString }}", context! {})
            .is_err());
    }

    #[test]
    fn renders_from_includes_root() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("sitemap.njk"),
            "<lastmod>{{ updated | htmlDateString }}</lastmod>",
        )
        .unwrap();
        let env = with_date_filter(temp.path());

        let xml = env
            .render("sitemap.njk", context! { updated => "2023-11-05" })
            .unwrap();

        assert_eq!(xml, "<lastmod>2023-11-05</lastmod>");
    }
}
